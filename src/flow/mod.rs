pub mod engine;
pub mod state;

pub use engine::{normalize_handle, CheckEngine, RevealTimer};
pub use state::{FlowEvent, FlowState};
