pub mod entry;
pub mod error;
pub mod tier;

pub use entry::*;
pub use error::*;
pub use tier::*;
