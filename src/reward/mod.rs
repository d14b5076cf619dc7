pub mod bands;
pub mod generator;

pub use bands::{RewardBand, PRIMARY_DOMAIN, SUB_DOMAIN};
pub use generator::RewardGenerator;
