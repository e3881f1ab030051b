pub mod seed;
pub mod store;
pub mod verification;

pub use crate::core::seed::{seed_sample_data, SeedIds};
pub use crate::core::store::MarketStore;
pub use crate::core::verification::{VerificationDecision, VerificationOutcome};
