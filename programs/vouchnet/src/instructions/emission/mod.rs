pub mod claim_governance;
pub mod claim_utility;

pub use claim_governance::*;
pub use claim_utility::*;
