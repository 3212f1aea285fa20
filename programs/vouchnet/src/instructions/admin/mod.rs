pub mod initialize;
pub mod manage_counterpart;
pub mod manage_issuer;
pub mod transfer_admin;

pub use initialize::*;
pub use manage_counterpart::*;
pub use manage_issuer::*;
pub use transfer_admin::*;
