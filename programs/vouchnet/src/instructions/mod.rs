pub mod admin;
pub mod emission;
pub mod invite_graph;
pub mod queries;
pub mod social_proof;

pub use admin::*;
pub use emission::*;
pub use invite_graph::*;
pub use queries::*;
pub use social_proof::*;
