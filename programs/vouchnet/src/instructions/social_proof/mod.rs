pub mod create_post;
pub mod superlike;

pub use create_post::*;
pub use superlike::*;
