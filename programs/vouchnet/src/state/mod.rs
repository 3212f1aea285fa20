// =============================================================================
// VOUCHNET STATE MODULE
// =============================================================================
//
// Account layouts and the pure state transitions behind every instruction.
//
// Architecture:
// - config: NetworkConfig singleton plus the issuer and counterpart registries
// - invite: InviteGraph (invitations, activations, ancestor forest)
// - social: SocialProofLedger (posts, superlikes, monthly quotas)
// - emission: EmissionAccountant (accrual and claims)
//
// Handlers load accounts, call into these modules, and write the results
// back. Nothing in here touches the runtime, so it is all unit testable.
// =============================================================================

pub mod config;
pub mod emission;
pub mod invite;
pub mod social;

pub use config::*;
pub use emission::*;
pub use invite::*;
pub use social::*;
