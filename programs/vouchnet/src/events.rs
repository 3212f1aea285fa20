use anchor_lang::prelude::*;

// =============================================================================
// AUDIT STREAM
// =============================================================================
//
// One event per state transition. Every event carries `seq`, taken from
// `NetworkConfig::next_event_seq`, so indexers can replay the full history in
// order and detect gaps. Events are emitted as the last step of a handler.
// =============================================================================

#[event]
pub struct NetworkInitialized {
    pub seq: u64,
    pub admin: Pubkey,
    pub utility_mint: Pubkey,
    pub governance_mint: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AdminTransferred {
    pub seq: u64,
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct IssuerRoleChanged {
    pub seq: u64,
    pub issuer: Pubkey,
    pub active: bool,
    pub changed_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct CounterpartChanged {
    pub seq: u64,
    pub seller: Pubkey,
    pub active: bool,
    pub metadata_ref: String,
    pub timestamp: i64,
}

#[event]
pub struct InvitationMinted {
    pub seq: u64,
    pub invitation: Pubkey,
    pub id: u64,
    pub code: String,
    pub holder: Pubkey,
    pub expiry: Option<i64>,
    pub timestamp: i64,
}

#[event]
pub struct InvitationBatchMinted {
    pub seq: u64,
    pub issuer: Pubkey,
    pub bundle: Pubkey,
    pub count: u8,
    pub timestamp: i64,
}

#[event]
pub struct InvitationActivated {
    pub seq: u64,
    pub invitation: Pubkey,
    pub code: String,
    pub user: Pubkey,
    pub ancestor: Pubkey,
    pub activated_by: Pubkey,
    pub activation_index: u64,
    pub timestamp: i64,
}

#[event]
pub struct PostCreated {
    pub seq: u64,
    pub post: Pubkey,
    pub id: u64,
    pub author: Pubkey,
    pub target: Pubkey,
    pub ancestor_of_author: Pubkey,
    pub content_ref: String,
    pub timestamp: i64,
}

#[event]
pub struct SuperlikeRecorded {
    pub seq: u64,
    pub post: Pubkey,
    pub liker: Pubkey,
    pub target: Pubkey,
    pub superlike_count: u32,
    pub nonce: u64,
    pub timestamp: i64,
}

#[event]
pub struct EmissionAccrued {
    pub seq: u64,
    pub account: Pubkey,
    pub post: Pubkey,
    pub amount: u64,
    pub utility_pending: u64,
    pub governance_pending: u64,
    pub timestamp: i64,
}

#[event]
pub struct UtilityClaimed {
    pub seq: u64,
    pub account: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct GovernanceClaimed {
    pub seq: u64,
    pub account: Pubkey,
    pub amount: u64,
    pub mentions: u32,
    pub timestamp: i64,
}
