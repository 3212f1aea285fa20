use anchor_lang::prelude::*;

// =============================================================================
// NETWORK CONFIG & ROLE REGISTRY
// =============================================================================
//
// The singleton `NetworkConfig` owns the global sequences (invitation ids,
// index positions, post ids, event numbers) and is the mint/freeze authority of
// both reward mints. Every mutating instruction takes it writable, so the
// runtime's write lock on this one account serializes all state changes.
//
// Privileged roles live in their own accounts and are checked with pure
// predicates over the loaded snapshot, so tests can supply any registry state.
// =============================================================================

#[account]
pub struct NetworkConfig {
    /// Key allowed to manage issuers and counterparts
    pub admin: Pubkey,
    /// Mint for withdrawable utility balances
    pub utility_mint: Pubkey,
    /// Mint for the one-shot governance unlock
    pub governance_mint: Pubkey,

    // === Sequences ===
    /// Invitations ever minted (next invitation id)
    pub invitation_count: u64,
    /// Entries in the ever-issued index
    pub issuer_count: u64,
    /// Entries in the activated-users index
    pub activated_count: u64,
    /// Endorsement posts ever created (next post id)
    pub post_count: u64,
    /// Last emitted event number (0 = none yet)
    pub event_seq: u64,

    /// When the network was initialized
    pub created_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl NetworkConfig {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // admin
        32 +                     // utility_mint
        32 +                     // governance_mint
        8 +                      // invitation_count
        8 +                      // issuer_count
        8 +                      // activated_count
        8 +                      // post_count
        8 +                      // event_seq
        8 +                      // created_at
        1;                       // bump

    /// Reserve the next event number. Gap-free, starting at 1.
    pub fn next_event_seq(&mut self) -> u64 {
        self.event_seq += 1;
        self.event_seq
    }

    /// Reserve `n` consecutive event numbers, in emission order
    pub fn reserve_event_seqs(&mut self, n: usize) -> Vec<u64> {
        (0..n).map(|_| self.next_event_seq()).collect()
    }

    /// Reserve the next invitation id
    pub fn next_invitation_id(&mut self) -> u64 {
        let id = self.invitation_count;
        self.invitation_count += 1;
        id
    }

    /// Reserve the next post id
    pub fn next_post_id(&mut self) -> u64 {
        let id = self.post_count;
        self.post_count += 1;
        id
    }

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.admin == *key
    }
}

/// Role registry entry: an account per issuer that may mint and activate
#[account]
pub struct IssuerRole {
    /// The issuer this role belongs to
    pub issuer: Pubkey,
    /// Admin that last changed the role
    pub granted_by: Pubkey,
    /// Revocation flips this off; the account is kept for history
    pub active: bool,
    /// Last change timestamp
    pub updated_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl IssuerRole {
    pub const SIZE: usize = 8 + 32 + 32 + 1 + 8 + 1;

    /// Capability check against a registry snapshot. A missing role account
    /// authorizes nobody.
    pub fn authorizes(role: Option<&IssuerRole>, actor: &Pubkey) -> bool {
        matches!(role, Some(r) if r.active && r.issuer == *actor)
    }
}

/// A seller recognized by the product registry
#[account]
pub struct Counterpart {
    /// The seller's wallet
    pub seller: Pubkey,
    /// Opaque pointer into the off-chain metadata store
    pub metadata_ref: String,
    /// Deregistration flips this off
    pub active: bool,
    /// When first registered
    pub registered_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl Counterpart {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // seller
        4 + crate::constants::MAX_CONTENT_REF_LEN + // metadata_ref
        1 +                      // active
        8 +                      // registered_at
        1;                       // bump

    /// `isRecognizedCounterpart` over a registry snapshot
    pub fn is_recognized(entry: Option<&Counterpart>, who: &Pubkey) -> bool {
        matches!(entry, Some(c) if c.active && c.seller == *who)
    }
}
