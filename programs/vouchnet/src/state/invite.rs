use std::collections::BTreeSet;

use anchor_lang::prelude::*;

use crate::constants::{INVITE_BATCH_SIZE, MAX_CODE_LEN, MAX_MINT_BATCH};
use crate::errors::InviteError;
use crate::pda;
use crate::state::{IssuerRole, NetworkConfig};

// =============================================================================
// INVITE GRAPH
// =============================================================================
//
// Single-use invitations and the ancestor forest they produce.
//
// Lifecycle of an invitation:  Minted(holder) --activate--> Used(by user)
//
// The holder is written once at mint time and has no mutator, so invitations
// are soulbound. Activation is the only transition and it is one-way. Every
// user may activate at most once (one `ActivationRecord` per user, ever), and
// the record pins the user's ancestor: the issuer of the invitation consumed.
// The forest shape keeps the same-circle test an equality check.
// =============================================================================

/// Outcome of `validate(code)`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvitationValidity {
    Valid,
    NotFound,
    AlreadyUsed,
    Expired,
}

impl InvitationValidity {
    /// Validate an optional invitation snapshot at `now`
    pub fn of(invitation: Option<&Invitation>, now: i64) -> Self {
        match invitation {
            None => InvitationValidity::NotFound,
            Some(inv) if inv.used => InvitationValidity::AlreadyUsed,
            Some(inv) if inv.is_expired(now) => InvitationValidity::Expired,
            Some(_) => InvitationValidity::Valid,
        }
    }

    pub fn require_valid(self) -> Result<()> {
        match self {
            InvitationValidity::Valid => Ok(()),
            InvitationValidity::NotFound => err!(InviteError::NotFound),
            InvitationValidity::AlreadyUsed => err!(InviteError::AlreadyUsed),
            InvitationValidity::Expired => err!(InviteError::Expired),
        }
    }
}

/// `{valid, reason}` as returned by the validate view
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub reason: InvitationValidity,
}

impl From<InvitationValidity> for ValidationReport {
    fn from(reason: InvitationValidity) -> Self {
        ValidationReport {
            valid: reason == InvitationValidity::Valid,
            reason,
        }
    }
}

#[account]
pub struct Invitation {
    /// Current (and only) holder. Kept first so holder filters sit at a
    /// fixed offset right after the discriminator.
    pub holder: Pubkey,
    /// Who minted it; becomes the ancestor of whoever activates it
    pub issuer: Pubkey,
    /// Global sequence id
    pub id: u64,
    /// Mint timestamp
    pub created_at: i64,
    /// Optional expiry (inclusive)
    pub expiry: Option<i64>,
    /// Flips false -> true exactly once
    pub used: bool,
    /// Set together with `used`
    pub used_by: Option<Pubkey>,
    /// The code itself (also the PDA seed)
    pub code: String,
    /// PDA bump seed
    pub bump: u8,
}

impl Invitation {
    pub const HOLDER_OFFSET: usize = 8;

    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // holder
        32 +                     // issuer
        8 +                      // id
        8 +                      // created_at
        9 +                      // expiry (Option<i64>)
        1 +                      // used
        33 +                     // used_by (Option<Pubkey>)
        4 + MAX_CODE_LEN +       // code
        1;                       // bump

    /// Fresh invitation held by its issuer
    pub fn mint(
        config: &mut NetworkConfig,
        code: &str,
        issuer: Pubkey,
        expiry: Option<i64>,
        now: i64,
    ) -> Invitation {
        let (_, bump) = pda::invitation(code);
        Invitation {
            holder: issuer,
            issuer,
            id: config.next_invitation_id(),
            created_at: now,
            expiry,
            used: false,
            used_by: None,
            code: code.to_string(),
            bump,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        matches!(self.expiry, Some(expiry) if now > expiry)
    }

    /// The single Minted -> Used transition. Returns the ancestor to record.
    fn consume(&mut self, user: Pubkey) -> Result<Pubkey> {
        require!(!self.used, InviteError::AlreadyUsed);
        self.used = true;
        self.used_by = Some(user);
        Ok(self.issuer)
    }
}

pub fn check_code(code: &str) -> Result<()> {
    require!(
        !code.is_empty() && code.len() <= MAX_CODE_LEN,
        InviteError::InvalidCode
    );
    Ok(())
}

/// Shape checks shared by `mint_batch` and `activate`. Global uniqueness is
/// checked separately against the code namespace.
pub fn check_batch(codes: &[String], exact_len: Option<usize>) -> Result<()> {
    match exact_len {
        Some(len) => require!(codes.len() == len, InviteError::WrongBatchSize),
        None => require!(
            !codes.is_empty() && codes.len() <= MAX_MINT_BATCH,
            InviteError::WrongBatchSize
        ),
    }

    let mut seen = BTreeSet::new();
    for code in codes {
        check_code(code)?;
        require!(seen.insert(code.as_str()), InviteError::DuplicateInBatch);
    }
    Ok(())
}

/// Everything a batch mint writes, with the event numbers reserved for it
pub struct MintedBatch {
    pub invitations: Vec<Invitation>,
    /// `seq` of each `InvitationMinted`, parallel to `invitations`
    pub minted_seqs: Vec<u64>,
    pub bundle_index: u32,
    /// Set on the issuer's first batch: its slot in the ever-issued index
    pub issued_index: Option<u64>,
    /// `seq` of the closing `InvitationBatchMinted`
    pub batch_seq: u64,
}

/// Mint a batch for `issuer`. `code_taken` answers whether a code already
/// exists in the global namespace (and may fail if it cannot tell). Nothing is
/// written when any check fails.
pub fn mint_batch(
    config: &mut NetworkConfig,
    role: Option<&IssuerRole>,
    issuer: &mut Member,
    codes: &[String],
    expiry: Option<i64>,
    code_taken: impl Fn(&str) -> Result<bool>,
    now: i64,
) -> Result<MintedBatch> {
    require!(
        IssuerRole::authorizes(role, &issuer.user),
        InviteError::Unauthorized
    );
    check_batch(codes, None)?;
    for code in codes {
        require!(!code_taken(code)?, InviteError::CodeAlreadyExists);
    }

    let holder = issuer.user;
    let invitations: Vec<Invitation> = codes
        .iter()
        .map(|code| Invitation::mint(config, code, holder, expiry, now))
        .collect();
    let bundle_index = issuer.take_bundle(invitations.len());
    let issued_index = issuer.record_issuance(config);
    let minted_seqs = config.reserve_event_seqs(invitations.len());

    Ok(MintedBatch {
        invitations,
        minted_seqs,
        bundle_index,
        issued_index,
        batch_seq: config.next_event_seq(),
    })
}

/// Who asks for an activation, and what they bring along
pub struct ActivationRequest<'a> {
    pub user: Pubkey,
    /// Privileged issuer submitting the activation
    pub operator: Pubkey,
    pub operator_role: Option<&'a IssuerRole>,
    /// Existing activation record of `user`, if any
    pub prior: Option<&'a ActivationRecord>,
    pub new_codes: &'a [String],
    pub expiry: Option<i64>,
    pub now: i64,
}

/// Everything an activation writes
pub struct Activation {
    pub record: ActivationRecord,
    pub minted: Vec<Invitation>,
    pub bundle_index: u32,
    /// `seq` of `InvitationActivated`; the minted codes follow it
    pub activated_seq: u64,
    /// `seq` of each `InvitationMinted`, parallel to `minted`
    pub minted_seqs: Vec<u64>,
}

/// Activate `invitation` for `request.user`, whose `Member` is `member`.
///
/// All preconditions are checked before anything is touched: the operator's
/// role, `UserAlreadyActivated`, the invitation's validity, then the batch of
/// replacement codes (`WrongBatchSize`, `DuplicateInBatch`,
/// `CodeAlreadyExists`).
pub fn activate(
    config: &mut NetworkConfig,
    request: ActivationRequest<'_>,
    invitation: Option<&mut Invitation>,
    member: &mut Member,
    code_taken: impl Fn(&str) -> Result<bool>,
) -> Result<Activation> {
    require!(
        IssuerRole::authorizes(request.operator_role, &request.operator),
        InviteError::Unauthorized
    );
    require!(request.prior.is_none(), InviteError::UserAlreadyActivated);
    InvitationValidity::of(invitation.as_deref(), request.now)
        .require_valid()?;
    check_batch(request.new_codes, Some(INVITE_BATCH_SIZE))?;
    for code in request.new_codes {
        require!(!code_taken(code)?, InviteError::CodeAlreadyExists);
    }

    // Validity was checked above, so `NotFound` cannot occur here
    let invitation = invitation.ok_or(InviteError::NotFound)?;
    let user = request.user;
    let ancestor = invitation.consume(user)?;

    let activation_index = config.activated_count;
    config.activated_count += 1;

    let (_, bump) = pda::activation(&user);
    let record = ActivationRecord {
        user,
        invitation: pda::invitation(&invitation.code).0,
        ancestor,
        activated_by: request.operator,
        activation_index,
        activated_at: request.now,
        bump,
    };

    let (expiry, now) = (request.expiry, request.now);
    let minted: Vec<Invitation> = request
        .new_codes
        .iter()
        .map(|code| Invitation::mint(config, code, user, expiry, now))
        .collect();
    let bundle_index = member.take_bundle(minted.len());
    let activated_seq = config.next_event_seq();
    let minted_seqs = config.reserve_event_seqs(minted.len());

    Ok(Activation {
        record,
        minted,
        bundle_index,
        activated_seq,
        minted_seqs,
    })
}

/// Write-once `user -> invitation` mapping, carrying the ancestor link
#[account]
pub struct ActivationRecord {
    /// The activated user
    pub user: Pubkey,
    /// The invitation account consumed
    pub invitation: Pubkey,
    /// Issuer of that invitation
    pub ancestor: Pubkey,
    /// Privileged issuer that submitted the activation
    pub activated_by: Pubkey,
    /// Position in the activated-users index
    pub activation_index: u64,
    /// When activated
    pub activated_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl ActivationRecord {
    pub const SIZE: usize = 8 + 32 + 32 + 32 + 32 + 8 + 8 + 1;

    /// True when both users are activated and share the same ancestor
    pub fn same_circle(a: Option<&ActivationRecord>, b: Option<&ActivationRecord>) -> bool {
        matches!((a, b), (Some(a), Some(b)) if a.ancestor == b.ancestor)
    }
}

/// Per-user bookkeeping: superlike nonce and invitation counters
#[account]
pub struct Member {
    pub user: Pubkey,
    /// Superlike nonce, bumped on every accepted superlike
    pub nonce: u64,
    /// Invitations ever received as holder
    pub invitations_held: u32,
    /// Bundles written for this holder
    pub bundle_count: u32,
    /// Position in the ever-issued index, once the user has minted
    pub issued_index: Option<u64>,
    /// PDA bump seed
    pub bump: u8,
}

impl Member {
    pub const SIZE: usize = 8 + 32 + 8 + 4 + 4 + 9 + 1;

    /// Fill in identity fields of an account created by `init_if_needed`
    pub fn ensure_initialized(&mut self, user: Pubkey, bump: u8) {
        if self.user == Pubkey::default() {
            self.user = user;
            self.bump = bump;
        }
    }

    pub fn check_nonce(&self, expected: u64) -> Result<()> {
        require!(
            self.nonce == expected,
            crate::errors::SocialError::StaleNonce
        );
        Ok(())
    }

    pub fn advance_nonce(&mut self) {
        self.nonce += 1;
    }

    /// First mint by this member appends it to the ever-issued index.
    /// Returns the new index position, or `None` if already listed.
    pub fn record_issuance(&mut self, config: &mut NetworkConfig) -> Option<u64> {
        if self.issued_index.is_some() {
            return None;
        }
        let index = config.issuer_count;
        config.issuer_count += 1;
        self.issued_index = Some(index);
        Some(index)
    }

    /// Account for a new bundle; returns its index
    pub fn take_bundle(&mut self, size: usize) -> u32 {
        let index = self.bundle_count;
        self.bundle_count += 1;
        self.invitations_held += size as u32;
        index
    }
}

/// Codes of one batch, listed under their holder
#[account]
pub struct InvitationBundle {
    pub holder: Pubkey,
    pub index: u32,
    pub codes: Vec<String>,
    pub created_at: i64,
    pub bump: u8,
}

impl InvitationBundle {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // holder
        4 +                      // index
        4 + MAX_MINT_BATCH * (4 + MAX_CODE_LEN) + // codes
        8 +                      // created_at
        1;                       // bump
}

/// Append-only index slot (ever-issued issuers, activated users)
#[account]
pub struct IndexEntry {
    pub index: u64,
    pub member: Pubkey,
    pub bump: u8,
}

impl IndexEntry {
    pub const SIZE: usize = 8 + 8 + 32 + 1;
}
