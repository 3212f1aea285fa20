// =============================================================================
// PROTOCOL CONSTANTS
// =============================================================================
//
// Fixed by design, not configurable at runtime. Changing any of these is a
// program upgrade.
// =============================================================================

/// Invitations minted to every newly activated member
pub const INVITE_BATCH_SIZE: usize = 12;

/// Upper bound on codes in a single `mint_batch` transaction
pub const MAX_MINT_BATCH: usize = INVITE_BATCH_SIZE;

/// Invitation codes are used directly as PDA seeds
pub const MAX_CODE_LEN: usize = 16;

/// Opaque content identifiers (CIDs and similar)
pub const MAX_CONTENT_REF_LEN: usize = 64;

/// Posts an author may publish per month
pub const MONTHLY_POST_LIMIT: u16 = 8;

/// Times a counterpart may be mentioned per month
pub const MONTHLY_MENTION_LIMIT: u16 = 8;

/// Superlikes a member may give per month
pub const MONTHLY_SUPERLIKE_LIMIT: u16 = 8;

/// Lifetime mentions needed before the governance balance can be claimed
pub const GOVERNANCE_REPUTATION_THRESHOLD: u32 = 8;

/// Base units credited to both pending balances per accepted superlike
pub const EMISSION_RATE: u64 = 1_000_000_000;

/// Decimals of the utility and governance mints
pub const TOKEN_DECIMALS: u8 = 9;

/// Length of one counter period (30 days)
pub const MONTH_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Max entries returned by a paged view (return data is capped at 1024 bytes)
pub const MAX_PAGE: usize = 24;

/// Post summaries are wider than index entries
pub const MAX_POST_PAGE: usize = 16;

// === PDA seeds ===
pub const CONFIG_SEED: &[u8] = b"config";
pub const UTILITY_MINT_SEED: &[u8] = b"utility_mint";
pub const GOVERNANCE_MINT_SEED: &[u8] = b"governance_mint";
pub const ISSUER_ROLE_SEED: &[u8] = b"issuer_role";
pub const COUNTERPART_SEED: &[u8] = b"counterpart";
pub const INVITATION_SEED: &[u8] = b"invitation";
pub const BUNDLE_SEED: &[u8] = b"bundle";
pub const ACTIVATION_SEED: &[u8] = b"activation";
pub const MEMBER_SEED: &[u8] = b"member";
pub const ISSUED_INDEX_SEED: &[u8] = b"issued";
pub const ACTIVATED_INDEX_SEED: &[u8] = b"activated";
pub const POST_SEED: &[u8] = b"post";
pub const SUPERLIKE_SEED: &[u8] = b"superlike";
pub const MENTIONS_SEED: &[u8] = b"mentions";
pub const MONTHLY_SEED: &[u8] = b"monthly";
pub const ACCRUAL_SEED: &[u8] = b"accrual";
