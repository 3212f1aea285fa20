use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::CounterKind;
use crate::ID;

// Address derivation for every account the program owns, keyed by its natural
// key. Clients use these for point lookups; handlers use them to check that a
// passed-in account is the one its key implies.

pub fn config() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], &ID)
}

pub fn utility_mint() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[UTILITY_MINT_SEED], &ID)
}

pub fn governance_mint() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GOVERNANCE_MINT_SEED], &ID)
}

pub fn issuer_role(issuer: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ISSUER_ROLE_SEED, issuer.as_ref()], &ID)
}

pub fn counterpart(seller: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[COUNTERPART_SEED, seller.as_ref()], &ID)
}

/// Address of a well-formed code; see `try_invitation` for untrusted input
pub fn invitation(code: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[INVITATION_SEED, code.as_bytes()], &ID)
}

/// Address of `code`, or `None` for a code that can never have been minted.
/// Seeds over 32 bytes cannot be derived at all, so length is checked first.
pub fn try_invitation(code: &str) -> Option<(Pubkey, u8)> {
    if code.is_empty() || code.len() > MAX_CODE_LEN {
        return None;
    }
    Some(invitation(code))
}

pub fn bundle(holder: &Pubkey, index: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[BUNDLE_SEED, holder.as_ref(), &index.to_le_bytes()], &ID)
}

pub fn activation(user: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ACTIVATION_SEED, user.as_ref()], &ID)
}

pub fn member(user: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MEMBER_SEED, user.as_ref()], &ID)
}

pub fn issued_entry(index: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ISSUED_INDEX_SEED, &index.to_le_bytes()], &ID)
}

pub fn activated_entry(index: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ACTIVATED_INDEX_SEED, &index.to_le_bytes()], &ID)
}

/// Posts are addressed by their position among posts about `target`
pub fn post(target: &Pubkey, mention_index: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POST_SEED, target.as_ref(), &mention_index.to_le_bytes()],
        &ID,
    )
}

pub fn superlike(post: &Pubkey, liker: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SUPERLIKE_SEED, post.as_ref(), liker.as_ref()], &ID)
}

pub fn mentions(target: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MENTIONS_SEED, target.as_ref()], &ID)
}

pub fn monthly(kind: CounterKind, actor: &Pubkey, bucket: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[MONTHLY_SEED, kind.seed(), actor.as_ref(), &bucket.to_le_bytes()],
        &ID,
    )
}

pub fn accrual(account: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ACCRUAL_SEED, account.as_ref()], &ID)
}
