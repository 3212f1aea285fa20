pub mod emission_views;
pub mod invite_views;
pub mod social_views;

pub use emission_views::*;
pub use invite_views::*;
pub use social_views::*;

use anchor_lang::prelude::*;

use crate::errors::AdminError;
use crate::utils::load_optional;

// =============================================================================
// QUERY SURFACE
// =============================================================================
//
// Read-only instructions. Results come back as Borsh-encoded return data;
// clients simulate these rather than send them. Paged views take the page's
// accounts in `remaining_accounts`, in index order.
// =============================================================================

/// Load up to `max` accounts of a page. `address_of(i)` is the address the
/// i-th account must have. The page ends early at the first empty slot.
pub(crate) fn load_page<T>(
    accounts: &[AccountInfo],
    max: usize,
    address_of: impl Fn(usize) -> Pubkey,
) -> Result<Vec<T>>
where
    T: AccountDeserialize + Owner,
{
    require!(accounts.len() <= max, AdminError::PageTooLarge);

    let mut page = Vec::with_capacity(accounts.len());
    for (i, info) in accounts.iter().enumerate() {
        require_keys_eq!(info.key(), address_of(i), AdminError::IndexAccountMismatch);
        match load_optional::<T>(info)? {
            Some(item) => page.push(item),
            None => break,
        }
    }
    Ok(page)
}
