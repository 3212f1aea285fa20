pub mod activate;
pub mod mint_batch;

pub use activate::*;
pub use mint_batch::*;

use anchor_lang::prelude::*;

use crate::constants::INVITATION_SEED;
use crate::errors::InviteError;
use crate::events::InvitationMinted;
use crate::pda;
use crate::state::{Invitation, InvitationBundle};
use crate::utils::{create_program_account, is_allocated, load_optional, write_account};

// New invitation accounts travel in `remaining_accounts`, one per code, in any
// order. Each must sit at the address its code derives to.

pub(crate) fn invitation_slot<'a, 'info>(
    slots: &'a [AccountInfo<'info>],
    code: &str,
) -> Result<&'a AccountInfo<'info>> {
    let (address, _) = pda::try_invitation(code).ok_or(InviteError::InvalidCode)?;
    slots
        .iter()
        .find(|slot| slot.key() == address)
        .ok_or_else(|| error!(InviteError::InvitationAccountMismatch))
}

pub(crate) fn code_taken(slots: &[AccountInfo], code: &str) -> Result<bool> {
    Ok(is_allocated(invitation_slot(slots, code)?))
}

/// Load the invitation `info` holds for a caller-supplied `code`. A code that
/// can never have been minted reads as absent; its address is never derived.
pub(crate) fn load_invitation(info: &AccountInfo, code: &str) -> Result<Option<Invitation>> {
    let address = match pda::try_invitation(code) {
        Some((address, _)) => address,
        None => return Ok(None),
    };
    require_keys_eq!(info.key(), address, InviteError::InvitationAccountMismatch);
    load_optional(info)
}

/// Create and fill the accounts of freshly minted invitations, emitting one
/// `InvitationMinted` each under the numbers reserved for them
pub(crate) fn store_invitations<'info>(
    payer: &AccountInfo<'info>,
    system: &AccountInfo<'info>,
    slots: &[AccountInfo<'info>],
    invitations: &[Invitation],
    seqs: &[u64],
) -> Result<()> {
    for (invitation, seq) in invitations.iter().zip(seqs) {
        let slot = invitation_slot(slots, &invitation.code)?;
        create_program_account(
            payer,
            slot,
            system,
            &[INVITATION_SEED, invitation.code.as_bytes(), &[invitation.bump]],
            Invitation::SIZE,
        )?;
        write_account(slot, invitation)?;

        emit!(InvitationMinted {
            seq: *seq,
            invitation: slot.key(),
            id: invitation.id,
            code: invitation.code.clone(),
            holder: invitation.holder,
            expiry: invitation.expiry,
            timestamp: invitation.created_at,
        });
    }
    Ok(())
}

pub(crate) fn fill_bundle(
    bundle: &mut InvitationBundle,
    holder: Pubkey,
    index: u32,
    invitations: &[Invitation],
    now: i64,
    bump: u8,
) {
    bundle.holder = holder;
    bundle.index = index;
    bundle.codes = invitations.iter().map(|i| i.code.clone()).collect();
    bundle.created_at = now;
    bundle.bump = bump;
}
