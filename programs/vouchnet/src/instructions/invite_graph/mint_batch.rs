use anchor_lang::prelude::*;

use super::{code_taken, fill_bundle, store_invitations};
use crate::constants::{BUNDLE_SEED, CONFIG_SEED, ISSUED_INDEX_SEED, ISSUER_ROLE_SEED, MEMBER_SEED};
use crate::errors::AdminError;
use crate::events::InvitationBatchMinted;
use crate::pda;
use crate::state::{invite, IndexEntry, InvitationBundle, IssuerRole, Member, NetworkConfig};
use crate::utils::{create_program_account, load_optional, write_account};

// =============================================================================
// MINT BATCH
// =============================================================================
//
// A privileged issuer mints fresh invitations it holds itself. Accounts for
// the new codes go in `remaining_accounts`; the issuer's first batch also
// lists it in the ever-issued index, which `issued_entry` must point at.
// =============================================================================

#[derive(Accounts)]
pub struct MintBatch<'info> {
    #[account(mut)]
    pub issuer: Signer<'info>,

    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, NetworkConfig>,

    /// CHECK: role registry entry; may be empty, read with `load_optional`
    #[account(seeds = [ISSUER_ROLE_SEED, issuer.key().as_ref()], bump)]
    pub issuer_role: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = issuer,
        space = Member::SIZE,
        seeds = [MEMBER_SEED, issuer.key().as_ref()],
        bump,
    )]
    pub member: Account<'info, Member>,

    #[account(
        init,
        payer = issuer,
        space = InvitationBundle::SIZE,
        seeds = [BUNDLE_SEED, issuer.key().as_ref(), member.bundle_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub bundle: Account<'info, InvitationBundle>,

    /// CHECK: next ever-issued index slot; only created on the issuer's
    /// first batch, address verified in the handler
    #[account(mut)]
    pub issued_entry: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, MintBatch<'info>>,
    codes: Vec<String>,
    expiry: Option<i64>,
) -> Result<()> {
    let clock = Clock::get()?;
    let issuer = ctx.accounts.issuer.key();
    let role = load_optional::<IssuerRole>(&ctx.accounts.issuer_role)?;

    let slots = ctx.remaining_accounts;
    let accounts = &mut *ctx.accounts;
    accounts.member.ensure_initialized(issuer, ctx.bumps.member);
    let batch = invite::mint_batch(
        &mut accounts.config,
        role.as_ref(),
        &mut accounts.member,
        &codes,
        expiry,
        |code| code_taken(slots, code),
        clock.unix_timestamp,
    )?;

    fill_bundle(
        &mut accounts.bundle,
        issuer,
        batch.bundle_index,
        &batch.invitations,
        clock.unix_timestamp,
        ctx.bumps.bundle,
    );

    if let Some(index) = batch.issued_index {
        let (address, bump) = pda::issued_entry(index);
        require_keys_eq!(
            accounts.issued_entry.key(),
            address,
            AdminError::IndexAccountMismatch
        );
        let entry_info = accounts.issued_entry.to_account_info();
        create_program_account(
            &accounts.issuer.to_account_info(),
            &entry_info,
            &accounts.system_program.to_account_info(),
            &[ISSUED_INDEX_SEED, &index.to_le_bytes(), &[bump]],
            IndexEntry::SIZE,
        )?;
        write_account(
            &entry_info,
            &IndexEntry {
                index,
                member: issuer,
                bump,
            },
        )?;
        msg!("Listed {} as issuer #{}", issuer, index);
    }

    store_invitations(
        &accounts.issuer.to_account_info(),
        &accounts.system_program.to_account_info(),
        slots,
        &batch.invitations,
        &batch.minted_seqs,
    )?;

    emit!(InvitationBatchMinted {
        seq: batch.batch_seq,
        issuer,
        bundle: accounts.bundle.key(),
        count: batch.invitations.len() as u8,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Minted {} invitations for {} (bundle #{})",
        batch.invitations.len(),
        issuer,
        batch.bundle_index
    );
    Ok(())
}
