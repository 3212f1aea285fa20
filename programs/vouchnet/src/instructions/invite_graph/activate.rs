use anchor_lang::prelude::*;

use super::{code_taken, fill_bundle, load_invitation, store_invitations};
use crate::constants::{
    ACTIVATED_INDEX_SEED, ACTIVATION_SEED, BUNDLE_SEED, CONFIG_SEED, ISSUER_ROLE_SEED, MEMBER_SEED,
};
use crate::events::InvitationActivated;
use crate::state::{
    invite, ActivationRecord, ActivationRequest, IndexEntry, InvitationBundle, IssuerRole, Member,
    NetworkConfig,
};
use crate::utils::{create_program_account, load_optional, write_account};

// =============================================================================
// ACTIVATE INVITATION
// =============================================================================
//
// An issuer activates `code` on behalf of `user`. The user gets an activation
// record pinning their ancestor, a slot in the activated-users index, and 12
// fresh invitations of their own (accounts in `remaining_accounts`).
//
// Accounts that must not exist yet (the activation record, new invitations)
// are unchecked here and created in the handler so that their presence maps
// to `UserAlreadyActivated` / `CodeAlreadyExists` instead of a generic
// constraint failure. The consumed invitation is matched against its code in
// the handler, since codes of any length may arrive here.
// =============================================================================

#[derive(Accounts)]
#[instruction(code: String, user: Pubkey)]
pub struct Activate<'info> {
    /// Privileged issuer submitting the activation
    #[account(mut)]
    pub operator: Signer<'info>,

    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, NetworkConfig>,

    /// CHECK: role registry entry of the operator; read with `load_optional`
    #[account(seeds = [ISSUER_ROLE_SEED, operator.key().as_ref()], bump)]
    pub operator_role: UncheckedAccount<'info>,

    /// CHECK: invitation being consumed; may not exist (`NotFound`).
    /// Address checked by `load_invitation`
    #[account(mut)]
    pub invitation: UncheckedAccount<'info>,

    /// CHECK: activation record of `user`; must still be empty
    #[account(mut, seeds = [ACTIVATION_SEED, user.as_ref()], bump)]
    pub activation: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = operator,
        space = Member::SIZE,
        seeds = [MEMBER_SEED, user.as_ref()],
        bump,
    )]
    pub member: Account<'info, Member>,

    #[account(
        init,
        payer = operator,
        space = InvitationBundle::SIZE,
        seeds = [BUNDLE_SEED, user.as_ref(), member.bundle_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub bundle: Account<'info, InvitationBundle>,

    /// CHECK: next activated-users index slot, created in the handler
    #[account(
        mut,
        seeds = [ACTIVATED_INDEX_SEED, config.activated_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub activated_entry: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, Activate<'info>>,
    code: String,
    user: Pubkey,
    new_codes: Vec<String>,
    expiry: Option<i64>,
) -> Result<()> {
    let clock = Clock::get()?;
    let operator = ctx.accounts.operator.key();

    let role = load_optional::<IssuerRole>(&ctx.accounts.operator_role)?;
    let prior = load_optional::<ActivationRecord>(&ctx.accounts.activation)?;
    let mut invitation = load_invitation(&ctx.accounts.invitation, &code)?;

    let slots = ctx.remaining_accounts;
    let accounts = &mut *ctx.accounts;
    accounts.member.ensure_initialized(user, ctx.bumps.member);
    let request = ActivationRequest {
        user,
        operator,
        operator_role: role.as_ref(),
        prior: prior.as_ref(),
        new_codes: &new_codes,
        expiry,
        now: clock.unix_timestamp,
    };
    let activation = invite::activate(
        &mut accounts.config,
        request,
        invitation.as_mut(),
        &mut accounts.member,
        |c| code_taken(slots, c),
    )?;

    let invitation_info = accounts.invitation.to_account_info();
    if let Some(consumed) = invitation.as_ref() {
        write_account(&invitation_info, consumed)?;
    }

    let payer = accounts.operator.to_account_info();
    let system = accounts.system_program.to_account_info();

    let record = &activation.record;
    let record_info = accounts.activation.to_account_info();
    create_program_account(
        &payer,
        &record_info,
        &system,
        &[ACTIVATION_SEED, user.as_ref(), &[ctx.bumps.activation]],
        ActivationRecord::SIZE,
    )?;
    write_account(&record_info, record)?;

    let entry_info = accounts.activated_entry.to_account_info();
    let entry_bump = ctx.bumps.activated_entry;
    create_program_account(
        &payer,
        &entry_info,
        &system,
        &[
            ACTIVATED_INDEX_SEED,
            &record.activation_index.to_le_bytes(),
            &[entry_bump],
        ],
        IndexEntry::SIZE,
    )?;
    write_account(
        &entry_info,
        &IndexEntry {
            index: record.activation_index,
            member: user,
            bump: entry_bump,
        },
    )?;

    fill_bundle(
        &mut accounts.bundle,
        user,
        activation.bundle_index,
        &activation.minted,
        clock.unix_timestamp,
        ctx.bumps.bundle,
    );

    emit!(InvitationActivated {
        seq: activation.activated_seq,
        invitation: invitation_info.key(),
        code: code.clone(),
        user,
        ancestor: record.ancestor,
        activated_by: operator,
        activation_index: record.activation_index,
        timestamp: clock.unix_timestamp,
    });

    store_invitations(
        &payer,
        &system,
        slots,
        &activation.minted,
        &activation.minted_seqs,
    )?;

    msg!(
        "Activated {} for {} (ancestor {}, member #{})",
        code,
        user,
        record.ancestor,
        record.activation_index
    );
    Ok(())
}
