use anchor_lang::prelude::*;

use super::load_page;
use crate::constants::{ACTIVATION_SEED, CONFIG_SEED, MAX_PAGE, MEMBER_SEED};
use crate::errors::AdminError;
use crate::pda;
use crate::instructions::invite_graph::load_invitation;
use crate::state::{
    ActivationRecord, IndexEntry, InvitationBundle, InvitationValidity, Member, NetworkConfig,
    ValidationReport,
};
use crate::utils::load_optional;

/// A page of an append-only index, plus the index length
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct IndexPage {
    pub total: u64,
    pub start: u64,
    pub members: Vec<Pubkey>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct HeldInvitations {
    /// Bundles ever written for the holder
    pub bundle_count: u32,
    /// Codes of the requested bundles, in bundle order
    pub codes: Vec<String>,
}

#[derive(Accounts)]
pub struct ValidateInvitation<'info> {
    /// CHECK: address of `code`, verified by `load_invitation`. An empty slot,
    /// or a code no invitation can have, reads as `NotFound`
    pub invitation: UncheckedAccount<'info>,
}

pub fn validate_invitation(
    ctx: Context<ValidateInvitation>,
    code: String,
) -> Result<ValidationReport> {
    let invitation = load_invitation(&ctx.accounts.invitation, &code)?;
    let now = Clock::get()?.unix_timestamp;
    Ok(InvitationValidity::of(invitation.as_ref(), now).into())
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct UserLookup<'info> {
    /// CHECK: may be empty for users that never activated
    #[account(seeds = [ACTIVATION_SEED, user.as_ref()], bump)]
    pub activation: UncheckedAccount<'info>,

    /// CHECK: may be empty for users the program has never seen
    #[account(seeds = [MEMBER_SEED, user.as_ref()], bump)]
    pub member: UncheckedAccount<'info>,
}

pub fn get_ancestor(ctx: Context<UserLookup>, _user: Pubkey) -> Result<Option<Pubkey>> {
    let record = load_optional::<ActivationRecord>(&ctx.accounts.activation)?;
    Ok(record.map(|r| r.ancestor))
}

pub fn is_activated(ctx: Context<UserLookup>, _user: Pubkey) -> Result<bool> {
    let record = load_optional::<ActivationRecord>(&ctx.accounts.activation)?;
    Ok(record.is_some())
}

/// Current superlike nonce; what `superlike` expects as `expected_nonce`
pub fn get_nonce(ctx: Context<UserLookup>, _user: Pubkey) -> Result<u64> {
    let member = load_optional::<Member>(&ctx.accounts.member)?;
    Ok(member.map(|m| m.nonce).unwrap_or(0))
}

/// Codes held by `holder`, read from bundles `start..` passed as remaining
/// accounts. Pair with `validate_invitation` for per-code status.
pub fn get_holder_invitations<'info>(
    ctx: Context<'_, '_, 'info, 'info, UserLookup<'info>>,
    holder: Pubkey,
    start: u32,
) -> Result<HeldInvitations> {
    let member = load_optional::<Member>(&ctx.accounts.member)?;
    let bundles: Vec<InvitationBundle> = load_page(ctx.remaining_accounts, MAX_PAGE, |i| {
        pda::bundle(&holder, start + i as u32).0
    })?;

    let codes: Vec<String> = bundles.into_iter().flat_map(|b| b.codes).collect();
    require!(codes.len() <= MAX_PAGE, AdminError::PageTooLarge);

    Ok(HeldInvitations {
        bundle_count: member.map(|m| m.bundle_count).unwrap_or(0),
        codes,
    })
}

#[derive(Accounts)]
pub struct IndexLookup<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, NetworkConfig>,
}

pub fn get_activated_users<'info>(
    ctx: Context<'_, '_, 'info, 'info, IndexLookup<'info>>,
    start: u64,
) -> Result<IndexPage> {
    let entries: Vec<IndexEntry> = load_page(ctx.remaining_accounts, MAX_PAGE, |i| {
        pda::activated_entry(start + i as u64).0
    })?;
    Ok(IndexPage {
        total: ctx.accounts.config.activated_count,
        start,
        members: entries.into_iter().map(|e| e.member).collect(),
    })
}

pub fn get_issuers<'info>(
    ctx: Context<'_, '_, 'info, 'info, IndexLookup<'info>>,
    start: u64,
) -> Result<IndexPage> {
    let entries: Vec<IndexEntry> = load_page(ctx.remaining_accounts, MAX_PAGE, |i| {
        pda::issued_entry(start + i as u64).0
    })?;
    Ok(IndexPage {
        total: ctx.accounts.config.issuer_count,
        start,
        members: entries.into_iter().map(|e| e.member).collect(),
    })
}
