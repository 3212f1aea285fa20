use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, ISSUER_ROLE_SEED};
use crate::errors::AdminError;
use crate::events::IssuerRoleChanged;
use crate::state::{IssuerRole, NetworkConfig};

#[derive(Accounts)]
#[instruction(issuer: Pubkey)]
pub struct ManageIssuer<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ AdminError::Unauthorized,
    )]
    pub config: Account<'info, NetworkConfig>,

    #[account(
        init_if_needed,
        payer = admin,
        space = IssuerRole::SIZE,
        seeds = [ISSUER_ROLE_SEED, issuer.as_ref()],
        bump,
    )]
    pub issuer_role: Account<'info, IssuerRole>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(issuer: Pubkey)]
pub struct RevokeIssuer<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ AdminError::Unauthorized,
    )]
    pub config: Account<'info, NetworkConfig>,

    #[account(
        mut,
        seeds = [ISSUER_ROLE_SEED, issuer.as_ref()],
        bump = issuer_role.bump,
    )]
    pub issuer_role: Account<'info, IssuerRole>,
}

pub fn grant_issuer(ctx: Context<ManageIssuer>, issuer: Pubkey) -> Result<()> {
    require!(issuer != Pubkey::default(), AdminError::InvalidAuthority);
    let bump = ctx.bumps.issuer_role;
    let accounts = &mut *ctx.accounts;
    set_role(
        &mut accounts.config,
        &mut accounts.issuer_role,
        accounts.admin.key(),
        issuer,
        true,
    )?;
    accounts.issuer_role.bump = bump;

    msg!("Granted issuer role to {}", issuer);
    Ok(())
}

/// Only issuers granted before can be revoked
pub fn revoke_issuer(ctx: Context<RevokeIssuer>, issuer: Pubkey) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    set_role(
        &mut accounts.config,
        &mut accounts.issuer_role,
        accounts.admin.key(),
        issuer,
        false,
    )?;

    msg!("Revoked issuer role from {}", issuer);
    Ok(())
}

fn set_role(
    config: &mut NetworkConfig,
    role: &mut IssuerRole,
    admin: Pubkey,
    issuer: Pubkey,
    active: bool,
) -> Result<()> {
    let clock = Clock::get()?;
    role.issuer = issuer;
    role.granted_by = admin;
    role.active = active;
    role.updated_at = clock.unix_timestamp;

    emit!(IssuerRoleChanged {
        seq: config.next_event_seq(),
        issuer,
        active,
        changed_by: admin,
        timestamp: clock.unix_timestamp,
    });
    Ok(())
}
