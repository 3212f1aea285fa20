use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};

use crate::constants::{CONFIG_SEED, GOVERNANCE_MINT_SEED, TOKEN_DECIMALS, UTILITY_MINT_SEED};
use crate::events::NetworkInitialized;
use crate::state::NetworkConfig;

// =============================================================================
// INITIALIZE NETWORK
// =============================================================================
//
// Creates the config singleton and both reward mints. The config PDA is mint
// and freeze authority of each mint, so only this program can issue balances.
// =============================================================================

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Becomes the network admin
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = NetworkConfig::SIZE,
        seeds = [CONFIG_SEED],
        bump,
    )]
    pub config: Account<'info, NetworkConfig>,

    /// Withdrawable utility balance
    #[account(
        init,
        payer = admin,
        seeds = [UTILITY_MINT_SEED],
        bump,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = config,
        mint::freeze_authority = config,
    )]
    pub utility_mint: Account<'info, Mint>,

    /// Soulbound governance balance
    #[account(
        init,
        payer = admin,
        seeds = [GOVERNANCE_MINT_SEED],
        bump,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = config,
        mint::freeze_authority = config,
    )]
    pub governance_mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.config;

    config.admin = ctx.accounts.admin.key();
    config.utility_mint = ctx.accounts.utility_mint.key();
    config.governance_mint = ctx.accounts.governance_mint.key();
    config.invitation_count = 0;
    config.issuer_count = 0;
    config.activated_count = 0;
    config.post_count = 0;
    config.event_seq = 0;
    config.created_at = clock.unix_timestamp;
    config.bump = ctx.bumps.config;

    emit!(NetworkInitialized {
        seq: config.next_event_seq(),
        admin: config.admin,
        utility_mint: config.utility_mint,
        governance_mint: config.governance_mint,
        timestamp: clock.unix_timestamp,
    });

    msg!("Initialized network with admin {}", config.admin);
    Ok(())
}
