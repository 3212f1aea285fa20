use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, COUNTERPART_SEED, MAX_CONTENT_REF_LEN};
use crate::errors::AdminError;
use crate::events::CounterpartChanged;
use crate::state::{Counterpart, NetworkConfig};

// =============================================================================
// COUNTERPART REGISTRY
// =============================================================================
//
// Sellers that posts may target and that accrue emissions. Deregistration
// keeps the account (and its metadata pointer) but stops recognition, which
// blocks new posts and superlikes about the seller. Balances already accrued
// stay claimable. Only registered sellers can be deregistered.
// =============================================================================

#[derive(Accounts)]
#[instruction(seller: Pubkey)]
pub struct ManageCounterpart<'info> {
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
        space = Counterpart::SIZE,
        seeds = [COUNTERPART_SEED, seller.as_ref()],
        bump,
    )]
    pub counterpart: Account<'info, Counterpart>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(seller: Pubkey)]
pub struct DeregisterCounterpart<'info> {
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
        seeds = [COUNTERPART_SEED, seller.as_ref()],
        bump = counterpart.bump,
    )]
    pub counterpart: Account<'info, Counterpart>,
}

pub fn register_counterpart(
    ctx: Context<ManageCounterpart>,
    seller: Pubkey,
    metadata_ref: String,
) -> Result<()> {
    require!(seller != Pubkey::default(), AdminError::InvalidAuthority);
    require!(
        metadata_ref.len() <= MAX_CONTENT_REF_LEN,
        AdminError::InvalidMetadataRef
    );

    let clock = Clock::get()?;
    let counterpart = &mut ctx.accounts.counterpart;
    if counterpart.seller == Pubkey::default() {
        counterpart.registered_at = clock.unix_timestamp;
    }
    counterpart.seller = seller;
    counterpart.metadata_ref = metadata_ref;
    counterpart.active = true;
    counterpart.bump = ctx.bumps.counterpart;

    emit!(CounterpartChanged {
        seq: ctx.accounts.config.next_event_seq(),
        seller,
        active: true,
        metadata_ref: counterpart.metadata_ref.clone(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Registered counterpart {}", seller);
    Ok(())
}

pub fn deregister_counterpart(ctx: Context<DeregisterCounterpart>, seller: Pubkey) -> Result<()> {
    let clock = Clock::get()?;
    let counterpart = &mut ctx.accounts.counterpart;
    counterpart.active = false;

    emit!(CounterpartChanged {
        seq: ctx.accounts.config.next_event_seq(),
        seller,
        active: false,
        metadata_ref: counterpart.metadata_ref.clone(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Deregistered counterpart {}", seller);
    Ok(())
}
