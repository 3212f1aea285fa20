use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::errors::AdminError;
use crate::events::AdminTransferred;
use crate::state::NetworkConfig;

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ AdminError::Unauthorized,
    )]
    pub config: Account<'info, NetworkConfig>,
}

pub fn handler(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
    require!(new_admin != Pubkey::default(), AdminError::InvalidAuthority);

    let config = &mut ctx.accounts.config;
    let previous_admin = config.admin;
    config.admin = new_admin;

    emit!(AdminTransferred {
        seq: config.next_event_seq(),
        previous_admin,
        new_admin,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Transferred admin from {} to {}", previous_admin, new_admin);
    Ok(())
}
