use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

use crate::constants::{ACCRUAL_SEED, CONFIG_SEED};
use crate::events::UtilityClaimed;
use crate::state::{AccrualLedger, NetworkConfig};
use crate::utils::{load_optional, write_account};

#[derive(Accounts)]
pub struct ClaimUtility<'info> {
    /// Balance holder
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = utility_mint,
    )]
    pub config: Account<'info, NetworkConfig>,

    /// CHECK: accrual ledger of `holder`; absent means nothing accrued yet
    #[account(mut, seeds = [ACCRUAL_SEED, holder.key().as_ref()], bump)]
    pub accrual: UncheckedAccount<'info>,

    #[account(mut)]
    pub utility_mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = holder,
        associated_token::mint = utility_mint,
        associated_token::authority = holder,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ClaimUtility>) -> Result<()> {
    let clock = Clock::get()?;
    let account = ctx.accounts.holder.key();

    let mut ledger = load_optional::<AccrualLedger>(&ctx.accounts.accrual)?
        .unwrap_or_else(|| AccrualLedger::empty(account));

    // Balance is zeroed and persisted before any tokens move
    let claim = ledger.claim_utility(&mut ctx.accounts.config)?;
    write_account(&ctx.accounts.accrual.to_account_info(), &ledger)?;

    let bump = ctx.accounts.config.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.utility_mint.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            signer_seeds,
        ),
        claim.amount,
    )?;

    emit!(UtilityClaimed {
        seq: claim.seq,
        account,
        amount: claim.amount,
        timestamp: clock.unix_timestamp,
    });

    msg!("Claimed {} utility for {}", claim.amount, account);
    Ok(())
}
