use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

use crate::constants::{ACCRUAL_SEED, CONFIG_SEED, MENTIONS_SEED};
use crate::events::GovernanceClaimed;
use crate::state::{AccrualLedger, MentionTally, NetworkConfig};
use crate::utils::{load_optional, write_account};

// =============================================================================
// CLAIM GOVERNANCE
// =============================================================================
//
// One-time unlock of the governance balance once the account has been
// mentioned in enough posts. The destination token account is frozen right
// after minting, so the governance balance can never be transferred.
// =============================================================================

#[derive(Accounts)]
pub struct ClaimGovernance<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = governance_mint,
    )]
    pub config: Account<'info, NetworkConfig>,

    /// CHECK: accrual ledger of `holder`; may be absent
    #[account(mut, seeds = [ACCRUAL_SEED, holder.key().as_ref()], bump)]
    pub accrual: UncheckedAccount<'info>,

    /// CHECK: lifetime mention tally of `holder`; may be absent
    #[account(seeds = [MENTIONS_SEED, holder.key().as_ref()], bump)]
    pub mention_tally: UncheckedAccount<'info>,

    #[account(mut)]
    pub governance_mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = holder,
        associated_token::mint = governance_mint,
        associated_token::authority = holder,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ClaimGovernance>) -> Result<()> {
    let clock = Clock::get()?;
    let account = ctx.accounts.holder.key();

    let mut ledger = load_optional::<AccrualLedger>(&ctx.accounts.accrual)?
        .unwrap_or_else(|| AccrualLedger::empty(account));
    let mentions = load_optional::<MentionTally>(&ctx.accounts.mention_tally)?
        .map(|tally| tally.mentions)
        .unwrap_or(0);

    let claim = ledger.claim_governance(&mut ctx.accounts.config, mentions)?;
    write_account(&ctx.accounts.accrual.to_account_info(), &ledger)?;

    let bump = ctx.accounts.config.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.governance_mint.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            signer_seeds,
        ),
        claim.amount,
    )?;

    token::freeze_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        token::FreezeAccount {
            account: ctx.accounts.destination.to_account_info(),
            mint: ctx.accounts.governance_mint.to_account_info(),
            authority: ctx.accounts.config.to_account_info(),
        },
        signer_seeds,
    ))?;
    msg!("Governance token account frozen for {}", account);

    emit!(GovernanceClaimed {
        seq: claim.seq,
        account,
        amount: claim.amount,
        mentions,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Unlocked {} governance for {} at {} mentions",
        claim.amount,
        account,
        mentions
    );
    Ok(())
}
