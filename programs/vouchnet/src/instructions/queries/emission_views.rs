use anchor_lang::prelude::*;

use crate::constants::{ACCRUAL_SEED, MENTIONS_SEED};
use crate::state::{AccrualLedger, AccrualSnapshot, MentionTally, ReputationProgress};
use crate::utils::load_optional;

#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct AccountLookup<'info> {
    /// CHECK: may be empty before the first accrual
    #[account(seeds = [ACCRUAL_SEED, account.as_ref()], bump)]
    pub accrual: UncheckedAccount<'info>,

    /// CHECK: may be empty before the first mention
    #[account(seeds = [MENTIONS_SEED, account.as_ref()], bump)]
    pub mention_tally: UncheckedAccount<'info>,
}

pub fn get_accrual(ctx: Context<AccountLookup>, _account: Pubkey) -> Result<AccrualSnapshot> {
    let ledger = load_optional::<AccrualLedger>(&ctx.accounts.accrual)?;
    Ok(AccrualLedger::snapshot(ledger.as_ref()))
}

pub fn get_reputation_progress(
    ctx: Context<AccountLookup>,
    _account: Pubkey,
) -> Result<ReputationProgress> {
    let ledger = load_optional::<AccrualLedger>(&ctx.accounts.accrual)?;
    let mentions = load_optional::<MentionTally>(&ctx.accounts.mention_tally)?
        .map(|t| t.mentions)
        .unwrap_or(0);
    Ok(ReputationProgress::new(
        mentions,
        ledger.map(|l| l.governance_claimed).unwrap_or(false),
    ))
}
