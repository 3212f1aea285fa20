use anchor_lang::prelude::*;

use crate::constants::{
    ACCRUAL_SEED, ACTIVATION_SEED, CONFIG_SEED, COUNTERPART_SEED, MEMBER_SEED, MENTIONS_SEED,
    MONTHLY_SEED, SUPERLIKE_SEED,
};
use crate::events::{EmissionAccrued, SuperlikeRecorded};
use crate::state::{
    social, AccrualLedger, ActivationRecord, CounterKind, Counterpart, EndorsementPost, Member,
    MentionTally, MonthlyCounter, NetworkConfig, Superlike, SuperlikeInputs, SuperlikeState,
};
use crate::utils::{create_program_account, is_allocated, load_optional, write_account};

// =============================================================================
// SUPERLIKE
// =============================================================================
//
// A same-circle vouch for a post. `author` and `target` are only passed so the
// program can derive the records that hang off them; both must match the
// post. On success the post's target accrues emissions in the same
// transaction.
// =============================================================================

#[derive(Accounts)]
#[instruction(expected_nonce: u64, bucket: u64)]
pub struct SuperlikePost<'info> {
    #[account(mut)]
    pub liker: Signer<'info>,

    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, NetworkConfig>,

    /// CHECK: the post; an empty address means `PostNotFound`
    #[account(mut)]
    pub post: UncheckedAccount<'info>,

    /// CHECK: must equal `post.author` (`AccountMismatch`)
    pub author: UncheckedAccount<'info>,

    /// CHECK: must equal `post.target` (`AccountMismatch`)
    pub target: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = liker,
        space = Member::SIZE,
        seeds = [MEMBER_SEED, liker.key().as_ref()],
        bump,
    )]
    pub liker_member: Account<'info, Member>,

    /// CHECK: (post, liker) marker; must still be empty
    #[account(
        mut,
        seeds = [SUPERLIKE_SEED, post.key().as_ref(), liker.key().as_ref()],
        bump,
    )]
    pub superlike_record: UncheckedAccount<'info>,

    /// CHECK: activation record of the post author; may be absent
    #[account(seeds = [ACTIVATION_SEED, author.key().as_ref()], bump)]
    pub author_activation: UncheckedAccount<'info>,

    /// CHECK: activation record of the liker; may be absent
    #[account(seeds = [ACTIVATION_SEED, liker.key().as_ref()], bump)]
    pub liker_activation: UncheckedAccount<'info>,

    /// CHECK: counterpart registry entry of the target; may be absent
    #[account(seeds = [COUNTERPART_SEED, target.key().as_ref()], bump)]
    pub counterpart: UncheckedAccount<'info>,

    /// Superlikes given by the liker this month
    #[account(
        init_if_needed,
        payer = liker,
        space = MonthlyCounter::SIZE,
        seeds = [MONTHLY_SEED, CounterKind::Superlikes.seed(), liker.key().as_ref(), bucket.to_le_bytes().as_ref()],
        bump,
    )]
    pub liker_month: Account<'info, MonthlyCounter>,

    #[account(
        init_if_needed,
        payer = liker,
        space = MentionTally::SIZE,
        seeds = [MENTIONS_SEED, target.key().as_ref()],
        bump,
    )]
    pub mention_tally: Account<'info, MentionTally>,

    #[account(
        init_if_needed,
        payer = liker,
        space = AccrualLedger::SIZE,
        seeds = [ACCRUAL_SEED, target.key().as_ref()],
        bump,
    )]
    pub accrual: Account<'info, AccrualLedger>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<SuperlikePost>, expected_nonce: u64, bucket: u64) -> Result<()> {
    let clock = Clock::get()?;
    let liker = ctx.accounts.liker.key();
    let post_key = ctx.accounts.post.key();
    let target = ctx.accounts.target.key();

    let mut post = load_optional::<EndorsementPost>(&ctx.accounts.post)?;
    let author_activation = load_optional::<ActivationRecord>(&ctx.accounts.author_activation)?;
    let liker_activation = load_optional::<ActivationRecord>(&ctx.accounts.liker_activation)?;
    let counterpart = load_optional::<Counterpart>(&ctx.accounts.counterpart)?;

    let accounts = &mut *ctx.accounts;
    accounts
        .liker_member
        .ensure_initialized(liker, ctx.bumps.liker_member);
    accounts.liker_month.ensure_initialized(
        liker,
        CounterKind::Superlikes,
        bucket,
        ctx.bumps.liker_month,
    );
    accounts
        .mention_tally
        .ensure_initialized(target, ctx.bumps.mention_tally);
    accounts
        .accrual
        .ensure_initialized(target, ctx.bumps.accrual);

    let accepted = social::superlike(
        &mut accounts.config,
        SuperlikeInputs {
            liker,
            expected_nonce,
            bucket,
            post_key,
            author: accounts.author.key(),
            target,
            already_superliked: is_allocated(&accounts.superlike_record),
            author_activation: author_activation.as_ref(),
            liker_activation: liker_activation.as_ref(),
            counterpart: counterpart.as_ref(),
            now: clock.unix_timestamp,
            bump: ctx.bumps.superlike_record,
        },
        SuperlikeState {
            liker_member: &mut accounts.liker_member,
            post: post.as_mut(),
            liker_month: &mut accounts.liker_month,
            tally: &mut accounts.mention_tally,
            accrual: &mut accounts.accrual,
        },
    )?;

    if let Some(post) = post.as_ref() {
        write_account(&accounts.post.to_account_info(), post)?;
    }

    let record = &accepted.record;
    let record_info = accounts.superlike_record.to_account_info();
    create_program_account(
        &accounts.liker.to_account_info(),
        &record_info,
        &accounts.system_program.to_account_info(),
        &[
            SUPERLIKE_SEED,
            post_key.as_ref(),
            liker.as_ref(),
            &[ctx.bumps.superlike_record],
        ],
        Superlike::SIZE,
    )?;
    write_account(&record_info, record)?;

    emit!(SuperlikeRecorded {
        seq: accepted.recorded_seq,
        post: post_key,
        liker,
        target,
        superlike_count: accepted.superlike_count,
        nonce: record.nonce,
        timestamp: clock.unix_timestamp,
    });

    emit!(EmissionAccrued {
        seq: accepted.accrued_seq,
        account: target,
        post: post_key,
        amount: accepted.amount,
        utility_pending: accounts.accrual.utility_pending,
        governance_pending: accounts.accrual.governance_pending,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Superlike by {} ({}/{} this month), {} accrued to {}",
        liker,
        accounts.liker_month.count,
        CounterKind::Superlikes.limit(),
        accepted.amount,
        target
    );
    Ok(())
}
