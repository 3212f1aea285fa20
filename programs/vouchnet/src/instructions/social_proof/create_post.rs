use anchor_lang::prelude::*;

use crate::constants::{
    ACTIVATION_SEED, CONFIG_SEED, COUNTERPART_SEED, MENTIONS_SEED, MONTHLY_SEED, POST_SEED,
};
use crate::events::PostCreated;
use crate::state::{
    social, ActivationRecord, CounterKind, Counterpart, EndorsementPost, MentionTally,
    MonthlyCounter, NetworkConfig, PostInputs,
};
use crate::utils::load_optional;

#[derive(Accounts)]
#[instruction(target: Pubkey, content_ref: String, bucket: u64)]
pub struct CreatePost<'info> {
    #[account(mut)]
    pub author: Signer<'info>,

    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, NetworkConfig>,

    /// CHECK: author's activation record; absent means `AuthorNotInvited`
    #[account(seeds = [ACTIVATION_SEED, author.key().as_ref()], bump)]
    pub author_activation: UncheckedAccount<'info>,

    /// CHECK: counterpart registry entry of `target`; may be absent
    #[account(seeds = [COUNTERPART_SEED, target.as_ref()], bump)]
    pub counterpart: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = author,
        space = MentionTally::SIZE,
        seeds = [MENTIONS_SEED, target.as_ref()],
        bump,
    )]
    pub mention_tally: Account<'info, MentionTally>,

    /// Mentions of `target` this month
    #[account(
        init_if_needed,
        payer = author,
        space = MonthlyCounter::SIZE,
        seeds = [MONTHLY_SEED, CounterKind::Mentions.seed(), target.as_ref(), bucket.to_le_bytes().as_ref()],
        bump,
    )]
    pub target_month: Account<'info, MonthlyCounter>,

    /// Posts by `author` this month
    #[account(
        init_if_needed,
        payer = author,
        space = MonthlyCounter::SIZE,
        seeds = [MONTHLY_SEED, CounterKind::Posts.seed(), author.key().as_ref(), bucket.to_le_bytes().as_ref()],
        bump,
    )]
    pub author_month: Account<'info, MonthlyCounter>,

    /// Indexed under the target by its mention position
    #[account(
        init,
        payer = author,
        space = EndorsementPost::SIZE,
        seeds = [POST_SEED, target.as_ref(), mention_tally.mentions.to_le_bytes().as_ref()],
        bump,
    )]
    pub post: Account<'info, EndorsementPost>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreatePost>,
    target: Pubkey,
    content_ref: String,
    bucket: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let author = ctx.accounts.author.key();
    let activation = load_optional::<ActivationRecord>(&ctx.accounts.author_activation)?;
    let counterpart = load_optional::<Counterpart>(&ctx.accounts.counterpart)?;

    let accounts = &mut *ctx.accounts;
    accounts
        .mention_tally
        .ensure_initialized(target, ctx.bumps.mention_tally);
    accounts.target_month.ensure_initialized(
        target,
        CounterKind::Mentions,
        bucket,
        ctx.bumps.target_month,
    );
    accounts.author_month.ensure_initialized(
        author,
        CounterKind::Posts,
        bucket,
        ctx.bumps.author_month,
    );

    let published = social::create_post(
        &mut accounts.config,
        PostInputs {
            author,
            target,
            author_activation: activation.as_ref(),
            counterpart: counterpart.as_ref(),
            content_ref: &content_ref,
            bucket,
            now: clock.unix_timestamp,
            bump: ctx.bumps.post,
        },
        &mut accounts.mention_tally,
        &mut accounts.target_month,
        &mut accounts.author_month,
    )?;
    accounts.post.set_inner(published.post);

    let post = &accounts.post;
    emit!(PostCreated {
        seq: published.seq,
        post: post.key(),
        id: post.id,
        author,
        target,
        ancestor_of_author: post.ancestor_of_author,
        content_ref: post.content_ref.clone(),
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Post #{} by {} about {} ({}/{} this month)",
        post.id,
        author,
        target,
        accounts.author_month.count,
        CounterKind::Posts.limit()
    );
    Ok(())
}
