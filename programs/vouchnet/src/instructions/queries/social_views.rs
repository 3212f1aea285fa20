use anchor_lang::prelude::*;

use super::load_page;
use crate::constants::{MAX_POST_PAGE, MENTIONS_SEED};
use crate::pda;
use crate::state::{EndorsementPost, MentionTally};
use crate::utils::load_optional;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PostView {
    pub id: u64,
    pub author: Pubkey,
    pub target: Pubkey,
    pub ancestor_of_author: Pubkey,
    pub content_ref: String,
    pub superlike_count: u32,
    pub mention_index: u32,
    pub created_at: i64,
}

impl From<EndorsementPost> for PostView {
    fn from(post: EndorsementPost) -> Self {
        PostView {
            id: post.id,
            author: post.author,
            target: post.target,
            ancestor_of_author: post.ancestor_of_author,
            content_ref: post.content_ref,
            superlike_count: post.superlike_count,
            mention_index: post.mention_index,
            created_at: post.created_at,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostSummary {
    pub id: u64,
    pub author: Pubkey,
    pub superlike_count: u32,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PostPage {
    /// Posts ever written about the target
    pub total: u32,
    pub start: u32,
    pub posts: Vec<PostSummary>,
}

#[derive(Accounts)]
pub struct PostLookup<'info> {
    /// CHECK: the post; an empty or foreign-owned address reads as `None`
    pub post: UncheckedAccount<'info>,
}

pub fn get_post(ctx: Context<PostLookup>) -> Result<Option<PostView>> {
    let post = load_optional::<EndorsementPost>(&ctx.accounts.post)?;
    Ok(post.map(PostView::from))
}

#[derive(Accounts)]
#[instruction(target: Pubkey)]
pub struct TargetLookup<'info> {
    /// CHECK: may be empty for targets nobody has written about
    #[account(seeds = [MENTIONS_SEED, target.as_ref()], bump)]
    pub mention_tally: UncheckedAccount<'info>,
}

/// Posts about `target`, positions `start..`, accounts in remaining accounts
pub fn get_posts_targeting<'info>(
    ctx: Context<'_, '_, 'info, 'info, TargetLookup<'info>>,
    target: Pubkey,
    start: u32,
) -> Result<PostPage> {
    let tally = load_optional::<MentionTally>(&ctx.accounts.mention_tally)?;
    let posts: Vec<EndorsementPost> = load_page(ctx.remaining_accounts, MAX_POST_PAGE, |i| {
        pda::post(&target, start + i as u32).0
    })?;

    Ok(PostPage {
        total: tally.map(|t| t.mentions).unwrap_or(0),
        start,
        posts: posts
            .into_iter()
            .map(|p| PostSummary {
                id: p.id,
                author: p.author,
                superlike_count: p.superlike_count,
            })
            .collect(),
    })
}
