use anchor_lang::prelude::*;

use crate::constants::{
    MAX_CONTENT_REF_LEN, MONTHLY_MENTION_LIMIT, MONTHLY_POST_LIMIT, MONTHLY_SUPERLIKE_LIMIT,
    MONTH_SECONDS,
};
use crate::errors::SocialError;
use crate::state::{AccrualLedger, ActivationRecord, Counterpart, Member, NetworkConfig};

// =============================================================================
// SOCIAL PROOF LEDGER
// =============================================================================
//
// Endorsement posts about sellers and same-circle superlikes on them.
//
// Per post and liker:  NotYetLiked(by X) --superlike--> LikedBy(X)
//
// A superlike is only accepted from a member whose ancestor equals the post
// author's ancestor. Volume is bounded per month for authors, targets and
// likers. Monthly counters are keyed by bucket; a new month is a new key, so
// nothing ever resets them. Old buckets are never pruned.
// =============================================================================

/// 30-day period index for `timestamp`
pub fn month_bucket(timestamp: i64) -> u64 {
    (timestamp.max(0) / MONTH_SECONDS) as u64
}

pub fn check_content_ref(content_ref: &str) -> Result<()> {
    require!(
        !content_ref.is_empty() && content_ref.len() <= MAX_CONTENT_REF_LEN,
        SocialError::InvalidContentRef
    );
    Ok(())
}

/// Which monthly quota a counter tracks
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterKind {
    /// Posts written by an author
    Posts,
    /// Mentions received by a target
    Mentions,
    /// Superlikes given by a liker
    Superlikes,
}

impl CounterKind {
    pub fn seed(self) -> &'static [u8] {
        match self {
            CounterKind::Posts => b"posts",
            CounterKind::Mentions => b"mentions",
            CounterKind::Superlikes => b"superlikes",
        }
    }

    pub fn limit(self) -> u16 {
        match self {
            CounterKind::Posts => MONTHLY_POST_LIMIT,
            CounterKind::Mentions => MONTHLY_MENTION_LIMIT,
            CounterKind::Superlikes => MONTHLY_SUPERLIKE_LIMIT,
        }
    }
}

#[account]
pub struct MonthlyCounter {
    pub actor: Pubkey,
    pub kind: CounterKind,
    pub bucket: u64,
    pub count: u16,
    pub bump: u8,
}

impl MonthlyCounter {
    pub const SIZE: usize = 8 + 32 + 1 + 8 + 2 + 1;

    pub fn new(actor: Pubkey, kind: CounterKind, bucket: u64, bump: u8) -> Self {
        MonthlyCounter {
            actor,
            kind,
            bucket,
            count: 0,
            bump,
        }
    }

    /// Fill in identity fields of an account created by `init_if_needed`
    pub fn ensure_initialized(&mut self, actor: Pubkey, kind: CounterKind, bucket: u64, bump: u8) {
        if self.actor == Pubkey::default() {
            *self = MonthlyCounter::new(actor, kind, bucket, bump);
        }
    }

    pub fn has_room(&self) -> bool {
        self.count < self.kind.limit()
    }

    pub fn record(&mut self) {
        self.count += 1;
    }
}

/// Lifetime endorsement stats of a counterpart; the reputation input
#[account]
pub struct MentionTally {
    pub target: Pubkey,
    /// Posts ever written about the target; also the next post index
    pub mentions: u32,
    /// Superlikes ever accepted on posts about the target
    pub superlikes_received: u32,
    pub bump: u8,
}

impl MentionTally {
    pub const SIZE: usize = 8 + 32 + 4 + 4 + 1;

    pub fn ensure_initialized(&mut self, target: Pubkey, bump: u8) {
        if self.target == Pubkey::default() {
            self.target = target;
            self.bump = bump;
        }
    }
}

#[account]
pub struct EndorsementPost {
    /// Global sequence id
    pub id: u64,
    pub author: Pubkey,
    /// The counterpart being endorsed
    pub target: Pubkey,
    /// Author's ancestor at creation time
    pub ancestor_of_author: Pubkey,
    /// Opaque pointer to the post body in the content store
    pub content_ref: String,
    /// Only ever increases
    pub superlike_count: u32,
    /// Position among posts about `target` (part of the PDA seeds)
    pub mention_index: u32,
    pub created_at: i64,
    pub bump: u8,
}

impl EndorsementPost {
    pub const SIZE: usize = 8 +  // discriminator
        8 +                      // id
        32 +                     // author
        32 +                     // target
        32 +                     // ancestor_of_author
        4 + MAX_CONTENT_REF_LEN + // content_ref
        4 +                      // superlike_count
        4 +                      // mention_index
        8 +                      // created_at
        1;                       // bump
}

/// Write-once marker for a (post, liker) pair
#[account]
pub struct Superlike {
    pub post: Pubkey,
    pub liker: Pubkey,
    /// Liker nonce consumed by this superlike
    pub nonce: u64,
    pub created_at: i64,
    pub bump: u8,
}

impl Superlike {
    pub const SIZE: usize = 8 + 32 + 32 + 8 + 8 + 1;
}

/// Registry and quota snapshots a new post is checked against
pub struct PostInputs<'a> {
    pub author: Pubkey,
    pub target: Pubkey,
    pub author_activation: Option<&'a ActivationRecord>,
    pub counterpart: Option<&'a Counterpart>,
    pub content_ref: &'a str,
    /// Month the caller derived the counter accounts from
    pub bucket: u64,
    pub now: i64,
    pub bump: u8,
}

/// A new post and the `seq` of its `PostCreated`
pub struct PublishedPost {
    pub post: EndorsementPost,
    pub seq: u64,
}

/// Check and apply `createPost`. Counters are only touched once every
/// precondition has passed.
pub fn create_post(
    config: &mut NetworkConfig,
    input: PostInputs<'_>,
    tally: &mut MentionTally,
    target_month: &mut MonthlyCounter,
    author_month: &mut MonthlyCounter,
) -> Result<PublishedPost> {
    require_eq!(
        input.bucket,
        month_bucket(input.now),
        SocialError::StaleMonthBucket
    );
    let author_activation = input
        .author_activation
        .ok_or(SocialError::AuthorNotInvited)?;
    require_keys_neq!(input.author, input.target, SocialError::CannotTargetSelf);
    require!(
        Counterpart::is_recognized(input.counterpart, &input.target),
        SocialError::TargetNotRegistered
    );
    require!(
        target_month.has_room(),
        SocialError::TargetMentionLimitReached
    );
    require!(
        author_month.has_room(),
        SocialError::MonthlyPostLimitReached
    );
    check_content_ref(input.content_ref)?;

    let post = EndorsementPost {
        id: config.next_post_id(),
        author: input.author,
        target: input.target,
        ancestor_of_author: author_activation.ancestor,
        content_ref: input.content_ref.to_string(),
        superlike_count: 0,
        mention_index: tally.mentions,
        created_at: input.now,
        bump: input.bump,
    };

    tally.mentions += 1;
    target_month.record();
    author_month.record();

    Ok(PublishedPost {
        post,
        seq: config.next_event_seq(),
    })
}

/// Everything a superlike is checked against
pub struct SuperlikeInputs<'a> {
    pub liker: Pubkey,
    pub expected_nonce: u64,
    /// Month the caller derived the liker's counter from
    pub bucket: u64,
    /// Address of the post account
    pub post_key: Pubkey,
    /// Author and target accounts the caller passed; must match the post
    pub author: Pubkey,
    pub target: Pubkey,
    /// Whether a superlike for (post, liker) already exists
    pub already_superliked: bool,
    pub author_activation: Option<&'a ActivationRecord>,
    pub liker_activation: Option<&'a ActivationRecord>,
    pub counterpart: Option<&'a Counterpart>,
    pub now: i64,
    pub bump: u8,
}

/// Accounts a superlike writes
pub struct SuperlikeState<'a> {
    pub liker_member: &'a mut Member,
    pub post: Option<&'a mut EndorsementPost>,
    pub liker_month: &'a mut MonthlyCounter,
    /// Lifetime stats of the post's target
    pub tally: &'a mut MentionTally,
    /// Accrual ledger of the post's target
    pub accrual: &'a mut AccrualLedger,
}

/// What an accepted superlike produced
pub struct AcceptedSuperlike {
    pub record: Superlike,
    pub superlike_count: u32,
    /// Credited to each pending balance of the target
    pub amount: u64,
    /// `seq` of `SuperlikeRecorded`
    pub recorded_seq: u64,
    /// `seq` of `EmissionAccrued`, right after
    pub accrued_seq: u64,
}

/// Check and apply `superlike`, in the documented order:
/// `StaleNonce`, `PostNotFound`, `CannotLikeOwnPost`, `AlreadySuperliked`,
/// `NotInSameCircle`, `TargetNotRegistered`, `MonthlySuperlikeLimitExhausted`.
/// A stale month bucket is rejected up front, and author/target accounts
/// that do not belong to the post are rejected as soon as the post is known.
///
/// On success the nonce, the post and the counters are updated and the
/// target's accrual ledger is credited.
pub fn superlike(
    config: &mut NetworkConfig,
    input: SuperlikeInputs<'_>,
    state: SuperlikeState<'_>,
) -> Result<AcceptedSuperlike> {
    require_eq!(
        input.bucket,
        month_bucket(input.now),
        SocialError::StaleMonthBucket
    );
    state.liker_member.check_nonce(input.expected_nonce)?;
    let post = state.post.ok_or(SocialError::PostNotFound)?;
    require_keys_eq!(post.author, input.author, SocialError::AccountMismatch);
    require_keys_eq!(post.target, input.target, SocialError::AccountMismatch);
    require_keys_neq!(post.author, input.liker, SocialError::CannotLikeOwnPost);
    require!(!input.already_superliked, SocialError::AlreadySuperliked);
    require!(
        ActivationRecord::same_circle(input.author_activation, input.liker_activation),
        SocialError::NotInSameCircle
    );
    require!(
        Counterpart::is_recognized(input.counterpart, &post.target),
        SocialError::TargetNotRegistered
    );
    require!(
        state.liker_month.has_room(),
        SocialError::MonthlySuperlikeLimitExhausted
    );

    let amount = state.accrual.on_superlike_validated()?;
    let nonce = state.liker_member.nonce;
    state.liker_member.advance_nonce();
    post.superlike_count += 1;
    state.liker_month.record();
    state.tally.superlikes_received += 1;

    let record = Superlike {
        post: input.post_key,
        liker: input.liker,
        nonce,
        created_at: input.now,
        bump: input.bump,
    };
    Ok(AcceptedSuperlike {
        record,
        superlike_count: post.superlike_count,
        amount,
        recorded_seq: config.next_event_seq(),
        accrued_seq: config.next_event_seq(),
    })
}
