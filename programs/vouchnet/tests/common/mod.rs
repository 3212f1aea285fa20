#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use anchor_lang::prelude::*;
use vouchnet::state::*;

// In-memory network driving the program's own state transitions, the ones
// the handlers call. Every operation works on copies and only writes them
// back on success, the way a failed transaction leaves no trace. `events`
// collects the event numbers those transitions hand out, in emission order.

pub const DAY: i64 = 24 * 60 * 60;

pub struct Network {
    pub config: NetworkConfig,
    pub roles: HashMap<Pubkey, IssuerRole>,
    pub counterparts: HashMap<Pubkey, Counterpart>,
    pub invitations: HashMap<String, Invitation>,
    pub activations: HashMap<Pubkey, ActivationRecord>,
    pub members: HashMap<Pubkey, Member>,
    pub issued: Vec<Pubkey>,
    pub activated: Vec<Pubkey>,
    pub posts: Vec<EndorsementPost>,
    pub post_keys: Vec<Pubkey>,
    pub superlikes: HashSet<(u64, Pubkey)>,
    pub tallies: HashMap<Pubkey, MentionTally>,
    pub monthly: HashMap<(&'static [u8], Pubkey, u64), MonthlyCounter>,
    pub ledgers: HashMap<Pubkey, AccrualLedger>,
    pub events: Vec<u64>,
    pub now: i64,
}

impl Network {
    pub fn new() -> Self {
        Network {
            config: NetworkConfig {
                admin: Pubkey::new_unique(),
                utility_mint: Pubkey::new_unique(),
                governance_mint: Pubkey::new_unique(),
                invitation_count: 0,
                issuer_count: 0,
                activated_count: 0,
                post_count: 0,
                event_seq: 0,
                created_at: 0,
                bump: 255,
            },
            roles: HashMap::new(),
            counterparts: HashMap::new(),
            invitations: HashMap::new(),
            activations: HashMap::new(),
            members: HashMap::new(),
            issued: Vec::new(),
            activated: Vec::new(),
            posts: Vec::new(),
            post_keys: Vec::new(),
            superlikes: HashSet::new(),
            tallies: HashMap::new(),
            monthly: HashMap::new(),
            ledgers: HashMap::new(),
            events: Vec::new(),
            // Mid-month, so a few days of activity stay in one bucket
            now: 1_700_000_000 - 1_700_000_000 % (30 * DAY) + DAY,
        }
    }

    pub fn grant_issuer(&mut self, issuer: Pubkey) {
        self.roles.insert(
            issuer,
            IssuerRole {
                issuer,
                granted_by: self.config.admin,
                active: true,
                updated_at: self.now,
                bump: 255,
            },
        );
    }

    pub fn revoke_issuer(&mut self, issuer: Pubkey) {
        if let Some(role) = self.roles.get_mut(&issuer) {
            role.active = false;
        }
    }

    pub fn register(&mut self, seller: Pubkey) {
        self.counterparts.insert(
            seller,
            Counterpart {
                seller,
                metadata_ref: "bafy-seller".to_string(),
                active: true,
                registered_at: self.now,
                bump: 255,
            },
        );
    }

    /// Member account as `ensure_initialized` leaves it
    fn member(&self, user: Pubkey) -> Member {
        self.members.get(&user).cloned().unwrap_or(Member {
            user,
            nonce: 0,
            invitations_held: 0,
            bundle_count: 0,
            issued_index: None,
            bump: 255,
        })
    }

    fn counter(&self, kind: CounterKind, actor: Pubkey, bucket: u64) -> MonthlyCounter {
        self.monthly
            .get(&(kind.seed(), actor, bucket))
            .cloned()
            .unwrap_or_else(|| MonthlyCounter::new(actor, kind, bucket, 255))
    }

    fn tally(&self, target: Pubkey) -> MentionTally {
        self.tallies.get(&target).cloned().unwrap_or(MentionTally {
            target,
            mentions: 0,
            superlikes_received: 0,
            bump: 255,
        })
    }

    pub fn ledger(&self, account: Pubkey) -> AccrualLedger {
        self.ledgers
            .get(&account)
            .cloned()
            .unwrap_or_else(|| AccrualLedger::empty(account))
    }

    pub fn mint_batch(&mut self, issuer: Pubkey, codes: &[String]) -> Result<()> {
        let mut config = self.config.clone();
        let mut member = self.member(issuer);
        let known = &self.invitations;
        let batch = invite::mint_batch(
            &mut config,
            self.roles.get(&issuer),
            &mut member,
            codes,
            None,
            |c| Ok(known.contains_key(c)),
            self.now,
        )?;

        if let Some(index) = batch.issued_index {
            assert_eq!(index as usize, self.issued.len());
            self.issued.push(issuer);
        }
        self.members.insert(issuer, member);
        for (inv, seq) in batch.invitations.into_iter().zip(batch.minted_seqs) {
            self.events.push(seq);
            self.invitations.insert(inv.code.clone(), inv);
        }
        self.events.push(batch.batch_seq);
        self.config = config;
        Ok(())
    }

    pub fn validate(&self, code: &str) -> InvitationValidity {
        InvitationValidity::of(self.invitations.get(code), self.now)
    }

    pub fn activate(
        &mut self,
        operator: Pubkey,
        code: &str,
        user: Pubkey,
        new_codes: &[String],
    ) -> Result<()> {
        let mut config = self.config.clone();
        let mut member = self.member(user);
        let mut invitation = self.invitations.get(code).cloned();
        let known = &self.invitations;
        let request = ActivationRequest {
            user,
            operator,
            operator_role: self.roles.get(&operator),
            prior: self.activations.get(&user),
            new_codes,
            expiry: None,
            now: self.now,
        };
        let out = invite::activate(
            &mut config,
            request,
            invitation.as_mut(),
            &mut member,
            |c| Ok(known.contains_key(c)),
        )?;

        if let Some(inv) = invitation {
            self.invitations.insert(inv.code.clone(), inv);
        }
        self.members.insert(user, member);
        assert_eq!(out.record.activation_index as usize, self.activated.len());
        self.activations.insert(user, out.record);
        self.activated.push(user);
        self.events.push(out.activated_seq);
        for (inv, seq) in out.minted.into_iter().zip(out.minted_seqs) {
            self.events.push(seq);
            self.invitations.insert(inv.code.clone(), inv);
        }
        self.config = config;
        Ok(())
    }

    pub fn held_by(&self, holder: Pubkey) -> Vec<&Invitation> {
        self.invitations
            .values()
            .filter(|i| i.holder == holder)
            .collect()
    }

    pub fn create_post(&mut self, author: Pubkey, target: Pubkey) -> Result<u64> {
        let bucket = month_bucket(self.now);
        self.create_post_with(author, target, "bafy-post", bucket)
    }

    pub fn create_post_with(
        &mut self,
        author: Pubkey,
        target: Pubkey,
        content_ref: &str,
        bucket: u64,
    ) -> Result<u64> {
        let mut config = self.config.clone();
        let mut tally = self.tally(target);
        let mut target_month = self.counter(CounterKind::Mentions, target, bucket);
        let mut author_month = self.counter(CounterKind::Posts, author, bucket);

        let published = social::create_post(
            &mut config,
            PostInputs {
                author,
                target,
                author_activation: self.activations.get(&author),
                counterpart: self.counterparts.get(&target),
                content_ref,
                bucket,
                now: self.now,
                bump: 255,
            },
            &mut tally,
            &mut target_month,
            &mut author_month,
        )?;

        let id = published.post.id;
        assert_eq!(id as usize, self.posts.len());
        self.posts.push(published.post);
        self.post_keys.push(Pubkey::new_unique());
        self.tallies.insert(target, tally);
        self.monthly
            .insert((CounterKind::Mentions.seed(), target, bucket), target_month);
        self.monthly
            .insert((CounterKind::Posts.seed(), author, bucket), author_month);
        self.events.push(published.seq);
        self.config = config;
        Ok(id)
    }

    pub fn nonce(&self, user: Pubkey) -> u64 {
        self.members.get(&user).map(|m| m.nonce).unwrap_or(0)
    }

    /// What a well-behaved client would submit for `post_id`
    pub fn superlike_args(&self, post_id: u64, liker: Pubkey) -> SuperlikeArgs {
        let (author, target) = self
            .posts
            .get(post_id as usize)
            .map(|p| (p.author, p.target))
            .unwrap_or_default();
        SuperlikeArgs {
            expected_nonce: self.nonce(liker),
            bucket: month_bucket(self.now),
            author,
            target,
        }
    }

    /// Superlike with the liker's current nonce
    pub fn superlike(&mut self, post_id: u64, liker: Pubkey) -> Result<()> {
        let args = self.superlike_args(post_id, liker);
        self.superlike_raw(post_id, liker, args)
    }

    pub fn superlike_with_nonce(
        &mut self,
        post_id: u64,
        liker: Pubkey,
        expected_nonce: u64,
    ) -> Result<()> {
        let args = SuperlikeArgs {
            expected_nonce,
            ..self.superlike_args(post_id, liker)
        };
        self.superlike_raw(post_id, liker, args)
    }

    /// Superlike with caller-chosen arguments. Records hanging off the target
    /// are looked up under `args.target`, as the accounts passed would be.
    pub fn superlike_raw(
        &mut self,
        post_id: u64,
        liker: Pubkey,
        args: SuperlikeArgs,
    ) -> Result<()> {
        let SuperlikeArgs {
            expected_nonce,
            bucket,
            author,
            target,
        } = args;
        let mut config = self.config.clone();
        let mut member = self.member(liker);
        let mut post = self.posts.get(post_id as usize).cloned();
        let post_key = self
            .post_keys
            .get(post_id as usize)
            .copied()
            .unwrap_or_default();
        let mut month = self.counter(CounterKind::Superlikes, liker, bucket);
        let mut tally = self.tally(target);
        let mut ledger = self.ledger(target);

        let accepted = social::superlike(
            &mut config,
            SuperlikeInputs {
                liker,
                expected_nonce,
                bucket,
                post_key,
                author,
                target,
                already_superliked: self.superlikes.contains(&(post_id, liker)),
                author_activation: self.activations.get(&author),
                liker_activation: self.activations.get(&liker),
                counterpart: self.counterparts.get(&target),
                now: self.now,
                bump: 255,
            },
            SuperlikeState {
                liker_member: &mut member,
                post: post.as_mut(),
                liker_month: &mut month,
                tally: &mut tally,
                accrual: &mut ledger,
            },
        )?;
        assert_eq!(accepted.record.liker, liker);

        if let Some(post) = post {
            self.posts[post_id as usize] = post;
        }
        self.members.insert(liker, member);
        self.superlikes.insert((post_id, liker));
        self.monthly
            .insert((CounterKind::Superlikes.seed(), liker, bucket), month);
        self.tallies.insert(target, tally);
        self.ledgers.insert(target, ledger);
        self.events
            .extend([accepted.recorded_seq, accepted.accrued_seq]);
        self.config = config;
        Ok(())
    }

    pub fn claim_utility(&mut self, account: Pubkey) -> Result<u64> {
        let mut config = self.config.clone();
        let mut ledger = self.ledger(account);
        let claim = ledger.claim_utility(&mut config)?;
        self.ledgers.insert(account, ledger);
        self.events.push(claim.seq);
        self.config = config;
        Ok(claim.amount)
    }

    pub fn claim_governance(&mut self, account: Pubkey) -> Result<u64> {
        let mut config = self.config.clone();
        let mut ledger = self.ledger(account);
        let mentions = self.tallies.get(&account).map(|t| t.mentions).unwrap_or(0);
        let claim = ledger.claim_governance(&mut config, mentions)?;
        self.ledgers.insert(account, ledger);
        self.events.push(claim.seq);
        self.config = config;
        Ok(claim.amount)
    }
}

/// Instruction arguments and passed accounts of a superlike
#[derive(Clone, Copy, Debug)]
pub struct SuperlikeArgs {
    pub expected_nonce: u64,
    pub bucket: u64,
    pub author: Pubkey,
    pub target: Pubkey,
}

pub fn codes(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix}{i}")).collect()
}

pub fn error_code(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        anchor_lang::error::Error::ProgramError(e) => panic!("unexpected program error {e:?}"),
    }
}

pub fn assert_err<T: Debug, E>(result: Result<T>, expected: E)
where
    E: Into<anchor_lang::error::Error> + Debug + Copy,
{
    match result {
        Ok(v) => panic!("expected {expected:?}, got Ok({v:?})"),
        Err(e) => assert_eq!(error_code(e), error_code(expected.into()), "expected {expected:?}"),
    }
}
