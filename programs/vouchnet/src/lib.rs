use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod utils;

use instructions::*;
use state::{AccrualSnapshot, ReputationProgress, ValidationReport};

declare_id!("D7fREQYv3enwPrDGX1sAEJf8wEAzhkFP9ew5dzep8NoG");

#[program]
pub mod vouchnet {
    use super::*;

    // === Administration ===

    /// Create the network config and both reward mints
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::admin::initialize::handler(ctx)
    }

    /// Hand the admin key to someone else
    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::transfer_admin::handler(ctx, new_admin)
    }

    /// Allow `issuer` to mint and activate invitations
    pub fn grant_issuer(ctx: Context<ManageIssuer>, issuer: Pubkey) -> Result<()> {
        instructions::admin::manage_issuer::grant_issuer(ctx, issuer)
    }

    pub fn revoke_issuer(ctx: Context<RevokeIssuer>, issuer: Pubkey) -> Result<()> {
        instructions::admin::manage_issuer::revoke_issuer(ctx, issuer)
    }

    /// Recognize `seller` as a counterpart posts may target
    pub fn register_counterpart(
        ctx: Context<ManageCounterpart>,
        seller: Pubkey,
        metadata_ref: String,
    ) -> Result<()> {
        instructions::admin::manage_counterpart::register_counterpart(ctx, seller, metadata_ref)
    }

    /// Stop recognizing a registered `seller`
    pub fn deregister_counterpart(
        ctx: Context<DeregisterCounterpart>,
        seller: Pubkey,
    ) -> Result<()> {
        instructions::admin::manage_counterpart::deregister_counterpart(ctx, seller)
    }

    // === Invite Graph ===

    /// Mint invitations held by the signing issuer.
    /// Remaining accounts: one invitation address per code.
    pub fn mint_batch<'info>(
        ctx: Context<'_, '_, 'info, 'info, MintBatch<'info>>,
        codes: Vec<String>,
        expiry: Option<i64>,
    ) -> Result<()> {
        instructions::invite_graph::mint_batch::handler(ctx, codes, expiry)
    }

    /// Consume `code` for `user` and hand them 12 invitations of their own.
    /// Remaining accounts: one invitation address per new code.
    pub fn activate<'info>(
        ctx: Context<'_, '_, 'info, 'info, Activate<'info>>,
        code: String,
        user: Pubkey,
        new_codes: Vec<String>,
        expiry: Option<i64>,
    ) -> Result<()> {
        instructions::invite_graph::activate::handler(ctx, code, user, new_codes, expiry)
    }

    // === Social Proof ===

    /// Publish an endorsement of `target`
    pub fn create_post(
        ctx: Context<CreatePost>,
        target: Pubkey,
        content_ref: String,
        bucket: u64,
    ) -> Result<()> {
        instructions::social_proof::create_post::handler(ctx, target, content_ref, bucket)
    }

    /// Vouch for a post written by someone from the same circle
    pub fn superlike(ctx: Context<SuperlikePost>, expected_nonce: u64, bucket: u64) -> Result<()> {
        instructions::social_proof::superlike::handler(ctx, expected_nonce, bucket)
    }

    // === Emission ===

    /// Withdraw the whole pending utility balance
    pub fn claim_utility(ctx: Context<ClaimUtility>) -> Result<()> {
        instructions::emission::claim_utility::handler(ctx)
    }

    /// One-time governance unlock
    pub fn claim_governance(ctx: Context<ClaimGovernance>) -> Result<()> {
        instructions::emission::claim_governance::handler(ctx)
    }

    // === Views ===

    pub fn validate_invitation(
        ctx: Context<ValidateInvitation>,
        code: String,
    ) -> Result<ValidationReport> {
        instructions::queries::invite_views::validate_invitation(ctx, code)
    }

    pub fn get_holder_invitations<'info>(
        ctx: Context<'_, '_, 'info, 'info, UserLookup<'info>>,
        holder: Pubkey,
        start: u32,
    ) -> Result<HeldInvitations> {
        instructions::queries::invite_views::get_holder_invitations(ctx, holder, start)
    }

    pub fn get_ancestor(ctx: Context<UserLookup>, user: Pubkey) -> Result<Option<Pubkey>> {
        instructions::queries::invite_views::get_ancestor(ctx, user)
    }

    pub fn is_activated(ctx: Context<UserLookup>, user: Pubkey) -> Result<bool> {
        instructions::queries::invite_views::is_activated(ctx, user)
    }

    pub fn get_nonce(ctx: Context<UserLookup>, user: Pubkey) -> Result<u64> {
        instructions::queries::invite_views::get_nonce(ctx, user)
    }

    pub fn get_activated_users<'info>(
        ctx: Context<'_, '_, 'info, 'info, IndexLookup<'info>>,
        start: u64,
    ) -> Result<IndexPage> {
        instructions::queries::invite_views::get_activated_users(ctx, start)
    }

    pub fn get_issuers<'info>(
        ctx: Context<'_, '_, 'info, 'info, IndexLookup<'info>>,
        start: u64,
    ) -> Result<IndexPage> {
        instructions::queries::invite_views::get_issuers(ctx, start)
    }

    pub fn get_posts_targeting<'info>(
        ctx: Context<'_, '_, 'info, 'info, TargetLookup<'info>>,
        target: Pubkey,
        start: u32,
    ) -> Result<PostPage> {
        instructions::queries::social_views::get_posts_targeting(ctx, target, start)
    }

    pub fn get_post(ctx: Context<PostLookup>) -> Result<Option<PostView>> {
        instructions::queries::social_views::get_post(ctx)
    }

    pub fn get_accrual(ctx: Context<AccountLookup>, account: Pubkey) -> Result<AccrualSnapshot> {
        instructions::queries::emission_views::get_accrual(ctx, account)
    }

    pub fn get_reputation_progress(
        ctx: Context<AccountLookup>,
        account: Pubkey,
    ) -> Result<ReputationProgress> {
        instructions::queries::emission_views::get_reputation_progress(ctx, account)
    }
}
