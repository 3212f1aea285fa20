use anchor_lang::prelude::*;

use crate::constants::{EMISSION_RATE, GOVERNANCE_REPUTATION_THRESHOLD};
use crate::errors::EmissionError;
use crate::state::NetworkConfig;

// =============================================================================
// EMISSION ACCOUNTANT
// =============================================================================
//
// Every accepted superlike credits EMISSION_RATE to both pending balances of
// the post's target.
//
//   utility:     pending -> claim_utility -> 0 (repeatable)
//   governance:  Accruing --claim_governance [mentions >= 8]--> Claimed
//
// Claimed is terminal: governance credited afterwards stays pending forever
// and can never be claimed.
// =============================================================================

#[account]
pub struct AccrualLedger {
    /// Owner of the balances (a counterpart)
    pub account: Pubkey,
    /// Withdrawable utility balance
    pub utility_pending: u64,
    /// Governance balance waiting for the reputation unlock
    pub governance_pending: u64,
    /// One-shot flag; never flips back
    pub governance_claimed: bool,
    /// Lifetime utility minted out
    pub utility_withdrawn: u64,
    /// Governance amount minted at unlock
    pub governance_activated: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl AccrualLedger {
    pub const SIZE: usize = 8 + 32 + 8 + 8 + 1 + 8 + 8 + 1;

    /// Ledger of an account nothing has accrued to yet
    pub fn empty(account: Pubkey) -> Self {
        AccrualLedger {
            account,
            utility_pending: 0,
            governance_pending: 0,
            governance_claimed: false,
            utility_withdrawn: 0,
            governance_activated: 0,
            bump: 0,
        }
    }

    /// Fill in identity fields of an account created by `init_if_needed`
    pub fn ensure_initialized(&mut self, account: Pubkey, bump: u8) {
        if self.account == Pubkey::default() {
            self.account = account;
            self.bump = bump;
        }
    }

    /// Credit one validated superlike
    pub fn on_superlike_validated(&mut self) -> Result<u64> {
        self.utility_pending = self
            .utility_pending
            .checked_add(EMISSION_RATE)
            .ok_or(EmissionError::MathOverflow)?;
        self.governance_pending = self
            .governance_pending
            .checked_add(EMISSION_RATE)
            .ok_or(EmissionError::MathOverflow)?;
        Ok(EMISSION_RATE)
    }

    /// Zero the utility balance and return what should be paid out
    pub fn take_utility(&mut self) -> Result<u64> {
        require!(self.utility_pending > 0, EmissionError::NothingToClaim);
        let amount = self.utility_pending;
        self.utility_pending = 0;
        self.utility_withdrawn = self
            .utility_withdrawn
            .checked_add(amount)
            .ok_or(EmissionError::MathOverflow)?;
        Ok(amount)
    }

    /// One-time governance unlock gated on lifetime mentions
    pub fn unlock_governance(&mut self, mentions: u32) -> Result<u64> {
        require!(!self.governance_claimed, EmissionError::AlreadyClaimed);
        require!(
            mentions >= GOVERNANCE_REPUTATION_THRESHOLD,
            EmissionError::InsufficientReputation
        );
        require!(self.governance_pending > 0, EmissionError::NothingToMint);

        let amount = self.governance_pending;
        self.governance_pending = 0;
        self.governance_claimed = true;
        self.governance_activated = amount;
        Ok(amount)
    }

    /// `claim_utility`: drain the balance and number the `UtilityClaimed`
    pub fn claim_utility(&mut self, config: &mut NetworkConfig) -> Result<Claim> {
        let amount = self.take_utility()?;
        Ok(Claim {
            amount,
            seq: config.next_event_seq(),
        })
    }

    /// `claim_governance`: unlock once and number the `GovernanceClaimed`
    pub fn claim_governance(&mut self, config: &mut NetworkConfig, mentions: u32) -> Result<Claim> {
        let amount = self.unlock_governance(mentions)?;
        Ok(Claim {
            amount,
            seq: config.next_event_seq(),
        })
    }

    pub fn snapshot(ledger: Option<&AccrualLedger>) -> AccrualSnapshot {
        match ledger {
            Some(l) => AccrualSnapshot {
                utility_pending: l.utility_pending,
                governance_pending: l.governance_pending,
                governance_claimed: l.governance_claimed,
                utility_withdrawn: l.utility_withdrawn,
                governance_activated: l.governance_activated,
            },
            None => AccrualSnapshot::default(),
        }
    }
}

/// Amount to mint out, and the `seq` of the event announcing it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claim {
    pub amount: u64,
    pub seq: u64,
}

/// Read-only view of an account's balances
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccrualSnapshot {
    pub utility_pending: u64,
    pub governance_pending: u64,
    pub governance_claimed: bool,
    pub utility_withdrawn: u64,
    pub governance_activated: u64,
}

/// How close an account is to the governance unlock
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReputationProgress {
    pub mentions: u32,
    pub threshold: u32,
    pub eligible: bool,
    pub governance_claimed: bool,
}

impl ReputationProgress {
    pub fn new(mentions: u32, governance_claimed: bool) -> Self {
        ReputationProgress {
            mentions,
            threshold: GOVERNANCE_REPUTATION_THRESHOLD,
            eligible: mentions >= GOVERNANCE_REPUTATION_THRESHOLD && !governance_claimed,
            governance_claimed,
        }
    }
}
