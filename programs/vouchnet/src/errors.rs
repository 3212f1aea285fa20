use anchor_lang::prelude::*;

// Each component owns a disjoint code range so clients can tell them apart.

#[error_code(offset = 6000)]
pub enum InviteError {
    #[msg("Invitation not found")]
    NotFound,

    #[msg("Invitation has already been used")]
    AlreadyUsed,

    #[msg("Invitation has expired")]
    Expired,

    #[msg("User has already activated an invitation")]
    UserAlreadyActivated,

    #[msg("Duplicate code in batch")]
    DuplicateInBatch,

    #[msg("Invitation code already exists")]
    CodeAlreadyExists,

    #[msg("Wrong number of codes in batch")]
    WrongBatchSize,

    #[msg("Unauthorized: caller does not hold an active issuer role")]
    Unauthorized,

    #[msg("Invalid code: must be 1-16 bytes")]
    InvalidCode,

    #[msg("Invitation account does not match its code")]
    InvitationAccountMismatch,
}

#[error_code(offset = 6100)]
pub enum SocialError {
    #[msg("Author has not activated an invitation")]
    AuthorNotInvited,

    #[msg("Cannot target yourself")]
    CannotTargetSelf,

    #[msg("Target has reached its monthly mention limit")]
    TargetMentionLimitReached,

    #[msg("Author has reached the monthly post limit")]
    MonthlyPostLimitReached,

    #[msg("Post not found")]
    PostNotFound,

    #[msg("Cannot superlike your own post")]
    CannotLikeOwnPost,

    #[msg("Post already superliked by this member")]
    AlreadySuperliked,

    #[msg("Liker and author were not invited by the same issuer")]
    NotInSameCircle,

    #[msg("Target is not a registered counterpart")]
    TargetNotRegistered,

    #[msg("Monthly superlike limit exhausted")]
    MonthlySuperlikeLimitExhausted,

    #[msg("Stale nonce: re-read the current nonce and resubmit")]
    StaleNonce,

    #[msg("Month bucket does not match the current period")]
    StaleMonthBucket,

    #[msg("Invalid content reference: must be 1-64 bytes")]
    InvalidContentRef,

    #[msg("Account does not match the post")]
    AccountMismatch,
}

#[error_code(offset = 6200)]
pub enum EmissionError {
    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Governance balance already claimed")]
    AlreadyClaimed,

    #[msg("Insufficient reputation to claim the governance balance")]
    InsufficientReputation,

    #[msg("Nothing to mint")]
    NothingToMint,

    #[msg("Arithmetic overflow")]
    MathOverflow,
}

#[error_code(offset = 6300)]
pub enum AdminError {
    #[msg("Unauthorized: caller is not the network admin")]
    Unauthorized,

    #[msg("Invalid authority: cannot set zero address")]
    InvalidAuthority,

    #[msg("Invalid metadata reference: must be at most 64 bytes")]
    InvalidMetadataRef,

    #[msg("Requested page is too large")]
    PageTooLarge,

    #[msg("Index account does not match its position")]
    IndexAccountMismatch,
}
