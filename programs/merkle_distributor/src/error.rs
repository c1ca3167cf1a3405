use anchor_lang::prelude::*;

#[error_code]
pub enum DistributorError {
    // Merkle proof errors
    #[msg("Invalid proof")]
    InvalidProof,

    // Terms acceptance errors
    #[msg("Terms and conditions already accepted")]
    AlreadyAccepted,
    #[msg("Wrong hash for terms and conditions")]
    WrongTermsHash,
    #[msg("Terms and conditions must be accepted before claiming")]
    TermsNotAccepted,

    // Claim errors
    #[msg("Drop already claimed")]
    AlreadyClaimed,
    #[msg("Transfer amount exceeds pool balance")]
    InsufficientPool,

    // Access control errors
    #[msg("Caller is not the owner")]
    NotOwner,
    #[msg("Destination cannot be the default address")]
    ZeroAddress,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Token mint does not match distributor's token mint")]
    TokenMintMismatch,
}
