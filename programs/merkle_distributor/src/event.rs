use anchor_lang::prelude::*;

/// Event emitted when a new distributor is created
#[event]
pub struct DistributorCreated {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Owner of the distributor
    pub owner: Pubkey,
    /// Token mint address
    pub token_mint: Pubkey,
    /// Token vault address
    pub token_vault: Pubkey,
    /// The merkle root committed at creation
    pub merkle_root: [u8; 32],
    /// Amount deposited into the vault at creation
    pub initial_total_amount: u64,
}

/// Event emitted when a claimant consents to the terms for their leaf
#[event]
pub struct TermsAccepted {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Leaf index the terms were accepted for
    pub index: u64,
    /// Account that accepted the terms
    pub account: Pubkey,
}

/// Event emitted when a leaf is claimed
#[event]
pub struct Claimed {
    /// Leaf index that was claimed
    pub index: u64,
    /// Account that received the tokens
    pub account: Pubkey,
    /// Amount transferred
    pub amount: u64,
}

/// Event emitted when the owner moves tokens out of the distributor
#[event]
pub struct EmergencyWithdrawn {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Token mint that was withdrawn
    pub token_mint: Pubkey,
    /// Token account that received the tokens
    pub destination: Pubkey,
    /// Amount withdrawn
    pub amount: u64,
}
