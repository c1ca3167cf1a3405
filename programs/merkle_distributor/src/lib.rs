use anchor_lang::prelude::*;

declare_id!("6cBnrJ3ZmJbeH8W4mRyuYmhzEhPKbBjwuFxGLMWhRRwa");

pub mod constants;
pub mod error;
pub mod event;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

use instructions::*;

/**
 * Merkle Distributor Program
 *
 * Distributes a fixed pool of tokens to a pre-committed list of
 * (index, account, amount) entries. The list is committed to by a merkle
 * root that is fixed when the distributor is created.
 *
 * Key Features:
 * - Merkle proof verification of (index, account, amount) leaves
 * - One-time terms acceptance per leaf, bound to the claimant's key
 * - Double-claim protection with paged, set-once bitmaps
 * - Owner-only emergency withdrawal of any token held by the distributor
 * - Cross-program call event emission for composability
 * - Support for both SPL Token and Token 2022
 *
 * Architecture:
 * - Distributor PDA: Stores the root, owner and counters
 * - Token Vault PDA: Holds tokens to be distributed
 * - Bitmap page PDAs: 256 flags each, one series for terms, one for claims
 *
 * Workflow:
 * 1. Off-chain tooling compiles the balance map into a root and proofs
 * 2. Owner creates the distributor with the root and funds the vault
 * 3. Each claimant accepts the terms for their leaf
 * 4. Each claimant claims their leaf exactly once
 */
#[program]
pub mod merkle_distributor {
    use super::*;

    /**
     * Creates a new merkle distributor
     *
     * @param ctx - Account context containing distributor, vault and owner accounts
     * @param merkle_root - 32-byte root of the distribution tree, immutable afterwards
     * @param initial_total_amount - Tokens deposited into the vault now (may be zero)
     *
     * Access Control: Anyone; the signer becomes the owner
     */
    pub fn create_distributor(
        ctx: Context<CreateDistributor>,
        merkle_root: [u8; 32],
        initial_total_amount: u64,
    ) -> Result<()> {
        handle_create_distributor(ctx, merkle_root, initial_total_amount)
    }

    /**
     * Accepts the terms and conditions for a leaf
     *
     * @param ctx - Account context containing distributor and terms bitmap page
     * @param index - Leaf index
     * @param amount - Leaf amount
     * @param terms_hash - Hash of the terms bound to the signer
     * @param proof - Merkle proof of (index, signer, amount)
     *
     * Access Control: The account committed to in the leaf
     */
    pub fn accept_terms(
        ctx: Context<AcceptTerms>,
        index: u64,
        amount: u64,
        terms_hash: [u8; 32],
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        handle_accept_terms(ctx, index, amount, terms_hash, proof)
    }

    /**
     * Claims tokens for a leaf whose terms were accepted
     *
     * @param ctx - Account context containing distributor, bitmap pages and token accounts
     * @param index - Leaf index
     * @param amount - Leaf amount, transferred in full
     * @param proof - Merkle proof of (index, signer, amount)
     *
     * Access Control: The account committed to in the leaf
     */
    pub fn claim(
        ctx: Context<Claim>,
        index: u64,
        amount: u64,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        handle_claim(ctx, index, amount, proof)
    }

    /**
     * Moves tokens held by the distributor to a destination
     *
     * @param ctx - Account context containing source, destination and mint
     * @param amount - Amount to move
     *
     * Access Control: Owner only
     * Note: Bypasses the claim bitmaps entirely
     */
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
        handle_emergency_withdraw(ctx, amount)
    }
}
