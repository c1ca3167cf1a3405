use anchor_lang::prelude::*;

use crate::error::*;
use crate::state::BitmapPage;
use crate::utils::{terms_hash, verify_leaf, TokenPool};

/**
 * Main distributor state account
 *
 * Holds the immutable merkle root that commits to every (index, account,
 * amount) entry of the distribution, together with bookkeeping counters.
 * Per-index progress is kept in `BitmapPage` accounts, one bitmap for
 * terms acceptance and one for claims.
 *
 * Derivation: ["distributor", token_mint, owner, merkle_root]
 *
 * Per index: Unset -> TermsAccepted -> Claimed. No step is skipped and no
 * step is undone.
 */
#[account]
#[derive(Default, Debug)]
pub struct MerkleDistributor {
    /// Bump seed for PDA derivation
    /// - Saved to avoid recomputation when signing vault transfers
    pub bump: u8,

    /// Owner of the distributor
    /// - The only account allowed to call emergency_withdraw
    pub owner: Pubkey,

    /// Token mint address
    /// - Specifies which token is being distributed
    pub token_mint: Pubkey,

    /// Token vault account address
    /// - PDA that holds the tokens to be distributed
    /// - Derived from: ["vault", distributor_key]
    pub token_vault: Pubkey,

    /// Merkle root for claim verification
    /// - Set once at creation, never updated
    pub merkle_root: [u8; 32],

    /// Total amount of tokens claimed by all users
    pub total_claimed: u64,

    /// Number of leaves claimed so far
    pub num_claimed: u64,
}

impl MerkleDistributor {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<MerkleDistributor>();

    pub fn token(&self) -> Pubkey {
        self.token_mint
    }

    pub fn merkle_root(&self) -> [u8; 32] {
        self.merkle_root
    }

    pub fn is_owner(&self, caller: &Pubkey) -> bool {
        self.owner == *caller
    }

    /// Terms flag for `index`, read from the terms page that owns it.
    /// Progress lives in page accounts, not in the distributor.
    pub fn is_agreed_to_terms(page: &BitmapPage, index: u64) -> bool {
        page.is_set(index)
    }

    /// Claimed flag for `index`, read from the claimed page that owns it.
    pub fn is_claimed(page: &BitmapPage, index: u64) -> bool {
        page.is_set(index)
    }

    fn require_valid_proof(
        &self,
        index: u64,
        account: &Pubkey,
        amount: u64,
        proof: &[[u8; 32]],
    ) -> Result<()> {
        require!(
            verify_leaf(index, account, amount, proof, self.merkle_root),
            DistributorError::InvalidProof
        );
        Ok(())
    }

    /**
     * Records `claimant`'s consent to the terms for leaf `index`
     *
     * Validation order:
     * 1. Terms not yet accepted for this index
     * 2. Supplied hash equals terms_hash(claimant)
     * 3. (index, claimant, amount) is a leaf of the tree
     */
    pub fn accept_terms(
        &self,
        terms: &mut BitmapPage,
        claimant: &Pubkey,
        index: u64,
        amount: u64,
        supplied_terms_hash: [u8; 32],
        proof: &[[u8; 32]],
    ) -> Result<()> {
        require!(
            !Self::is_agreed_to_terms(terms, index),
            DistributorError::AlreadyAccepted
        );
        require!(
            supplied_terms_hash == terms_hash(claimant),
            DistributorError::WrongTermsHash
        );
        self.require_valid_proof(index, claimant, amount, proof)?;

        terms.set(index);
        Ok(())
    }

    /**
     * Pays out leaf `index` to `claimant`
     *
     * The claimed flag and counters are updated before the pool is asked to
     * transfer. On-chain these writes only reach account data when the
     * instruction exits, so the page still reads unclaimed during the CPI;
     * a second claim cannot slip in there because the runtime rejects any
     * call path that re-enters this program. If the transfer fails the
     * error is returned and the runtime discards every write made by the
     * instruction.
     */
    pub fn claim<P: TokenPool>(
        &mut self,
        terms: &BitmapPage,
        claimed: &mut BitmapPage,
        claimant: &Pubkey,
        index: u64,
        amount: u64,
        proof: &[[u8; 32]],
        pool: &mut P,
    ) -> Result<()> {
        // ===== VALIDATION PHASE =====
        require!(
            Self::is_agreed_to_terms(terms, index),
            DistributorError::TermsNotAccepted
        );
        require!(
            !Self::is_claimed(claimed, index),
            DistributorError::AlreadyClaimed
        );
        self.require_valid_proof(index, claimant, amount, proof)?;

        let total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(DistributorError::ArithmeticOverflow)?;
        let num_claimed = self
            .num_claimed
            .checked_add(1)
            .ok_or(DistributorError::ArithmeticOverflow)?;

        // ===== EFFECTS PHASE =====
        claimed.set(index);
        self.total_claimed = total_claimed;
        self.num_claimed = num_claimed;

        // ===== INTERACTIONS PHASE =====
        pool.transfer(amount)
    }

    /// Access check for emergency_withdraw: owner first, then destination.
    pub fn authorize_withdraw(&self, caller: &Pubkey, destination_owner: &Pubkey) -> Result<()> {
        require!(self.is_owner(caller), DistributorError::NotOwner);
        require!(
            *destination_owner != Pubkey::default(),
            DistributorError::ZeroAddress
        );
        Ok(())
    }
}
