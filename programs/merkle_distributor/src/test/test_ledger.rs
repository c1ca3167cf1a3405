use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::error::DistributorError;
use crate::state::{BitmapPage, MerkleDistributor};
use crate::utils::pda::page_index;
use crate::utils::TokenPool;

/// In-memory token pool standing in for the vault CPI.
#[derive(Clone, Debug, Default)]
pub struct MockPool {
    pub balance: u64,
    pub paid: Vec<u64>,
}

impl TokenPool for MockPool {
    fn transfer(&mut self, amount: u64) -> Result<()> {
        require!(self.balance >= amount, DistributorError::InsufficientPool);
        self.balance -= amount;
        self.paid.push(amount);
        Ok(())
    }
}

/// Drives the distributor state transitions the way the runtime does: each
/// call works on copies of the touched accounts and only commits them when
/// the call succeeds.
pub struct Ledger {
    pub distributor: MerkleDistributor,
    pub terms: BTreeMap<u64, BitmapPage>,
    pub claimed: BTreeMap<u64, BitmapPage>,
    pub pool: MockPool,
    pub events: Vec<(u64, Pubkey, u64)>,
}

impl Ledger {
    pub fn new(owner: Pubkey, merkle_root: [u8; 32], balance: u64) -> Self {
        Ledger {
            distributor: MerkleDistributor {
                owner,
                token_mint: Pubkey::new_from_array([0xAA; 32]),
                merkle_root,
                ..Default::default()
            },
            terms: BTreeMap::new(),
            claimed: BTreeMap::new(),
            pool: MockPool {
                balance,
                paid: Vec::new(),
            },
            events: Vec::new(),
        }
    }

    fn page(pages: &BTreeMap<u64, BitmapPage>, index: u64) -> BitmapPage {
        pages.get(&page_index(index)).cloned().unwrap_or_default()
    }

    pub fn accept_terms(
        &mut self,
        caller: &Pubkey,
        index: u64,
        amount: u64,
        terms_hash: [u8; 32],
        proof: &[[u8; 32]],
    ) -> Result<()> {
        let mut terms = Self::page(&self.terms, index);
        self.distributor
            .accept_terms(&mut terms, caller, index, amount, terms_hash, proof)?;
        self.terms.insert(page_index(index), terms);
        Ok(())
    }

    pub fn claim(
        &mut self,
        caller: &Pubkey,
        index: u64,
        amount: u64,
        proof: &[[u8; 32]],
    ) -> Result<()> {
        let mut distributor = self.distributor.clone();
        let terms = Self::page(&self.terms, index);
        let mut claimed = Self::page(&self.claimed, index);
        let mut pool = self.pool.clone();

        distributor.claim(&terms, &mut claimed, caller, index, amount, proof, &mut pool)?;

        self.distributor = distributor;
        self.claimed.insert(page_index(index), claimed);
        self.pool = pool;
        self.events.push((index, *caller, amount));
        Ok(())
    }

    pub fn is_agreed_to_terms(&self, index: u64) -> bool {
        MerkleDistributor::is_agreed_to_terms(&Self::page(&self.terms, index), index)
    }

    pub fn is_claimed(&self, index: u64) -> bool {
        MerkleDistributor::is_claimed(&Self::page(&self.claimed, index), index)
    }
}

pub fn error_code(err: &anchor_lang::error::Error) -> Option<u32> {
    match err {
        anchor_lang::error::Error::AnchorError(e) => Some(e.error_code_number),
        anchor_lang::error::Error::ProgramError(_) => None,
    }
}

pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: DistributorError) {
    let err = result.expect_err("operation should fail");
    assert_eq!(
        error_code(&err),
        Some(u32::from(expected)),
        "expected {:?}, got {:?}",
        expected,
        err
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::test_merkle::{nodes, wallet, SimpleMerkleTree, TreeNode};
    use crate::utils::terms_hash;

    const OWNER: u8 = 0xEE;

    fn two_account_ledger() -> (Ledger, Vec<TreeNode>, SimpleMerkleTree) {
        let tree_nodes = nodes(&[100, 101]);
        let tree = SimpleMerkleTree::new(&tree_nodes);
        let ledger = Ledger::new(wallet(OWNER), tree.root(), 201);
        (ledger, tree_nodes, tree)
    }

    #[test]
    fn test_accessors() {
        let (ledger, _, tree) = two_account_ledger();
        assert_eq!(ledger.distributor.merkle_root(), tree.root());
        assert_eq!(ledger.distributor.token(), Pubkey::new_from_array([0xAA; 32]));
        assert!(ledger.distributor.is_owner(&wallet(OWNER)));
        assert!(!ledger.distributor.is_owner(&wallet(1)));
    }

    #[test]
    fn test_accept_terms_sets_flag() {
        let (mut ledger, tree_nodes, tree) = two_account_ledger();
        let a = tree_nodes[0].claimant;

        assert!(!ledger.is_agreed_to_terms(0));
        assert!(!ledger.is_agreed_to_terms(1));
        ledger
            .accept_terms(&a, 0, 100, terms_hash(&a), &tree.proof(0))
            .unwrap();
        assert!(ledger.is_agreed_to_terms(0));
        assert!(!ledger.is_agreed_to_terms(1));
        assert!(ledger.pool.paid.is_empty(), "accepting terms moves no tokens");
    }

    #[test]
    fn test_accept_terms_failures() {
        let (mut ledger, tree_nodes, tree) = two_account_ledger();
        let a = tree_nodes[0].claimant;
        let b = tree_nodes[1].claimant;
        let proof0 = tree.proof(0);

        // Empty proof, wrong index, wrong amount
        assert_error(
            ledger.accept_terms(&a, 0, 100, terms_hash(&a), &[]),
            DistributorError::InvalidProof,
        );
        assert_error(
            ledger.accept_terms(&a, 1, 100, terms_hash(&a), &proof0),
            DistributorError::InvalidProof,
        );
        assert_error(
            ledger.accept_terms(&a, 0, 200, terms_hash(&a), &proof0),
            DistributorError::InvalidProof,
        );

        // Hash for another account, even with a valid proof
        assert_error(
            ledger.accept_terms(&a, 0, 100, terms_hash(&b), &proof0),
            DistributorError::WrongTermsHash,
        );
        assert!(!ledger.is_agreed_to_terms(0));

        ledger
            .accept_terms(&a, 0, 100, terms_hash(&a), &proof0)
            .unwrap();
        assert_error(
            ledger.accept_terms(&a, 0, 100, terms_hash(&a), &proof0),
            DistributorError::AlreadyAccepted,
        );
    }

    #[test]
    fn test_claim_requires_terms() {
        let (mut ledger, tree_nodes, tree) = two_account_ledger();
        let a = tree_nodes[0].claimant;

        assert_error(
            ledger.claim(&a, 0, 100, &tree.proof(0)),
            DistributorError::TermsNotAccepted,
        );

        // Regardless of proof validity
        let mut empty = Ledger::new(wallet(OWNER), [0u8; 32], 0);
        assert_error(empty.claim(&a, 0, 10, &[]), DistributorError::TermsNotAccepted);
    }

    #[test]
    fn test_successful_claims_emit_events() {
        let (mut ledger, tree_nodes, tree) = two_account_ledger();
        let a = tree_nodes[0].claimant;
        let b = tree_nodes[1].claimant;
        let proof0 = tree.proof(0);
        let proof1 = tree.proof(1);

        ledger.accept_terms(&a, 0, 100, terms_hash(&a), &proof0).unwrap();
        ledger.claim(&a, 0, 100, &proof0).unwrap();
        assert_eq!(ledger.events, vec![(0, a, 100)]);

        ledger.accept_terms(&b, 1, 101, terms_hash(&b), &proof1).unwrap();
        ledger.claim(&b, 1, 101, &proof1).unwrap();
        assert_eq!(ledger.events, vec![(0, a, 100), (1, b, 101)]);

        assert_eq!(ledger.pool.paid, vec![100, 101]);
        assert_eq!(ledger.pool.balance, 0);
        assert_eq!(ledger.distributor.total_claimed, 201);
        assert_eq!(ledger.distributor.num_claimed, 2);
    }

    #[test]
    fn test_sets_is_claimed() {
        let (mut ledger, tree_nodes, tree) = two_account_ledger();
        let a = tree_nodes[0].claimant;
        let proof0 = tree.proof(0);

        ledger.accept_terms(&a, 0, 100, terms_hash(&a), &proof0).unwrap();
        assert!(!ledger.is_claimed(0));
        assert!(!ledger.is_claimed(1));
        ledger.claim(&a, 0, 100, &proof0).unwrap();
        assert!(ledger.is_claimed(0));
        assert!(!ledger.is_claimed(1));
    }

    #[test]
    fn test_cannot_claim_twice() {
        let (mut ledger, tree_nodes, tree) = two_account_ledger();
        let a = tree_nodes[0].claimant;
        let b = tree_nodes[1].claimant;
        let proof0 = tree.proof(0);
        let proof1 = tree.proof(1);

        ledger.accept_terms(&a, 0, 100, terms_hash(&a), &proof0).unwrap();
        ledger.accept_terms(&b, 1, 101, terms_hash(&b), &proof1).unwrap();

        ledger.claim(&b, 1, 101, &proof1).unwrap();
        ledger.claim(&a, 0, 100, &proof0).unwrap();

        assert_error(ledger.claim(&a, 0, 100, &proof0), DistributorError::AlreadyClaimed);
        assert_error(ledger.claim(&b, 1, 101, &proof1), DistributorError::AlreadyClaimed);
        assert_eq!(ledger.pool.paid, vec![101, 100]);
    }

    #[test]
    fn test_claim_binds_index_account_and_amount() {
        let (mut ledger, tree_nodes, tree) = two_account_ledger();
        let a = tree_nodes[0].claimant;
        let b = tree_nodes[1].claimant;
        let proof0 = tree.proof(0);
        let proof1 = tree.proof(1);

        ledger.accept_terms(&a, 0, 100, terms_hash(&a), &proof0).unwrap();
        ledger.accept_terms(&b, 1, 101, terms_hash(&b), &proof1).unwrap();

        // Empty proof
        assert_error(ledger.claim(&a, 0, 100, &[]), DistributorError::InvalidProof);
        // Another account's index
        assert_error(ledger.claim(&a, 1, 101, &proof0), DistributorError::InvalidProof);
        // Another account's proof under the caller's identity
        assert_error(ledger.claim(&b, 1, 101, &proof0), DistributorError::InvalidProof);
        assert_error(ledger.claim(&b, 0, 100, &proof0), DistributorError::InvalidProof);
        // More or less than the proof
        assert_error(ledger.claim(&a, 0, 101, &proof0), DistributorError::InvalidProof);
        assert_error(ledger.claim(&a, 0, 99, &proof0), DistributorError::InvalidProof);

        assert!(ledger.pool.paid.is_empty());
        assert!(!ledger.is_claimed(0));
        assert!(!ledger.is_claimed(1));
    }

    #[test]
    fn test_insufficient_pool_rolls_back() {
        let (mut ledger, tree_nodes, tree) = two_account_ledger();
        let a = tree_nodes[0].claimant;
        let proof0 = tree.proof(0);

        ledger.accept_terms(&a, 0, 100, terms_hash(&a), &proof0).unwrap();
        ledger.pool.balance = 99;

        assert_error(ledger.claim(&a, 0, 100, &proof0), DistributorError::InsufficientPool);
        assert!(!ledger.is_claimed(0));
        assert_eq!(ledger.distributor.total_claimed, 0);
        assert!(ledger.events.is_empty());

        // Once the pool is topped up the same claim goes through
        ledger.pool.balance = 100;
        ledger.claim(&a, 0, 100, &proof0).unwrap();
        assert!(ledger.is_claimed(0));
    }

    #[test]
    fn test_claimed_flag_written_before_transfer() {
        let (ledger, tree_nodes, tree) = two_account_ledger();
        let a = tree_nodes[0].claimant;
        let proof0 = tree.proof(0);

        let mut distributor = ledger.distributor.clone();
        let mut terms = BitmapPage::default();
        distributor
            .accept_terms(&mut terms, &a, 0, 100, terms_hash(&a), &proof0)
            .unwrap();

        // Without the runtime rolling back, the failed transfer leaves the
        // effects in place: the flag is set ahead of the interaction.
        let mut claimed = BitmapPage::default();
        let mut empty_pool = MockPool::default();
        let result = distributor.claim(&terms, &mut claimed, &a, 0, 100, &proof0, &mut empty_pool);
        assert_error(result, DistributorError::InsufficientPool);
        assert!(claimed.is_set(0));
    }

    #[test]
    fn test_flag_accessors_read_only_the_page() {
        let mut terms = BitmapPage::default();
        let mut claimed = BitmapPage::default();
        terms.set(261);
        claimed.set(5);

        // Offsets within the page, whatever page the index lands on
        assert!(MerkleDistributor::is_agreed_to_terms(&terms, 5));
        assert!(MerkleDistributor::is_agreed_to_terms(&terms, 261));
        assert!(!MerkleDistributor::is_agreed_to_terms(&terms, 6));
        assert!(MerkleDistributor::is_claimed(&claimed, 517));
        assert!(!MerkleDistributor::is_claimed(&claimed, 4));
    }

    #[test]
    fn test_larger_tree() {
        let amounts: Vec<u64> = (1..=10).collect();
        let tree_nodes = nodes(&amounts);
        let tree = SimpleMerkleTree::new(&tree_nodes);
        let mut ledger = Ledger::new(wallet(OWNER), tree.root(), 201);

        for index in [4usize, 9] {
            let account = tree_nodes[index].claimant;
            let amount = tree_nodes[index].amount;
            let proof = tree.proof(index);
            ledger
                .accept_terms(&account, index as u64, amount, terms_hash(&account), &proof)
                .unwrap();
            ledger.claim(&account, index as u64, amount, &proof).unwrap();
        }

        assert_eq!(
            ledger.events,
            vec![(4, tree_nodes[4].claimant, 5), (9, tree_nodes[9].claimant, 10)]
        );
    }

    #[test]
    fn test_indices_on_later_pages() {
        // Same account on every leaf so indices past the first page are cheap to reach
        let account = wallet(1);
        let tree_nodes: Vec<TreeNode> = (0..600)
            .map(|_| TreeNode {
                claimant: account,
                amount: 100,
            })
            .collect();
        let tree = SimpleMerkleTree::new(&tree_nodes);
        let mut ledger = Ledger::new(wallet(OWNER), tree.root(), 1_000);

        for index in [5u64, 261, 517] {
            let proof = tree.proof(index as usize);
            ledger
                .accept_terms(&account, index, 100, terms_hash(&account), &proof)
                .unwrap();
            ledger.claim(&account, index, 100, &proof).unwrap();
        }

        // 5, 261 and 517 share a bit offset but live on pages 0, 1 and 2
        assert_eq!(ledger.claimed.len(), 3);
        assert!(ledger.is_claimed(261));
        assert!(!ledger.is_claimed(260));
        assert!(!ledger.is_claimed(773));
        assert_error(
            ledger.claim(&account, 261, 100, &tree.proof(261)),
            DistributorError::AlreadyClaimed,
        );
    }

    #[test]
    fn test_authorize_withdraw() {
        let (ledger, _, _) = two_account_ledger();
        let owner = wallet(OWNER);

        assert_error(
            ledger.distributor.authorize_withdraw(&wallet(1), &wallet(1)),
            DistributorError::NotOwner,
        );
        assert_error(
            ledger.distributor.authorize_withdraw(&wallet(1), &Pubkey::default()),
            DistributorError::NotOwner,
        );
        assert_error(
            ledger.distributor.authorize_withdraw(&owner, &Pubkey::default()),
            DistributorError::ZeroAddress,
        );
        ledger
            .distributor
            .authorize_withdraw(&owner, &wallet(1))
            .unwrap();
    }
}
