//! Binary merkle tree over distribution leaves.
//!
//! Layer 0 holds the leaf hashes, every following layer combines successive
//! pairs with [`hash_pair`]. A layer of odd length pairs its last node with
//! itself, so the trailing leaf of an odd layer is its own sibling in proofs.
//! Published roots depend on this, keep it.

use anchor_lang::prelude::Pubkey;
use merkle_distributor::utils::{hash_leaf, hash_pair, verify_leaf};
use tracing::debug;

use crate::error::{MerkleTreeError, Result};

/// Sibling hashes from the leaf layer up to (excluding) the root.
pub type Proof = Vec<[u8; 32]>;

/// One entry of the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    /// Position of the entry in the input ordering
    pub index: u64,
    pub account: Pubkey,
    pub amount: u64,
}

impl Leaf {
    pub fn new(index: u64, account: Pubkey, amount: u64) -> Self {
        Self {
            index,
            account,
            amount,
        }
    }

    pub fn hash(&self) -> [u8; 32] {
        hash_leaf(self.index, &self.account, self.amount)
    }
}

#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// `layers[0]` = leaf hashes, last layer = `[root]`
    layers: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    /// Build a tree from leaves whose `index` equals their position.
    pub fn build(leaves: &[Leaf]) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleTreeError::EmptyInput);
        }
        if let Some((position, leaf)) = leaves
            .iter()
            .enumerate()
            .find(|(position, leaf)| leaf.index != *position as u64)
        {
            return Err(MerkleTreeError::IndexMismatch {
                position,
                index: leaf.index,
            });
        }

        let mut layers = vec![leaves.iter().map(Leaf::hash).collect::<Vec<_>>()];

        while let Some(prev) = layers.last().filter(|layer| layer.len() > 1) {
            let next: Vec<[u8; 32]> = prev
                .chunks(2)
                .map(|pair| hash_pair(&pair[0], pair.get(1).unwrap_or(&pair[0])))
                .collect();
            layers.push(next);
        }

        let tree = Self { layers };
        debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            root = %hex::encode(tree.root()),
            "built merkle tree"
        );
        Ok(tree)
    }

    /// Build a tree from `(account, amount)` entries, indexed in order.
    pub fn from_entries(entries: &[(Pubkey, u64)]) -> Result<Self> {
        let leaves: Vec<Leaf> = entries
            .iter()
            .enumerate()
            .map(|(index, (account, amount))| Leaf::new(index as u64, *account, *amount))
            .collect();
        Self::build(&leaves)
    }

    pub fn root(&self) -> [u8; 32] {
        self.layers[self.layers.len() - 1][0]
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of layers above the leaves, which is also every proof's length.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn leaf_hashes(&self) -> &[[u8; 32]] {
        &self.layers[0]
    }

    /// Proof for the leaf at `leaf_index`.
    pub fn proof(&self, leaf_index: usize) -> Result<Proof> {
        if leaf_index >= self.leaf_count() {
            return Err(MerkleTreeError::IndexOutOfRange {
                index: leaf_index,
                leaf_count: self.leaf_count(),
            });
        }

        let mut idx = leaf_index;
        let proof = self.layers[..self.depth()]
            .iter()
            .map(|layer| {
                let sibling = layer.get(idx ^ 1).unwrap_or(&layer[idx]);
                idx /= 2;
                *sibling
            })
            .collect();

        Ok(proof)
    }

    /// Check `leaf` against `expected_root` without needing a tree.
    ///
    /// Same routine the program runs on `accept_terms` and `claim`.
    pub fn verify(leaf_index: u64, leaf: &Leaf, proof: &[[u8; 32]], expected_root: [u8; 32]) -> bool {
        leaf.index == leaf_index
            && verify_leaf(leaf.index, &leaf.account, leaf.amount, proof, expected_root)
    }
}
