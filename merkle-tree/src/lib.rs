//! Off-chain side of the merkle distributor.
//!
//! - [`MerkleTree`] builds the tree over `(index, account, amount)` leaves and
//!   hands out proofs.
//! - [`compile`] turns an account -> amount map into a root, a token total
//!   and one [`ClaimRecord`] per account.
//! - [`DistributionArtifact`] is the JSON file handed to claimants.
//!
//! Leaf hashing, node hashing and proof verification are the program's own
//! functions, so a root produced here is exactly what the program checks.

pub mod artifact;
pub mod balance_map;
pub mod error;
pub mod tree;

pub use artifact::{ClaimArtifact, DistributionArtifact};
pub use balance_map::{compile, parse_balance_map, ClaimRecord, CompiledDistribution};
pub use error::{MerkleTreeError, Result};
pub use merkle_distributor::utils::{hash_leaf, hash_pair};
pub use tree::{Leaf, MerkleTree, Proof};
