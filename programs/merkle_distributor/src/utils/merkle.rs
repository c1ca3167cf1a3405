use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

/// Hash of a single distribution entry.
///
/// Layout: `index (u64 LE) || account (32 bytes) || amount (u64 LE)`.
/// The off-chain tree builder hashes leaves through this function, so the
/// on-chain check and the published roots can never drift apart.
pub fn hash_leaf(index: u64, account: &Pubkey, amount: u64) -> [u8; 32] {
    hashv(&[
        &index.to_le_bytes(),
        &account.to_bytes(),
        &amount.to_le_bytes(),
    ])
    .to_bytes()
}

/// Combine two nodes into their parent.
///
/// Inputs are ordered by value before hashing, which makes the result
/// independent of argument order and lets proofs omit left/right flags.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[a, b]).to_bytes()
    } else {
        hashv(&[b, a]).to_bytes()
    }
}

/// Fold a proof over a leaf hash and compare the result with `root`.
pub fn verify(proof: &[[u8; 32]], root: [u8; 32], leaf: [u8; 32]) -> bool {
    let computed = proof
        .iter()
        .fold(leaf, |node, sibling| hash_pair(&node, sibling));
    computed == root
}

/// Verify that `(index, account, amount)` is committed to by `root`.
pub fn verify_leaf(
    index: u64,
    account: &Pubkey,
    amount: u64,
    proof: &[[u8; 32]],
    root: [u8; 32],
) -> bool {
    verify(proof, root, hash_leaf(index, account, amount))
}
