//! Balance map compiler.
//!
//! Indices are assigned in the order the balances are supplied: the first
//! entry gets index 0. Proofs depend on that order, so the same input order
//! always reproduces the same root and proofs. [`parse_balance_map`] reads a
//! JSON object whose keys are iterated in sorted order, which pins the order
//! for JSON input.

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use merkle_distributor::utils::verify_leaf;
use serde::Deserialize;
use tracing::info;

use crate::error::{MerkleTreeError, Result};
use crate::tree::{Leaf, MerkleTree, Proof};

/// Everything a claimant needs to call `accept_terms` and `claim`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    pub index: u64,
    pub amount: u64,
    pub proof: Proof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDistribution {
    pub merkle_root: [u8; 32],
    /// Sum of every claim amount, the minimum the vault has to hold
    pub token_total: u64,
    pub claims: BTreeMap<Pubkey, ClaimRecord>,
}

impl CompiledDistribution {
    /// Whether `account`'s record verifies against the compiled root.
    pub fn verify(&self, account: &Pubkey) -> bool {
        self.claims.get(account).is_some_and(|claim| {
            verify_leaf(claim.index, account, claim.amount, &claim.proof, self.merkle_root)
        })
    }
}

/// Compile `(account, amount)` balances into a root, a total and per-account claims.
pub fn compile<I>(balances: I) -> Result<CompiledDistribution>
where
    I: IntoIterator<Item = (Pubkey, u64)>,
{
    let mut seen = HashSet::new();
    let mut leaves = Vec::new();
    let mut token_total: u64 = 0;

    for (index, (account, amount)) in balances.into_iter().enumerate() {
        if !seen.insert(account) {
            return Err(MerkleTreeError::DuplicateAccount(account.to_string()));
        }
        if amount == 0 {
            return Err(MerkleTreeError::InvalidAmount {
                account: account.to_string(),
                amount: amount.to_string(),
            });
        }
        token_total = token_total
            .checked_add(amount)
            .ok_or(MerkleTreeError::Overflow)?;
        leaves.push(Leaf::new(index as u64, account, amount));
    }

    let tree = MerkleTree::build(&leaves)?;

    let mut claims = BTreeMap::new();
    for leaf in &leaves {
        let record = ClaimRecord {
            index: leaf.index,
            amount: leaf.amount,
            proof: tree.proof(leaf.index as usize)?,
        };
        claims.insert(leaf.account, record);
    }

    info!(
        accounts = claims.len(),
        token_total,
        root = %hex::encode(tree.root()),
        "compiled balance map"
    );

    Ok(CompiledDistribution {
        merkle_root: tree.root(),
        token_total,
        claims,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

/// Parse a decimal or `0x` hex amount string.
pub(crate) fn parse_amount_str(text: &str) -> Option<u64> {
    match text.strip_prefix("0x") {
        Some(hex_digits) => u64::from_str_radix(hex_digits, 16).ok(),
        None => text.parse::<u64>().ok(),
    }
}

fn parse_amount(account: &str, input: AmountInput) -> Result<u64> {
    let (parsed, raw) = match input {
        AmountInput::Number(number) => (number.as_u64(), number.to_string()),
        AmountInput::Text(text) => (parse_amount_str(&text), text),
    };
    parsed.ok_or_else(|| MerkleTreeError::InvalidAmount {
        account: account.to_string(),
        amount: raw,
    })
}

/// Parse `{ "<base58 account>": amount, ... }` and compile it.
///
/// Amounts may be JSON numbers, decimal strings or `0x` hex strings.
pub fn parse_balance_map(json: &str) -> Result<CompiledDistribution> {
    let raw: BTreeMap<String, AmountInput> = serde_json::from_str(json)?;

    let mut balances = Vec::with_capacity(raw.len());
    for (key, input) in raw {
        let account =
            Pubkey::from_str(&key).map_err(|_| MerkleTreeError::InvalidAccount(key.clone()))?;
        balances.push((account, parse_amount(&key, input)?));
    }

    compile(balances)
}
