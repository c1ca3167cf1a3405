//! JSON artifact handed out to claimants.
//!
//! ```json
//! {
//!   "merkleRoot": "0x…",
//!   "tokenTotal": "0x2ee",
//!   "claims": {
//!     "<base58 account>": { "index": 0, "amount": "0xc8", "proof": ["0x…"] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balance_map::{parse_amount_str, ClaimRecord, CompiledDistribution};
use crate::error::{MerkleTreeError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionArtifact {
    pub merkle_root: String,
    pub token_total: String,
    pub claims: BTreeMap<String, ClaimArtifact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimArtifact {
    pub index: u64,
    pub amount: String,
    pub proof: Vec<String>,
}

pub fn encode_digest(digest: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(digest))
}

pub fn decode_digest(value: &str) -> Result<[u8; 32]> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(digits).map_err(|_| MerkleTreeError::InvalidHex(value.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| MerkleTreeError::InvalidHex(value.to_string()))
}

pub fn encode_amount(amount: u64) -> String {
    format!("{:#x}", amount)
}

/// Amounts are written as `0x` hex, decimal strings are read as well.
pub fn decode_amount(value: &str) -> Result<u64> {
    parse_amount_str(value).ok_or_else(|| MerkleTreeError::InvalidHex(value.to_string()))
}

impl From<&CompiledDistribution> for DistributionArtifact {
    fn from(compiled: &CompiledDistribution) -> Self {
        let claims = compiled
            .claims
            .iter()
            .map(|(account, claim)| {
                let entry = ClaimArtifact {
                    index: claim.index,
                    amount: encode_amount(claim.amount),
                    proof: claim.proof.iter().map(encode_digest).collect(),
                };
                (account.to_string(), entry)
            })
            .collect();

        Self {
            merkle_root: encode_digest(&compiled.merkle_root),
            token_total: encode_amount(compiled.token_total),
            claims,
        }
    }
}

impl DistributionArtifact {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), claims = self.claims.len(), "wrote distribution artifact");
        Ok(())
    }

    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Decode back into binary form. Does not re-verify proofs, see
    /// [`CompiledDistribution::verify`].
    pub fn to_compiled(&self) -> Result<CompiledDistribution> {
        let mut claims = BTreeMap::new();
        for (key, entry) in &self.claims {
            let account =
                Pubkey::from_str(key).map_err(|_| MerkleTreeError::InvalidAccount(key.clone()))?;
            let proof = entry
                .proof
                .iter()
                .map(|node| decode_digest(node))
                .collect::<Result<Vec<_>>>()?;
            let record = ClaimRecord {
                index: entry.index,
                amount: decode_amount(&entry.amount)?,
                proof,
            };
            claims.insert(account, record);
        }

        Ok(CompiledDistribution {
            merkle_root: decode_digest(&self.merkle_root)?,
            token_total: decode_amount(&self.token_total)?,
            claims,
        })
    }
}
