/// Errors from building trees, compiling balance maps and reading artifacts.
#[derive(Debug, thiserror::Error)]
pub enum MerkleTreeError {
    #[error("Empty leaf set")]
    EmptyInput,

    #[error("Leaf index {index} out of range for {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    #[error("Leaf at position {position} carries index {index}")]
    IndexMismatch { position: usize, index: u64 },

    #[error("Token total exceeds the maximum representable amount")]
    Overflow,

    #[error("Duplicate account: {0}")]
    DuplicateAccount(String),

    #[error("Invalid amount for account {account}: {amount}")]
    InvalidAmount { account: String, amount: String },

    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    #[error("Invalid hex or amount value: {0}")]
    InvalidHex(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MerkleTreeError>;
