use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * Seeds for PDA derivation, bitmap page geometry and the terms payload every
 * claimant has to consent to before claiming.
 */

#[constant]
/// ===== PDA SEED CONSTANTS =====

/// Seed for distributor PDA derivation
/// - Used in: ["distributor", token_mint, owner, merkle_root]
/// - One distributor per (token, owner, root) combination
pub const DISTRIBUTOR_SEED: &str = "distributor";

/// Seed for token vault PDA derivation
/// - Used in: ["vault", distributor_key]
/// - The vault is owned by the distributor PDA and holds the pool
pub const VAULT_SEED: &str = "vault";

/// Seed for terms-accepted bitmap pages
/// - Used in: ["terms", distributor_key, page_index]
pub const TERMS_BITMAP_SEED: &str = "terms";

/// Seed for claimed bitmap pages
/// - Used in: ["claimed", distributor_key, page_index]
pub const CLAIMED_BITMAP_SEED: &str = "claimed";

/// ===== BITMAP CONSTANTS =====

/// Number of leaf indices tracked by a single bitmap page account
/// - Page index for leaf `i` is `i / BITS_PER_PAGE`
/// - Bit position inside the page is `i % BITS_PER_PAGE`
pub const BITS_PER_PAGE: u64 = 256;

/// ===== TERMS CONSTANTS =====

/// Terms and conditions payload hashed together with the claimant key
/// - See `utils::terms_hash`
pub const TERMS_AND_CONDITIONS: &str = "By claiming these tokens you confirm that you are not a resident of, \
or located in, a jurisdiction where receiving them is prohibited, that you accept the distribution terms \
published with this merkle root, and that the claim is made for your own account.";
