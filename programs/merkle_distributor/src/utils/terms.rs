use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

use crate::constants::TERMS_AND_CONDITIONS;

/// Hash a claimant must present when accepting the terms.
///
/// Binding the account into the hash means an acceptance produced for one
/// wallet is useless for any other.
pub fn terms_hash(account: &Pubkey) -> [u8; 32] {
    hashv(&[TERMS_AND_CONDITIONS.as_bytes(), &account.to_bytes()]).to_bytes()
}
