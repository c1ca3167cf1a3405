//! PDA derivation helpers.
//!
//! These mirror the seeds declared on the instruction account structs so
//! client code can locate the distributor, its vault and any bitmap page.

use anchor_lang::prelude::*;

use crate::constants::*;

/// Which of the two per-distributor bitmaps a page belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitmapKind {
    Terms,
    Claimed,
}

impl BitmapKind {
    pub fn seed(self) -> &'static [u8] {
        match self {
            BitmapKind::Terms => TERMS_BITMAP_SEED.as_bytes(),
            BitmapKind::Claimed => CLAIMED_BITMAP_SEED.as_bytes(),
        }
    }
}

/// Page holding the flag for leaf `index`.
pub fn page_index(index: u64) -> u64 {
    index / BITS_PER_PAGE
}

pub fn find_distributor_address(
    token_mint: &Pubkey,
    owner: &Pubkey,
    merkle_root: &[u8; 32],
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            DISTRIBUTOR_SEED.as_bytes(),
            token_mint.as_ref(),
            owner.as_ref(),
            merkle_root.as_ref(),
        ],
        &crate::ID,
    )
}

pub fn find_vault_address(distributor: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED.as_bytes(), distributor.as_ref()], &crate::ID)
}

/// Address of the bitmap page of `kind` that tracks leaf `index`.
pub fn find_bitmap_page_address(distributor: &Pubkey, kind: BitmapKind, index: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            kind.seed(),
            distributor.as_ref(),
            page_index(index).to_le_bytes().as_ref(),
        ],
        &crate::ID,
    )
}
