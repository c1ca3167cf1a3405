use anchor_lang::prelude::*;

use crate::constants::BITS_PER_PAGE;

/**
 * One page of a set-once bitmap
 *
 * Each distributor keeps two bitmaps (terms accepted, claimed). A bitmap is
 * split into pages of 256 flags, each page its own PDA, so storage grows
 * with the highest touched index instead of being allocated up front.
 *
 * Derivation: ["terms" | "claimed", distributor_key, page_index]
 *
 * Lifecycle:
 * 1. Created the first time an index on the page is touched (init_if_needed)
 * 2. Bits flip from 0 to 1, never back
 * 3. Lives as long as the distributor
 */
#[account]
#[derive(Default, Debug)]
pub struct BitmapPage {
    /// 4 x 64 = 256 flags, bit `i % 256` lives in word `(i % 256) / 64`
    pub bits: [u64; 4],
}

impl BitmapPage {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<BitmapPage>();

    fn locate(index: u64) -> (usize, u64) {
        let offset = index % BITS_PER_PAGE;
        ((offset / 64) as usize, 1u64 << (offset % 64))
    }

    /// Whether the flag for leaf `index` is set.
    ///
    /// The caller is responsible for passing the page that owns `index`
    /// (guaranteed on-chain by the PDA seeds).
    pub fn is_set(&self, index: u64) -> bool {
        let (word, mask) = Self::locate(index);
        self.bits[word] & mask != 0
    }

    pub fn set(&mut self, index: u64) {
        let (word, mask) = Self::locate(index);
        self.bits[word] |= mask;
    }

    /// Number of flags set on this page.
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|word| word.count_ones()).sum()
    }
}
