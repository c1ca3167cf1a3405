use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, TransferChecked};

use crate::error::DistributorError;

/// Source of funds for claims.
///
/// A transfer either moves exactly `amount` or returns an error; it never
/// reports success for a partial or skipped transfer.
pub trait TokenPool {
    fn transfer(&mut self, amount: u64) -> Result<()>;
}

/// Universal token transfer function that supports both SPL Token and Token 2022
pub fn transfer_token<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    decimals: u8,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from,
        mint,
        to,
        authority,
    };

    let cpi_ctx = match signer_seeds {
        Some(seeds) => CpiContext::new_with_signer(token_program, cpi_accounts, seeds),
        None => CpiContext::new(token_program, cpi_accounts),
    };

    transfer_checked(cpi_ctx, amount, decimals)
}

/// Token pool backed by a vault token account owned by the distributor PDA.
pub struct VaultPool<'a, 'info> {
    pub distributor: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub recipient: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub decimals: u8,
    /// Vault balance as loaded at the start of the instruction
    pub available: u64,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl TokenPool for VaultPool<'_, '_> {
    fn transfer(&mut self, amount: u64) -> Result<()> {
        require!(self.available >= amount, DistributorError::InsufficientPool);

        transfer_token(
            self.distributor.clone(),
            self.vault.clone(),
            self.recipient.clone(),
            self.mint.clone(),
            self.token_program.clone(),
            amount,
            self.decimals,
            Some(self.signer_seeds),
        )?;

        self.available -= amount;
        Ok(())
    }
}
