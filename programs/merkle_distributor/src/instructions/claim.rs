use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::VaultPool;

/**
 * Account context for claiming tokens
 *
 * Pays out a single leaf to the claimant after the terms were accepted for
 * it. Both bitmap pages are addressed by the leaf index.
 *
 * Access Control: The account committed to in the leaf, after accepting terms
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(index: u64)]
pub struct Claim<'info> {
    /// The distributor account containing the merkle root
    /// - Will be modified to update the claim counters
    #[account(mut)]
    pub distributor: Account<'info, MerkleDistributor>,

    /// Terms bitmap page covering `index`
    /// - A page that does not exist yet reads as all-unset, so the claim
    ///   fails with TermsNotAccepted and the page creation is rolled back
    #[account(
        init_if_needed,
        payer = claimant,
        space = BitmapPage::LEN,
        seeds = [
            TERMS_BITMAP_SEED.as_bytes(),
            distributor.key().as_ref(),
            (index / BITS_PER_PAGE).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub terms_bitmap: Account<'info, BitmapPage>,

    /// Claimed bitmap page covering `index`
    /// - Derived from: ["claimed", distributor_key, index / 256]
    #[account(
        init_if_needed,
        payer = claimant,
        space = BitmapPage::LEN,
        seeds = [
            CLAIMED_BITMAP_SEED.as_bytes(),
            distributor.key().as_ref(),
            (index / BITS_PER_PAGE).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub claimed_bitmap: Account<'info, BitmapPage>,

    /// Token vault holding the tokens to be distributed
    /// - Derived from: ["vault", distributor_key]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), distributor.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Claimant's token account to receive the tokens
    #[account(
        mut,
        token::mint = distributor.token_mint,
        token::authority = claimant,
        token::token_program = token_program,
    )]
    pub claimant_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The token mint for verification
    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == distributor.token_mint @ DistributorError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// The claimant attempting to claim tokens
    #[account(mut)]
    pub claimant: Signer<'info>,

    /// System program for page creation
    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Processes a claim for leaf `index`
 *
 * @param index - Leaf index of the claimant's entry
 * @param amount - Amount committed to in the leaf
 * @param proof - Merkle proof of (index, claimant, amount)
 *
 * Validation Process:
 * 1. Terms accepted for the index
 * 2. Index not claimed yet
 * 3. Merkle proof for (index, claimant, amount)
 * 4. Mark claimed, then transfer from the vault
 */
pub fn handle_claim(
    ctx: Context<Claim>,
    index: u64,
    amount: u64,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let claimant = ctx.accounts.claimant.key();

    // Prepare PDA signing seeds before the distributor is borrowed mutably
    let token_mint_key = ctx.accounts.distributor.token_mint;
    let owner_key = ctx.accounts.distributor.owner;
    let merkle_root = ctx.accounts.distributor.merkle_root;
    let distributor_bump = ctx.accounts.distributor.bump;
    let seeds = &[
        DISTRIBUTOR_SEED.as_bytes(),
        token_mint_key.as_ref(),
        owner_key.as_ref(),
        merkle_root.as_ref(),
        &[distributor_bump],
    ];
    let signer = &[&seeds[..]];

    let mut pool = VaultPool {
        distributor: ctx.accounts.distributor.to_account_info(),
        vault: ctx.accounts.token_vault.to_account_info(),
        recipient: ctx.accounts.claimant_token_account.to_account_info(),
        mint: ctx.accounts.token_mint.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        decimals: ctx.accounts.token_mint.decimals,
        available: ctx.accounts.token_vault.amount,
        signer_seeds: signer,
    };

    ctx.accounts.distributor.claim(
        &ctx.accounts.terms_bitmap,
        &mut ctx.accounts.claimed_bitmap,
        &claimant,
        index,
        amount,
        &proof,
        &mut pool,
    )?;

    msg!(
        "Claim successful - index: {}, account: {}, amount: {}",
        index,
        claimant,
        amount
    );

    emit_cpi!(Claimed {
        index,
        account: claimant,
        amount,
    });

    Ok(())
}
