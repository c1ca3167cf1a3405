use crate::constants::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_token;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for creating a new merkle distributor
 *
 * - Creates a distributor PDA bound to (token_mint, owner, merkle_root)
 * - Creates a token vault PDA to hold the tokens to be distributed
 * - Optionally transfers an initial amount from the owner to the vault
 *
 * The vault can be topped up later with a plain token transfer.
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(merkle_root: [u8; 32])]
pub struct CreateDistributor<'info> {
    /// The main distributor account (PDA)
    /// - Stores the merkle root and distribution counters
    /// - Derived from: ["distributor", token_mint, owner, merkle_root]
    #[account(
        init,
        payer = owner,
        space = MerkleDistributor::LEN,
        seeds = [
            DISTRIBUTOR_SEED.as_bytes(),
            token_mint.key().as_ref(),
            owner.key().as_ref(),
            merkle_root.as_ref()
        ],
        bump
    )]
    pub distributor: Account<'info, MerkleDistributor>,

    /// Token vault account (PDA) that holds the tokens to be distributed
    /// - Controlled by the distributor PDA as token authority
    /// - Derived from: ["vault", distributor_key]
    #[account(
        init,
        token::mint = token_mint,
        token::authority = distributor,
        token::token_program = token_program,
        seeds = [VAULT_SEED.as_bytes(), distributor.key().as_ref()],
        bump,
        payer = owner,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// The token mint for the tokens being distributed
    /// - Supports both SPL Token and Token 2022 programs
    #[account(
        token::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Owner's token account funding the initial deposit
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The owner of the distributor
    /// - Only account allowed to emergency withdraw
    #[account(mut)]
    pub owner: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Creates a new merkle distributor
 *
 * @param ctx - The account context containing all required accounts
 * @param merkle_root - Root committing to every (index, account, amount) leaf
 * @param initial_total_amount - Tokens to deposit now, zero to fund later
 */
pub fn handle_create_distributor(
    ctx: Context<CreateDistributor>,
    merkle_root: [u8; 32],
    initial_total_amount: u64,
) -> Result<()> {
    let distributor = &mut ctx.accounts.distributor;

    distributor.bump = ctx.bumps.distributor;
    distributor.owner = ctx.accounts.owner.key();
    distributor.token_mint = ctx.accounts.token_mint.key();
    distributor.token_vault = ctx.accounts.token_vault.key();
    distributor.merkle_root = merkle_root;
    // Note: total_claimed and num_claimed start at zero

    if initial_total_amount > 0 {
        transfer_token(
            ctx.accounts.owner.to_account_info(),
            ctx.accounts.owner_token_account.to_account_info(),
            ctx.accounts.token_vault.to_account_info(),
            ctx.accounts.token_mint.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            initial_total_amount,
            ctx.accounts.token_mint.decimals,
            None, // Owner signs the deposit
        )?;
    }

    msg!(
        "Distributor created - mint: {}, deposit: {}",
        ctx.accounts.token_mint.key(),
        initial_total_amount
    );

    emit_cpi!(DistributorCreated {
        distributor: ctx.accounts.distributor.key(),
        owner: ctx.accounts.owner.key(),
        token_mint: ctx.accounts.token_mint.key(),
        token_vault: ctx.accounts.token_vault.key(),
        merkle_root,
        initial_total_amount,
    });

    Ok(())
}
