use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_token;

/**
 * Account context for the emergency withdrawal
 *
 * Lets the owner move any token held by the distributor PDA out to an
 * arbitrary destination. This is a pool-level recovery action: it ignores
 * both bitmaps and does not close anything.
 *
 * Access Control: Owner only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    /// The distributor that owns the source token account
    pub distributor: Account<'info, MerkleDistributor>,

    /// Token account to withdraw from
    /// - Any token account of `token_mint` whose authority is the distributor,
    ///   the vault included
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = distributor,
        token::token_program = token_program,
    )]
    pub source: InterfaceAccount<'info, TokenAccount>,

    /// Token account receiving the tokens
    #[account(
        mut,
        token::mint = token_mint,
        token::token_program = token_program,
    )]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    /// Mint of the token being withdrawn, not necessarily the distributed one
    #[account(
        token::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Must be the distributor owner (checked in the handler)
    pub owner: Signer<'info>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Withdraws `amount` of `token_mint` from the distributor
 *
 * Validation Rules:
 * - Signer must be the owner (NotOwner)
 * - Destination owner must not be the default pubkey (ZeroAddress)
 */
pub fn handle_emergency_withdraw(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
    let distributor = &ctx.accounts.distributor;

    distributor.authorize_withdraw(&ctx.accounts.owner.key(), &ctx.accounts.destination.owner)?;

    let seeds = &[
        DISTRIBUTOR_SEED.as_bytes(),
        distributor.token_mint.as_ref(),
        distributor.owner.as_ref(),
        distributor.merkle_root.as_ref(),
        &[distributor.bump],
    ];
    let signer = &[&seeds[..]];

    transfer_token(
        distributor.to_account_info(),
        ctx.accounts.source.to_account_info(),
        ctx.accounts.destination.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.token_mint.decimals,
        Some(signer),
    )?;

    msg!(
        "Emergency withdraw - mint: {}, destination: {}, amount: {}",
        ctx.accounts.token_mint.key(),
        ctx.accounts.destination.key(),
        amount
    );

    emit_cpi!(EmergencyWithdrawn {
        distributor: distributor.key(),
        token_mint: ctx.accounts.token_mint.key(),
        destination: ctx.accounts.destination.key(),
        amount,
    });

    Ok(())
}
