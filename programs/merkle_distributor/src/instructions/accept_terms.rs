use anchor_lang::prelude::*;
use crate::constants::*;
use crate::event::*;
use crate::state::*;

/**
 * Account context for accepting the distribution terms
 *
 * A claimant consents to the terms for their own leaf. The consent is bound
 * to (index, claimant, amount) through the merkle proof and to the claimant
 * through the terms hash. No tokens move.
 *
 * Access Control: Any signer holding a valid proof for their own leaf
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(index: u64)]
pub struct AcceptTerms<'info> {
    /// The distributor whose root the proof is checked against
    pub distributor: Account<'info, MerkleDistributor>,

    /// Terms bitmap page covering `index`
    /// - Derived from: ["terms", distributor_key, index / 256]
    /// - Created by the first claimant touching the page
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

    /// The claimant accepting the terms
    #[account(mut)]
    pub claimant: Signer<'info>,

    /// System program for page creation
    pub system_program: Program<'info, System>,
}

/**
 * Accepts the terms for leaf `index`
 *
 * @param index - Leaf index of the claimant's entry
 * @param amount - Amount committed to in the leaf
 * @param terms_hash - Must equal terms_hash(claimant)
 * @param proof - Merkle proof of (index, claimant, amount)
 */
pub fn handle_accept_terms(
    ctx: Context<AcceptTerms>,
    index: u64,
    amount: u64,
    terms_hash: [u8; 32],
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let claimant = ctx.accounts.claimant.key();

    ctx.accounts.distributor.accept_terms(
        &mut ctx.accounts.terms_bitmap,
        &claimant,
        index,
        amount,
        terms_hash,
        &proof,
    )?;

    msg!("Terms accepted - index: {}, account: {}", index, claimant);

    emit_cpi!(TermsAccepted {
        distributor: ctx.accounts.distributor.key(),
        index,
        account: claimant,
    });

    Ok(())
}
