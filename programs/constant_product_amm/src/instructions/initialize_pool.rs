//! Pool Initialization
//!
//! Creates the pool account for a token pair together with everything it
//! controls: the authority PDA, one vault per token and the LP mint.
//! No tokens move here; the first deposit sets the price.
//!
//! The pool address is derived from the two mints in sorted order, so a pair
//! can only ever have one pool regardless of which mint is passed as A.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::errors::AmmError;
use crate::state::{Pool, LP_DECIMALS};

/// Event emitted when a new pool is created
#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub fee_numerator: u64,
    pub fee_denominator: u64,
}

/// Accounts required to create a pool
#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Pays for every account created here
    #[account(mut)]
    pub payer: Signer<'info>,

    /// First token mint in the trading pair
    #[account(
        constraint = token_a_mint.key() != token_b_mint.key() @ AmmError::IdenticalMints,
    )]
    pub token_a_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Second token mint in the trading pair
    pub token_b_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Pool state. Opened with `init_if_needed` so that a second
    /// initialization, in either mint order, fails with `PoolAlreadyExists`
    /// before the vaults are looked at.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Pool::INIT_SPACE,
        seeds = [
            Pool::SEED,
            token_a_mint.key().min(token_b_mint.key()).as_ref(),
            token_a_mint.key().max(token_b_mint.key()).as_ref(),
        ],
        bump,
        constraint = !pool.is_initialized() @ AmmError::PoolAlreadyExists,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: PDA that signs for the vaults and the LP mint, holds no data
    #[account(
        seeds = [Pool::AUTHORITY_SEED, pool.key().as_ref()],
        bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    /// Vault to hold token A reserves
    #[account(
        init_if_needed,
        payer = payer,
        seeds = [Pool::TOKEN_A_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = token_a_mint,
        token::authority = pool_authority,
    )]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Vault to hold token B reserves
    #[account(
        init_if_needed,
        payer = payer,
        seeds = [Pool::TOKEN_B_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = token_b_mint,
        token::authority = pool_authority,
    )]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// LP token mint, shares of the pool
    #[account(
        init_if_needed,
        payer = payer,
        seeds = [Pool::LP_MINT_SEED, pool.key().as_ref()],
        bump,
        mint::decimals = LP_DECIMALS,
        mint::authority = pool_authority,
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> InitializePool<'info> {
    pub fn initialize_pool(
        &mut self,
        fee_numerator: u64,
        fee_denominator: u64,
        bumps: &InitializePoolBumps,
    ) -> Result<()> {
        Pool::validate_fee(fee_numerator, fee_denominator)?;

        self.pool.set_inner(Pool {
            token_a_mint: self.token_a_mint.key(),
            token_b_mint: self.token_b_mint.key(),
            token_a_vault: self.token_a_vault.key(),
            token_b_vault: self.token_b_vault.key(),
            lp_mint: self.lp_mint.key(),
            fee_numerator,
            fee_denominator,
            reserve_a: 0,
            reserve_b: 0,
            total_lp_issued: 0,
            authority_bump: bumps.pool_authority,
            bump: bumps.pool,
        });

        msg!("Pool initialized with fee: {}/{}", fee_numerator, fee_denominator);
        msg!("Token A: {}", self.token_a_mint.key());
        msg!("Token B: {}", self.token_b_mint.key());

        emit!(PoolInitialized {
            pool: self.pool.key(),
            token_a_mint: self.token_a_mint.key(),
            token_b_mint: self.token_b_mint.key(),
            lp_mint: self.lp_mint.key(),
            fee_numerator,
            fee_denominator,
        });

        Ok(())
    }
}
