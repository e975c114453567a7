//! # Constant Product AMM
//!
//! A two-asset automated market maker on Solana.
//!
//! ## Overview
//!
//! Each pool custodies two token reserves and issues an LP token that
//! represents a proportional claim on them. Traders swap against the reserves
//! at a price set by their ratio (`x * y = k`) minus a fee that stays in the
//! pool and accrues to liquidity providers.
//!
//! ## How it works
//! - `initialize_pool` creates the pool, its authority, vaults and LP mint.
//! - `deposit_liquidity` adds both tokens at the current ratio for LP tokens.
//! - `withdraw_liquidity` burns LP tokens for a share of both reserves.
//! - `swap_tokens` sells one token for the other with slippage protection.
//!
//! Pricing lives in [`amm`] as pure functions; handlers validate and quote
//! first, then move tokens, then commit the quote into [`state::Pool`].

use anchor_lang::prelude::*;

pub mod amm;
pub mod errors;
pub mod instructions;
pub mod state;

pub use amm::*;
pub use errors::*;
pub use instructions::*;

declare_id!("WHrdXykKNLUmfmKed7BiYJ1DC7xvzLrXVGwPrgdzev6");

#[program]
pub mod constant_product_amm {
    use super::*;

    /// Create a pool for a token pair with a fixed swap fee
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        fee_numerator: u64,
        fee_denominator: u64,
    ) -> Result<()> {
        ctx.accounts
            .initialize_pool(fee_numerator, fee_denominator, &ctx.bumps)
    }

    /// Add liquidity to the pool and receive LP tokens
    pub fn deposit_liquidity(
        ctx: Context<ManageLiquidity>,
        desired_amount_a: u64,
        desired_amount_b: u64,
    ) -> Result<()> {
        ctx.accounts
            .deposit_liquidity(desired_amount_a, desired_amount_b)
    }

    /// Remove liquidity from the pool by burning LP tokens
    pub fn withdraw_liquidity(ctx: Context<ManageLiquidity>, lp_burn_amount: u64) -> Result<()> {
        ctx.accounts.withdraw_liquidity(lp_burn_amount)
    }

    /// Swap tokens using the constant product formula
    pub fn swap_tokens(
        ctx: Context<SwapTokens>,
        input_amount: u64,
        min_output_amount: u64,
    ) -> Result<u64> {
        ctx.accounts.swap_tokens(input_amount, min_output_amount)
    }
}
