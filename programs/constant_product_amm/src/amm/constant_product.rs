//! # Constant Product Curve
//!
//! Pricing and share accounting for a two-asset pool.
//!
//! ## The Core Invariant
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │                     k = A × B                                │
//! │                                                              │
//! │   Where:                                                     │
//! │   • A = Token A reserve held by the pool vault               │
//! │   • B = Token B reserve held by the pool vault               │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Swaps move along the curve after the fee is skimmed from the input, so `k`
//! never shrinks and grows by the fee portion of every trade. Deposits and
//! withdrawals move the pool between curves while keeping `A / B` fixed.
//!
//! ## Rounding
//!
//! Every division floors. Payouts (swap output, withdrawals, LP minted) are
//! therefore never larger than the exact rational value, and the remainder
//! stays in the reserves for the remaining LP holders.
//!
//! ## Share Accounting
//!
//! ```text
//! first deposit:  lp = ⌊√(a × b)⌋
//! later deposit:  lp = ⌊total_lp × take_a / A⌋      (always scaled from A)
//! withdrawal:     out_a = ⌊A × burn / total_lp⌋,  out_b = ⌊B × burn / total_lp⌋
//! ```

use anchor_lang::prelude::*;

use crate::errors::AmmError;

/// Amounts a deposit will actually pull from the provider and the LP it mints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositQuote {
    pub take_a: u64,
    pub take_b: u64,
    pub lp_minted: u64,
}

/// Amounts a withdrawal will release for `lp_burned` LP tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawQuote {
    pub out_a: u64,
    pub out_b: u64,
    pub lp_burned: u64,
}

/// Result of pricing a swap. `input_amount == effective_input + fee_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    pub input_amount: u64,
    pub effective_input: u64,
    pub fee_amount: u64,
    pub output_amount: u64,
}

/// Constant product curve (`x * y = k`) for a two-asset pool.
///
/// All functions are pure: they read reserves and arguments and return a
/// quote, leaving state changes to the caller.
pub struct ConstantProductCurve;

impl ConstantProductCurve {
    /// Price the first deposit into an empty pool.
    ///
    /// The whole of both amounts is taken and sets the pool's initial price at
    /// `amount_b / amount_a`. LP minted is the geometric mean of the amounts.
    ///
    /// # Example
    /// ```ignore
    /// let quote = ConstantProductCurve::compute_initial_deposit(50, 50)?;
    /// // quote.lp_minted == 50
    /// ```
    pub fn compute_initial_deposit(amount_a: u64, amount_b: u64) -> Result<DepositQuote> {
        require!(
            amount_a > 0 && amount_b > 0,
            AmmError::ZeroOrNegativeAmount
        );

        let product = (amount_a as u128)
            .checked_mul(amount_b as u128)
            .ok_or(AmmError::MathOverflow)?;
        let lp_minted = to_u64(sqrt(product))?;

        require!(lp_minted > 0, AmmError::InvalidLpTokenAmount);

        Ok(DepositQuote {
            take_a: amount_a,
            take_b: amount_b,
            lp_minted,
        })
    }

    /// Price a deposit into a pool that already has LP outstanding.
    ///
    /// The desired amounts are upper bounds. The side whose implied amount
    /// would exceed its cap is clamped and the other side is scaled down to
    /// the current reserve ratio.
    ///
    /// # Arguments
    /// * `desired_a` - Most token A the provider is willing to add
    /// * `desired_b` - Most token B the provider is willing to add
    /// * `reserve_a` - Current token A vault balance
    /// * `reserve_b` - Current token B vault balance
    /// * `total_lp_issued` - LP tokens outstanding before this deposit
    pub fn compute_subsequent_deposit(
        desired_a: u64,
        desired_b: u64,
        reserve_a: u64,
        reserve_b: u64,
        total_lp_issued: u64,
    ) -> Result<DepositQuote> {
        require!(
            desired_a > 0 && desired_b > 0,
            AmmError::ZeroOrNegativeAmount
        );
        require!(total_lp_issued > 0, AmmError::PoolNotInitialized);
        require!(
            reserve_a > 0 && reserve_b > 0,
            AmmError::ReserveExhausted
        );

        let implied_b = mul_div_floor(desired_a, reserve_b, reserve_a)?;
        let (take_a, take_b) = if implied_b <= desired_b as u128 {
            (desired_a, implied_b as u64)
        } else {
            let implied_a = mul_div_floor(desired_b, reserve_a, reserve_b)?;
            (to_u64(implied_a)?, desired_b)
        };

        require!(
            take_a > 0 && take_b > 0,
            AmmError::RatioComputationUnderflow
        );

        let lp_minted = to_u64(mul_div_floor(total_lp_issued, take_a, reserve_a)?)?;
        require!(lp_minted > 0, AmmError::InvalidLpTokenAmount);

        Ok(DepositQuote {
            take_a,
            take_b,
            lp_minted,
        })
    }

    /// Price the release of reserves for `lp_burn` LP tokens.
    ///
    /// A burn that would pay out nothing on either side is rejected rather
    /// than accepted as a silent loss for the provider.
    pub fn compute_withdrawal(
        lp_burn: u64,
        reserve_a: u64,
        reserve_b: u64,
        total_lp_issued: u64,
    ) -> Result<WithdrawQuote> {
        require!(lp_burn > 0, AmmError::ZeroOrNegativeAmount);
        require!(total_lp_issued > 0, AmmError::PoolNotInitialized);
        require!(
            lp_burn <= total_lp_issued,
            AmmError::InsufficientLpBalance
        );

        let out_a = to_u64(mul_div_floor(reserve_a, lp_burn, total_lp_issued)?)?;
        let out_b = to_u64(mul_div_floor(reserve_b, lp_burn, total_lp_issued)?)?;

        require!(
            out_a > 0 && out_b > 0,
            AmmError::RatioComputationUnderflow
        );

        Ok(WithdrawQuote {
            out_a,
            out_b,
            lp_burned: lp_burn,
        })
    }

    /// Price a swap of `input_amount` into the pool.
    ///
    /// Direction-agnostic: the caller passes whichever reserve receives the
    /// input and whichever pays the output.
    ///
    /// Formula:
    /// ```text
    /// effective_in = ⌊input × (den − num) / den⌋
    /// output       = ⌊out_reserve × effective_in / (in_reserve + effective_in)⌋
    /// ```
    ///
    /// # Returns
    /// * The swap quote, after slippage and reserve checks have passed
    pub fn compute_swap(
        input_amount: u64,
        input_reserve: u64,
        output_reserve: u64,
        fee_numerator: u64,
        fee_denominator: u64,
        min_output_amount: u64,
    ) -> Result<SwapQuote> {
        require!(input_amount > 0, AmmError::ZeroOrNegativeAmount);
        require!(
            fee_denominator > 0 && fee_numerator < fee_denominator,
            AmmError::InvalidFeeConfiguration
        );
        require!(
            input_reserve > 0 && output_reserve > 0,
            AmmError::PoolNotInitialized
        );

        let effective_input = to_u64(mul_div_floor(
            input_amount,
            fee_denominator - fee_numerator,
            fee_denominator,
        )?)?;
        let fee_amount = input_amount
            .checked_sub(effective_input)
            .ok_or(AmmError::MathOverflow)?;

        let new_input_reserve = input_reserve
            .checked_add(input_amount)
            .ok_or(AmmError::MathOverflow)?;

        let output_amount = (output_reserve as u128)
            .checked_mul(effective_input as u128)
            .and_then(|v| v.checked_div(input_reserve as u128 + effective_input as u128))
            .ok_or(AmmError::MathOverflow)?;
        let output_amount = to_u64(output_amount)?;

        require!(
            output_amount >= min_output_amount,
            AmmError::SlippageExceeded
        );
        require!(output_amount > 0, AmmError::ZeroOrNegativeAmount);
        require!(output_amount < output_reserve, AmmError::ReserveExhausted);

        let k_before = constant_product(input_reserve, output_reserve);
        let k_after = constant_product(new_input_reserve, output_reserve - output_amount);
        require!(k_after >= k_before, AmmError::InvariantViolation);

        Ok(SwapQuote {
            input_amount,
            effective_input,
            fee_amount,
            output_amount,
        })
    }
}

/// `x * y` widened so it can never overflow.
pub fn constant_product(reserve_x: u64, reserve_y: u64) -> u128 {
    reserve_x as u128 * reserve_y as u128
}

/// `⌊a × b / c⌋` in 128-bit precision.
fn mul_div_floor(a: u64, b: u64, c: u64) -> Result<u128> {
    (a as u128)
        .checked_mul(b as u128)
        .and_then(|v| v.checked_div(c as u128))
        .ok_or_else(|| error!(AmmError::MathOverflow))
}

fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(AmmError::MathOverflow))
}

/// Integer square root using Newton's method
///
/// Computes floor(√x) for any non-negative integer
pub fn sqrt(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }

    // ceil(x / 2) without overflowing at u128::MAX
    let mut z = x / 2 + x % 2;
    let mut y = x;

    while z < y {
        y = z;
        z = (x / z + z) / 2;
    }

    y
}

// ============================================================================
// TESTS
// ============================================================================
