//! Program Errors
//!
//! Every handler validates before touching a vault or the LP mint, so any of
//! these aborts the instruction with no side effects.

use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    #[msg("Fee numerator must be smaller than a non-zero fee denominator")]
    InvalidFeeConfiguration,
    #[msg("A pool already exists for this token pair")]
    PoolAlreadyExists,
    #[msg("Pool has not been initialized or holds no liquidity")]
    PoolNotInitialized,
    #[msg("Amount must be greater than zero")]
    ZeroOrNegativeAmount,
    #[msg("Insufficient balance in caller's token account")]
    InsufficientCallerBalance,
    #[msg("Amounts too small to yield a non-zero amount on one side of the pool")]
    RatioComputationUnderflow,
    #[msg("Attempting to burn more LP tokens than available")]
    InsufficientLpBalance,
    #[msg("Output amount is below the requested minimum")]
    SlippageExceeded,
    #[msg("Swap would drain the output reserve")]
    ReserveExhausted,
    #[msg("Calculated LP token mint amount is zero")]
    InvalidLpTokenAmount,
    #[msg("Arithmetic overflow")]
    MathOverflow,
    #[msg("Token A and token B must be different mints")]
    IdenticalMints,
    #[msg("Vault does not belong to this pool")]
    InvalidVault,
    #[msg("Constant product decreased")]
    InvariantViolation,
}
