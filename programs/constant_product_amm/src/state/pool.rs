//! Liquidity Pool State
//!
//! One pool per unordered token pair. The pool records its configuration and
//! mirrors the vault balances left by the last instruction; the vaults
//! themselves stay the source of truth for pricing.

use anchor_lang::prelude::*;

use crate::amm::{ConstantProductCurve, DepositQuote, SwapQuote, WithdrawQuote};
use crate::errors::AmmError;

/// Decimals of the LP token mint
pub const LP_DECIMALS: u8 = 9;

/// Liquidity pool account
///
/// Seeds: ["liquidity_pool", min(mint_a, mint_b), max(mint_a, mint_b)]
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Pool {
    /// Token A mint address
    pub token_a_mint: Pubkey,

    /// Token B mint address
    pub token_b_mint: Pubkey,

    /// Vault holding token A reserves, owned by the pool authority
    pub token_a_vault: Pubkey,

    /// Vault holding token B reserves, owned by the pool authority
    pub token_b_vault: Pubkey,

    /// LP token mint, mint authority is the pool authority
    pub lp_mint: Pubkey,

    /// Swap fee numerator (e.g., 3 for 0.3% with denominator 1000)
    pub fee_numerator: u64,

    /// Swap fee denominator, never zero once initialized
    pub fee_denominator: u64,

    /// Token A vault balance after the last instruction
    pub reserve_a: u64,

    /// Token B vault balance after the last instruction
    pub reserve_b: u64,

    /// Total LP tokens outstanding across all providers
    pub total_lp_issued: u64,

    /// Bump of the pool authority PDA
    pub authority_bump: u8,

    /// PDA bump seed
    pub bump: u8,
}

impl Pool {
    pub const SEED: &'static [u8] = b"liquidity_pool";
    pub const AUTHORITY_SEED: &'static [u8] = b"pool_authority";
    pub const TOKEN_A_VAULT_SEED: &'static [u8] = b"token_a_vault";
    pub const TOKEN_B_VAULT_SEED: &'static [u8] = b"token_b_vault";
    pub const LP_MINT_SEED: &'static [u8] = b"lp_token_mint";

    pub fn is_initialized(&self) -> bool {
        self.fee_denominator > 0
    }

    pub fn validate_fee(fee_numerator: u64, fee_denominator: u64) -> Result<()> {
        require!(
            fee_denominator > 0 && fee_numerator < fee_denominator,
            AmmError::InvalidFeeConfiguration
        );
        Ok(())
    }

    /// Work out which way a swap runs from the vaults the caller designated.
    pub fn swap_direction(&self, input_vault: &Pubkey, output_vault: &Pubkey) -> Result<SwapDirection> {
        if *input_vault == self.token_a_vault && *output_vault == self.token_b_vault {
            Ok(SwapDirection::AToB)
        } else if *input_vault == self.token_b_vault && *output_vault == self.token_a_vault {
            Ok(SwapDirection::BToA)
        } else {
            err!(AmmError::InvalidVault)
        }
    }

    /// Price a deposit against the given vault balances.
    ///
    /// An empty LP supply means the deposit sets the price; otherwise it must
    /// follow the current reserve ratio.
    pub fn quote_deposit(
        &self,
        reserve_a: u64,
        reserve_b: u64,
        desired_a: u64,
        desired_b: u64,
    ) -> Result<DepositQuote> {
        require!(self.is_initialized(), AmmError::PoolNotInitialized);

        if self.total_lp_issued == 0 {
            require!(
                desired_a > 0 && desired_b > 0,
                AmmError::ZeroOrNegativeAmount
            );
            // Tokens sent straight to an unclaimed vault join the first position
            let pooled = ConstantProductCurve::compute_initial_deposit(
                reserve_a.checked_add(desired_a).ok_or(AmmError::MathOverflow)?,
                reserve_b.checked_add(desired_b).ok_or(AmmError::MathOverflow)?,
            )?;
            Ok(DepositQuote {
                take_a: desired_a,
                take_b: desired_b,
                lp_minted: pooled.lp_minted,
            })
        } else {
            ConstantProductCurve::compute_subsequent_deposit(
                desired_a,
                desired_b,
                reserve_a,
                reserve_b,
                self.total_lp_issued,
            )
        }
    }

    pub fn quote_withdrawal(
        &self,
        reserve_a: u64,
        reserve_b: u64,
        lp_burn: u64,
    ) -> Result<WithdrawQuote> {
        require!(self.is_initialized(), AmmError::PoolNotInitialized);
        ConstantProductCurve::compute_withdrawal(lp_burn, reserve_a, reserve_b, self.total_lp_issued)
    }

    pub fn quote_swap(
        &self,
        input_reserve: u64,
        output_reserve: u64,
        input_amount: u64,
        min_output_amount: u64,
    ) -> Result<SwapQuote> {
        require!(self.is_initialized(), AmmError::PoolNotInitialized);
        ConstantProductCurve::compute_swap(
            input_amount,
            input_reserve,
            output_reserve,
            self.fee_numerator,
            self.fee_denominator,
            min_output_amount,
        )
    }

    /// Record a completed deposit. `reserve_a`/`reserve_b` are the vault
    /// balances the quote was priced against.
    pub fn apply_deposit(&mut self, reserve_a: u64, reserve_b: u64, quote: &DepositQuote) -> Result<()> {
        let reserve_a = reserve_a
            .checked_add(quote.take_a)
            .ok_or(AmmError::MathOverflow)?;
        let reserve_b = reserve_b
            .checked_add(quote.take_b)
            .ok_or(AmmError::MathOverflow)?;
        let total_lp_issued = self
            .total_lp_issued
            .checked_add(quote.lp_minted)
            .ok_or(AmmError::MathOverflow)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.total_lp_issued = total_lp_issued;
        Ok(())
    }

    pub fn apply_withdrawal(&mut self, reserve_a: u64, reserve_b: u64, quote: &WithdrawQuote) -> Result<()> {
        let reserve_a = reserve_a
            .checked_sub(quote.out_a)
            .ok_or(AmmError::MathOverflow)?;
        let reserve_b = reserve_b
            .checked_sub(quote.out_b)
            .ok_or(AmmError::MathOverflow)?;
        let total_lp_issued = self
            .total_lp_issued
            .checked_sub(quote.lp_burned)
            .ok_or(AmmError::InsufficientLpBalance)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.total_lp_issued = total_lp_issued;
        Ok(())
    }

    pub fn apply_swap(
        &mut self,
        direction: SwapDirection,
        input_reserve: u64,
        output_reserve: u64,
        quote: &SwapQuote,
    ) -> Result<()> {
        let input_reserve = input_reserve
            .checked_add(quote.input_amount)
            .ok_or(AmmError::MathOverflow)?;
        let output_reserve = output_reserve
            .checked_sub(quote.output_amount)
            .ok_or(AmmError::ReserveExhausted)?;

        let (reserve_a, reserve_b) = direction.to_pool_order(input_reserve, output_reserve);
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        Ok(())
    }
}

/// Which way a swap moves through the pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SwapDirection {
    /// Sell token A, receive token B
    AToB,
    /// Sell token B, receive token A
    BToA,
}

impl SwapDirection {
    /// Split pool-ordered values into (input side, output side).
    pub fn to_input_output<T>(self, a: T, b: T) -> (T, T) {
        match self {
            SwapDirection::AToB => (a, b),
            SwapDirection::BToA => (b, a),
        }
    }

    /// Inverse of [`SwapDirection::to_input_output`].
    pub fn to_pool_order<T>(self, input: T, output: T) -> (T, T) {
        match self {
            SwapDirection::AToB => (input, output),
            SwapDirection::BToA => (output, input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn pool(fee_numerator: u64, fee_denominator: u64) -> Pool {
        Pool {
            token_a_mint: Pubkey::new_unique(),
            token_b_mint: Pubkey::new_unique(),
            token_a_vault: Pubkey::new_unique(),
            token_b_vault: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            fee_numerator,
            fee_denominator,
            ..Pool::default()
        }
    }

    #[test]
    fn test_validate_fee() {
        assert!(Pool::validate_fee(0, 1).is_ok());
        assert!(Pool::validate_fee(3, 1000).is_ok());
        assert_eq!(
            Pool::validate_fee(1000, 1000).unwrap_err(),
            Error::from(AmmError::InvalidFeeConfiguration)
        );
        assert_eq!(
            Pool::validate_fee(0, 0).unwrap_err(),
            Error::from(AmmError::InvalidFeeConfiguration)
        );
    }

    #[test]
    fn test_uninitialized_pool_refuses_quotes() {
        let pool = Pool::default();
        assert!(!pool.is_initialized());
        assert_eq!(
            pool.quote_deposit(0, 0, 10, 10).unwrap_err(),
            Error::from(AmmError::PoolNotInitialized)
        );
        assert_eq!(
            pool.quote_swap(10, 10, 1, 0).unwrap_err(),
            Error::from(AmmError::PoolNotInitialized)
        );
    }

    #[test]
    fn test_swap_direction_from_vaults() {
        let pool = pool(1, 10_000);
        assert_eq!(
            pool.swap_direction(&pool.token_a_vault, &pool.token_b_vault).unwrap(),
            SwapDirection::AToB
        );
        assert_eq!(
            pool.swap_direction(&pool.token_b_vault, &pool.token_a_vault).unwrap(),
            SwapDirection::BToA
        );
        assert_eq!(
            pool.swap_direction(&pool.token_a_vault, &pool.token_a_vault).unwrap_err(),
            Error::from(AmmError::InvalidVault)
        );
        assert_eq!(
            pool.swap_direction(&Pubkey::new_unique(), &pool.token_b_vault).unwrap_err(),
            Error::from(AmmError::InvalidVault)
        );
    }

    #[test]
    fn test_first_deposit_then_ratio_deposit() {
        let mut pool = pool(1, 10_000);

        let quote = pool.quote_deposit(0, 0, 50, 50).unwrap();
        pool.apply_deposit(0, 0, &quote).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b, pool.total_lp_issued), (50, 50, 50));

        let quote = pool.quote_deposit(50, 50, 50, 50).unwrap();
        pool.apply_deposit(50, 50, &quote).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b, pool.total_lp_issued), (100, 100, 100));

        let quote = pool.quote_deposit(100, 100, 25, 100).unwrap();
        pool.apply_deposit(100, 100, &quote).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b, pool.total_lp_issued), (125, 125, 125));
    }

    #[test]
    fn test_full_withdrawal_resets_to_initial_deposit() {
        let mut pool = pool(1, 10_000);
        let quote = pool.quote_deposit(0, 0, 40, 90).unwrap();
        pool.apply_deposit(0, 0, &quote).unwrap();
        assert_eq!(pool.total_lp_issued, 60);

        let quote = pool.quote_withdrawal(40, 90, 60).unwrap();
        pool.apply_withdrawal(40, 90, &quote).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b, pool.total_lp_issued), (0, 0, 0));

        // next provider sets a fresh price
        let quote = pool.quote_deposit(0, 0, 10, 1000).unwrap();
        assert_eq!(quote.lp_minted, 100);
    }

    #[test]
    fn test_first_deposit_claims_stray_vault_balance() {
        let mut pool = pool(1, 10_000);

        // 1000 A landed in the vault before anyone deposited
        let quote = pool.quote_deposit(1_000, 0, 100, 100).unwrap();
        assert_eq!((quote.take_a, quote.take_b), (100, 100));
        assert_eq!(quote.lp_minted, 331);
        pool.apply_deposit(1_000, 0, &quote).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b, pool.total_lp_issued), (1_100, 100, 331));

        // the single provider can take all of it back out
        let quote = pool.quote_withdrawal(1_100, 100, 331).unwrap();
        assert_eq!((quote.out_a, quote.out_b), (1_100, 100));

        assert_eq!(
            self::pool(1, 10_000).quote_deposit(1_000, 0, 0, 100).unwrap_err(),
            Error::from(AmmError::ZeroOrNegativeAmount)
        );
    }

    #[test]
    fn test_swap_updates_reserves_in_both_directions() {
        let mut pool = pool(1, 10_000);
        pool.reserve_a = 75;
        pool.reserve_b = 75;
        pool.total_lp_issued = 75;

        let direction = SwapDirection::AToB;
        let (input_reserve, output_reserve) = direction.to_input_output(pool.reserve_a, pool.reserve_b);
        let quote = pool.quote_swap(input_reserve, output_reserve, 10, 0).unwrap();
        pool.apply_swap(direction, input_reserve, output_reserve, &quote).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b), (85, 67));

        let direction = SwapDirection::BToA;
        let (input_reserve, output_reserve) = direction.to_input_output(pool.reserve_a, pool.reserve_b);
        let quote = pool.quote_swap(input_reserve, output_reserve, 8, 0).unwrap();
        pool.apply_swap(direction, input_reserve, output_reserve, &quote).unwrap();
        assert_eq!(pool.reserve_b, 75);
        assert_eq!(pool.reserve_a, 85 - quote.output_amount);
        assert!(pool.reserve_a * pool.reserve_b >= 85 * 67);
    }
}
