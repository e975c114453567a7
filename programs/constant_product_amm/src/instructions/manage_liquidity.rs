//! Liquidity Management
//!
//! Providers add both tokens at the pool's current ratio and receive LP
//! tokens, or burn LP tokens for their proportional share of each reserve.
//!
//! ## Share Calculation
//!
//! ```text
//! deposit:   lp_out = total_lp × take_a / reserve_a
//! withdraw:  a_out  = reserve_a × lp_in / total_lp
//!            b_out  = reserve_b × lp_in / total_lp
//! ```
//!
//! For example:
//! - Pool holds 85 A and 67 B with 75 LP outstanding
//! - Burning 50 LP returns ⌊85 × 50 / 75⌋ = 56 A and ⌊67 × 50 / 75⌋ = 44 B
//! - The fractions stay in the vaults for the remaining providers

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn, mint_to, transfer_checked, Burn, Mint, MintTo, TokenAccount, TokenInterface,
    TransferChecked,
};

use crate::errors::AmmError;
use crate::state::Pool;

/// Event emitted when liquidity is added
#[event]
pub struct LiquidityDeposited {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub lp_minted: u64,
    pub total_lp_issued: u64,
}

/// Event emitted when liquidity is removed
#[event]
pub struct LiquidityWithdrawn {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub lp_burned: u64,
    pub total_lp_issued: u64,
}

/// Accounts for depositing and withdrawing liquidity
#[derive(Accounts)]
pub struct ManageLiquidity<'info> {
    /// Liquidity provider
    pub provider: Signer<'info>,

    /// Pool state account
    #[account(
        mut,
        seeds = [
            Pool::SEED,
            token_a_mint.key().min(token_b_mint.key()).as_ref(),
            token_a_mint.key().max(token_b_mint.key()).as_ref(),
        ],
        bump = pool.bump,
        has_one = token_a_mint,
        has_one = token_b_mint,
        has_one = token_a_vault,
        has_one = token_b_vault,
        has_one = lp_mint,
        constraint = pool.is_initialized() @ AmmError::PoolNotInitialized,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: PDA signer for the vaults and the LP mint
    #[account(
        seeds = [Pool::AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    pub token_a_mint: Box<InterfaceAccount<'info, Mint>>,

    pub token_b_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Provider's token A account
    #[account(
        mut,
        token::mint = token_a_mint,
        token::authority = provider,
    )]
    pub provider_token_a: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Provider's token B account
    #[account(
        mut,
        token::mint = token_b_mint,
        token::authority = provider,
    )]
    pub provider_token_b: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Provider's LP token account
    #[account(
        mut,
        token::mint = lp_mint,
        token::authority = provider,
    )]
    pub provider_lp: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ManageLiquidity<'info> {
    /// Add liquidity, taking at most the desired amounts
    pub fn deposit_liquidity(
        &mut self,
        desired_amount_a: u64,
        desired_amount_b: u64,
    ) -> Result<()> {
        let reserve_a = self.token_a_vault.amount;
        let reserve_b = self.token_b_vault.amount;

        msg!(
            "Current vault balances - Token A: {}, Token B: {}",
            reserve_a,
            reserve_b
        );

        let quote = self.pool.quote_deposit(
            reserve_a,
            reserve_b,
            desired_amount_a,
            desired_amount_b,
        )?;

        require!(
            self.provider_token_a.amount >= quote.take_a,
            AmmError::InsufficientCallerBalance
        );
        require!(
            self.provider_token_b.amount >= quote.take_b,
            AmmError::InsufficientCallerBalance
        );

        // Transfer both sides from provider to vaults
        self.transfer_to_vault(
            &self.provider_token_a,
            &self.token_a_vault,
            &self.token_a_mint,
            quote.take_a,
        )?;
        self.transfer_to_vault(
            &self.provider_token_b,
            &self.token_b_vault,
            &self.token_b_mint,
            quote.take_b,
        )?;

        // Mint LP tokens to provider
        let pool_key = self.pool.key();
        let authority_seeds = &[
            Pool::AUTHORITY_SEED,
            pool_key.as_ref(),
            &[self.pool.authority_bump],
        ];
        let signer_seeds = &[&authority_seeds[..]];

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.lp_mint.to_account_info(),
                    to: self.provider_lp.to_account_info(),
                    authority: self.pool_authority.to_account_info(),
                },
                signer_seeds,
            ),
            quote.lp_minted,
        )?;

        self.pool.apply_deposit(reserve_a, reserve_b, &quote)?;

        msg!(
            "Liquidity added - Token A: {}, Token B: {}, LP tokens: {}",
            quote.take_a,
            quote.take_b,
            quote.lp_minted
        );

        emit!(LiquidityDeposited {
            pool: pool_key,
            provider: self.provider.key(),
            amount_a: quote.take_a,
            amount_b: quote.take_b,
            lp_minted: quote.lp_minted,
            total_lp_issued: self.pool.total_lp_issued,
        });

        Ok(())
    }

    /// Remove liquidity by burning LP tokens
    pub fn withdraw_liquidity(&mut self, lp_burn_amount: u64) -> Result<()> {
        require!(lp_burn_amount > 0, AmmError::ZeroOrNegativeAmount);
        require!(
            self.provider_lp.amount >= lp_burn_amount,
            AmmError::InsufficientLpBalance
        );

        let reserve_a = self.token_a_vault.amount;
        let reserve_b = self.token_b_vault.amount;

        let quote = self
            .pool
            .quote_withdrawal(reserve_a, reserve_b, lp_burn_amount)?;

        // Burn LP tokens
        burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.lp_mint.to_account_info(),
                    from: self.provider_lp.to_account_info(),
                    authority: self.provider.to_account_info(),
                },
            ),
            quote.lp_burned,
        )?;

        let pool_key = self.pool.key();
        let authority_seeds = &[
            Pool::AUTHORITY_SEED,
            pool_key.as_ref(),
            &[self.pool.authority_bump],
        ];
        let signer_seeds = &[&authority_seeds[..]];

        self.transfer_from_vault(
            &self.token_a_vault,
            &self.provider_token_a,
            &self.token_a_mint,
            quote.out_a,
            signer_seeds,
        )?;
        self.transfer_from_vault(
            &self.token_b_vault,
            &self.provider_token_b,
            &self.token_b_mint,
            quote.out_b,
            signer_seeds,
        )?;

        self.pool.apply_withdrawal(reserve_a, reserve_b, &quote)?;

        msg!(
            "Liquidity removed - Token A: {}, Token B: {}, LP tokens burned: {}",
            quote.out_a,
            quote.out_b,
            quote.lp_burned
        );

        emit!(LiquidityWithdrawn {
            pool: pool_key,
            provider: self.provider.key(),
            amount_a: quote.out_a,
            amount_b: quote.out_b,
            lp_burned: quote.lp_burned,
            total_lp_issued: self.pool.total_lp_issued,
        });

        Ok(())
    }

    fn transfer_to_vault(
        &self,
        from: &InterfaceAccount<'info, TokenAccount>,
        vault: &InterfaceAccount<'info, TokenAccount>,
        mint: &InterfaceAccount<'info, Mint>,
        amount: u64,
    ) -> Result<()> {
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: from.to_account_info(),
                    mint: mint.to_account_info(),
                    to: vault.to_account_info(),
                    authority: self.provider.to_account_info(),
                },
            ),
            amount,
            mint.decimals,
        )
    }

    fn transfer_from_vault(
        &self,
        vault: &InterfaceAccount<'info, TokenAccount>,
        to: &InterfaceAccount<'info, TokenAccount>,
        mint: &InterfaceAccount<'info, Mint>,
        amount: u64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: vault.to_account_info(),
                    mint: mint.to_account_info(),
                    to: to.to_account_info(),
                    authority: self.pool_authority.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            mint.decimals,
        )
    }
}
