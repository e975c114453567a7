//! Token Swaps
//!
//! Sells one pool token for the other along the constant product curve.
//! The direction comes from which pool vault the trader passes as input and
//! which as output; pricing itself only sees "input reserve" and
//! "output reserve".

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::AmmError;
use crate::state::{Pool, SwapDirection};

/// Event emitted after every swap
#[event]
pub struct TokensSwapped {
    pub pool: Pubkey,
    pub trader: Pubkey,
    pub direction: SwapDirection,
    pub input_amount: u64,
    pub output_amount: u64,
    pub fee_amount: u64,
}

/// Accounts for a swap in either direction
#[derive(Accounts)]
pub struct SwapTokens<'info> {
    /// Trader
    pub trader: Signer<'info>,

    /// Pool being traded against
    #[account(
        mut,
        seeds = [
            Pool::SEED,
            input_mint.key().min(output_mint.key()).as_ref(),
            input_mint.key().max(output_mint.key()).as_ref(),
        ],
        bump = pool.bump,
        constraint = pool.is_initialized() @ AmmError::PoolNotInitialized,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: PDA signer for the vaults
    #[account(
        seeds = [Pool::AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    /// Mint of the token being sold
    pub input_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Mint of the token being bought
    pub output_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Vault receiving the input tokens
    #[account(
        mut,
        token::mint = input_mint,
        token::authority = pool_authority,
    )]
    pub input_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Vault paying out the output tokens
    #[account(
        mut,
        token::mint = output_mint,
        token::authority = pool_authority,
    )]
    pub output_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Trader's account for the token being sold
    #[account(
        mut,
        token::mint = input_mint,
        token::authority = trader,
    )]
    pub trader_input: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Trader's account for the token being bought
    #[account(
        mut,
        token::mint = output_mint,
        token::authority = trader,
    )]
    pub trader_output: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> SwapTokens<'info> {
    /// Swap `input_amount` for at least `min_output_amount`, returning the
    /// amount paid out
    pub fn swap_tokens(&mut self, input_amount: u64, min_output_amount: u64) -> Result<u64> {
        let direction = self
            .pool
            .swap_direction(&self.input_vault.key(), &self.output_vault.key())?;

        require!(input_amount > 0, AmmError::ZeroOrNegativeAmount);
        require!(
            self.trader_input.amount >= input_amount,
            AmmError::InsufficientCallerBalance
        );

        let input_reserve = self.input_vault.amount;
        let output_reserve = self.output_vault.amount;

        let quote = self.pool.quote_swap(
            input_reserve,
            output_reserve,
            input_amount,
            min_output_amount,
        )?;

        msg!(
            "Swap details - Input: {}, Fee: {}, Net input: {}",
            quote.input_amount,
            quote.fee_amount,
            quote.effective_input
        );

        // Transfer input tokens (including fee) from trader to vault
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_input.to_account_info(),
                    mint: self.input_mint.to_account_info(),
                    to: self.input_vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            quote.input_amount,
            self.input_mint.decimals,
        )?;

        // Transfer output tokens from vault to trader
        let pool_key = self.pool.key();
        let authority_seeds = &[
            Pool::AUTHORITY_SEED,
            pool_key.as_ref(),
            &[self.pool.authority_bump],
        ];
        let signer_seeds = &[&authority_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.output_vault.to_account_info(),
                    mint: self.output_mint.to_account_info(),
                    to: self.trader_output.to_account_info(),
                    authority: self.pool_authority.to_account_info(),
                },
                signer_seeds,
            ),
            quote.output_amount,
            self.output_mint.decimals,
        )?;

        self.pool
            .apply_swap(direction, input_reserve, output_reserve, &quote)?;

        msg!(
            "Swap completed - Input: {}, Output: {}",
            quote.input_amount,
            quote.output_amount
        );

        emit!(TokensSwapped {
            pool: pool_key,
            trader: self.trader.key(),
            direction,
            input_amount: quote.input_amount,
            output_amount: quote.output_amount,
            fee_amount: quote.fee_amount,
        });

        Ok(quote.output_amount)
    }
}
