//! In-memory stand-in for the token program and the runtime's rollback.
//!
//! `TestPool` replays each handler's sequence (quote, move tokens, commit)
//! against a scratch copy of the pool and balances, and only keeps the copy
//! when every step succeeded.

#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::prelude::*;
use constant_product_amm::errors::AmmError;
use constant_product_amm::state::{Pool, SwapDirection};
use constant_product_amm::{DepositQuote, SwapQuote, WithdrawQuote};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Asset {
    A,
    B,
    Lp,
}

#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Custody {
    balances: HashMap<(Pubkey, Asset), u64>,
    lp_supply: u64,
}

impl Custody {
    pub fn balance(&self, owner: &Pubkey, asset: Asset) -> u64 {
        self.balances.get(&(*owner, asset)).copied().unwrap_or(0)
    }

    pub fn lp_supply(&self) -> u64 {
        self.lp_supply
    }

    /// Faucet for test tokens.
    pub fn credit(&mut self, owner: &Pubkey, asset: Asset, amount: u64) {
        *self.balances.entry((*owner, asset)).or_default() += amount;
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, asset: Asset, amount: u64) -> Result<()> {
        let available = self.balance(from, asset);
        require!(available >= amount, AmmError::InsufficientCallerBalance);
        self.balances.insert((*from, asset), available - amount);
        self.credit(to, asset, amount);
        Ok(())
    }

    fn mint_lp(&mut self, to: &Pubkey, amount: u64) {
        self.credit(to, Asset::Lp, amount);
        self.lp_supply += amount;
    }

    fn burn_lp(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let available = self.balance(from, Asset::Lp);
        require!(available >= amount, AmmError::InsufficientLpBalance);
        self.balances.insert((*from, Asset::Lp), available - amount);
        self.lp_supply -= amount;
        Ok(())
    }
}

pub struct TestPool {
    pub pool: Pool,
    pub custody: Custody,
    pub authority: Pubkey,
}

impl TestPool {
    pub fn new(fee_numerator: u64, fee_denominator: u64) -> Result<Self> {
        Pool::validate_fee(fee_numerator, fee_denominator)?;
        let pool = Pool {
            token_a_mint: Pubkey::new_unique(),
            token_b_mint: Pubkey::new_unique(),
            token_a_vault: Pubkey::new_unique(),
            token_b_vault: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            fee_numerator,
            fee_denominator,
            ..Pool::default()
        };
        Ok(Self {
            pool,
            custody: Custody::default(),
            authority: Pubkey::new_unique(),
        })
    }

    /// Live vault balances, the ground truth the handlers price against.
    pub fn vaults(&self) -> (u64, u64) {
        (
            self.custody.balance(&self.authority, Asset::A),
            self.custody.balance(&self.authority, Asset::B),
        )
    }

    pub fn fund(&mut self, owner: &Pubkey, amount_a: u64, amount_b: u64) {
        self.custody.credit(owner, Asset::A, amount_a);
        self.custody.credit(owner, Asset::B, amount_b);
    }

    fn atomically<T>(
        &mut self,
        step: impl FnOnce(&mut Pool, &mut Custody, &Pubkey) -> Result<T>,
    ) -> Result<T> {
        let mut pool = self.pool.clone();
        let mut custody = self.custody.clone();
        let out = step(&mut pool, &mut custody, &self.authority)?;
        self.pool = pool;
        self.custody = custody;
        Ok(out)
    }

    pub fn deposit(&mut self, provider: &Pubkey, desired_a: u64, desired_b: u64) -> Result<DepositQuote> {
        let (reserve_a, reserve_b) = self.vaults();
        self.atomically(|pool, custody, authority| {
            let quote = pool.quote_deposit(reserve_a, reserve_b, desired_a, desired_b)?;
            custody.transfer(provider, authority, Asset::A, quote.take_a)?;
            custody.transfer(provider, authority, Asset::B, quote.take_b)?;
            custody.mint_lp(provider, quote.lp_minted);
            pool.apply_deposit(reserve_a, reserve_b, &quote)?;
            Ok(quote)
        })
    }

    pub fn withdraw(&mut self, provider: &Pubkey, lp_burn: u64) -> Result<WithdrawQuote> {
        let (reserve_a, reserve_b) = self.vaults();
        self.atomically(|pool, custody, authority| {
            let quote = pool.quote_withdrawal(reserve_a, reserve_b, lp_burn)?;
            custody.burn_lp(provider, quote.lp_burned)?;
            custody.transfer(authority, provider, Asset::A, quote.out_a)?;
            custody.transfer(authority, provider, Asset::B, quote.out_b)?;
            pool.apply_withdrawal(reserve_a, reserve_b, &quote)?;
            Ok(quote)
        })
    }

    pub fn swap(
        &mut self,
        trader: &Pubkey,
        direction: SwapDirection,
        input_amount: u64,
        min_output_amount: u64,
    ) -> Result<SwapQuote> {
        let (reserve_a, reserve_b) = self.vaults();
        let (input_reserve, output_reserve) = direction.to_input_output(reserve_a, reserve_b);
        let (input_asset, output_asset) = direction.to_input_output(Asset::A, Asset::B);
        self.atomically(|pool, custody, authority| {
            let quote = pool.quote_swap(input_reserve, output_reserve, input_amount, min_output_amount)?;
            custody.transfer(trader, authority, input_asset, quote.input_amount)?;
            custody.transfer(authority, trader, output_asset, quote.output_amount)?;
            pool.apply_swap(direction, input_reserve, output_reserve, &quote)?;
            Ok(quote)
        })
    }

    /// Pool mirror, vaults and LP ledger must agree after every instruction.
    pub fn assert_consistent(&self) {
        assert_eq!(self.vaults(), (self.pool.reserve_a, self.pool.reserve_b));
        assert_eq!(self.custody.lp_supply(), self.pool.total_lp_issued);
        if self.pool.total_lp_issued > 0 {
            assert!(self.pool.reserve_a > 0 && self.pool.reserve_b > 0);
        }
    }
}
