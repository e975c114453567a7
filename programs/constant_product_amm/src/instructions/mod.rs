//! Instruction handlers for the AMM program
//!
//! Each instruction represents an action users can take:
//! - `initialize_pool` - Create a pool, its vaults and LP mint for a token pair (once)
//! - `manage_liquidity` - Deposit tokens for LP shares, or burn shares for tokens
//! - `swap` - Trade one pool token for the other

pub mod initialize_pool;
pub mod manage_liquidity;
pub mod swap;

pub use initialize_pool::*;
pub use manage_liquidity::*;
pub use swap::*;
