//! State structures for the AMM program

pub mod pool;

pub use pool::*;
