//! # Automated Market Maker (AMM) Module
//!
//! Pure pricing math for the pool. Nothing in here touches accounts; the
//! instruction handlers feed in vault balances and act on the returned quote.
//!
//! ## The Constant Product AMM
//!
//! ```text
//!            k = A × B
//!
//!   ┌────────────────────────────────────────┐
//!   │            Reserve Space               │
//!   │                                         │
//!   │     B ▲                                │
//!   │       │╲                               │
//!   │       │ ╲                              │
//!   │       │   ╲__      k = constant        │
//!   │       │      ╲____                     │
//!   │       │           ╲________            │
//!   │       └────────────────────▶ A         │
//!   │                                         │
//!   │  Swaps slide along the curve           │
//!   │  Fees push the pool onto a higher k    │
//!   └────────────────────────────────────────┘
//! ```

pub mod constant_product;

pub use constant_product::*;
