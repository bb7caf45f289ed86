//! Fee Schedule Bounded Context
//!
//! Resolves fee rates and splits collected fees.
//!
//! # Key Concepts
//!
//! - **Fee bracket**: `(min_amount, fee_rate)` tier, inclusive lower bound
//! - **Fee tier table**: strictly ascending brackets, mutated only at the tail
//! - **Settlement split**: fee divided into net fee and identity cashback

pub mod errors;
pub mod fee_tier_table;
pub mod settlement;

pub use errors::FeeScheduleError;
pub use fee_tier_table::{FeeBracket, FeeTierTable, MAX_FEE_RATE};
pub use settlement::{FeeSplit, MAX_CASHBACK_RATE, SettlementSplitter};
