//! Infrastructure Layer
//!
//! Adapters implementing the application ports plus the HTTP driver.
//!
//! - [`ledger`]: In-memory value-transfer ledger with escrow
//! - [`matching`]: Pass-through matching engine
//! - [`events`]: Structured-log event publisher
//! - [`http`]: Axum REST API

pub mod events;
pub mod http;
pub mod ledger;
pub mod matching;
