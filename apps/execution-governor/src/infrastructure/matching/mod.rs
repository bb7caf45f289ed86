//! Matching engine adapters.

mod pass_through;

pub use pass_through::PassThroughMatchingEngine;
