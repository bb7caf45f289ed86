//! Event publishing adapters.

mod logging;

pub use logging::LoggingEventPublisher;
