//! Observability infrastructure
//!
//! Structured logging through `tracing`. Library code only emits events;
//! installing a subscriber is left to the embedding application, which can
//! use [`logging::init_tracing`] for the default setup.

pub mod logging;

pub use logging::init_tracing;
