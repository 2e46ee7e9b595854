//! Shared helpers for the engine's test suites. Currently just the
//! process-wide tracing setup; see [`logging`].

pub mod logging;
