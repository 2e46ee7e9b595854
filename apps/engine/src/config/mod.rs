//! Engine configuration, resolved once at startup.

pub mod engine;
