//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per match, newline-delimited.
    Jsonl,
    /// CSV summary only.
    Csv,
}
