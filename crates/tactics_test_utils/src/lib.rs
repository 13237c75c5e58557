//! # Tactics Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Grid fixtures built from text layouts
//! - Brute-force BFS oracle for cross-checking searches
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod oracle;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
