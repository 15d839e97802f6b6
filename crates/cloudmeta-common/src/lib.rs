//! Shared domain types for the cloudmeta schema crates.

pub mod types;
