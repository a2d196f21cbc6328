//! Utility functions shared across the crate.
//!
//! - [`normalizer`] - Domain and social-handle canonicalization

pub mod normalizer;
