//! Infrastructure layer: implementations of the domain's storage contract.

pub mod persistence;
