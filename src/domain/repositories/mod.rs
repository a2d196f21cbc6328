//! Storage trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.

pub mod entry_store;

pub use entry_store::EntryStore;

#[cfg(test)]
pub use entry_store::MockEntryStore;
