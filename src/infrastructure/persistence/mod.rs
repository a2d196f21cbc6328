//! Concrete entry-store implementations.
//!
//! - [`PgEntryStore`] - PostgreSQL, the production store
//! - [`MemoryEntryStore`] - process-local, for tests and storage-less runs

pub mod memory_entry_store;
pub mod pg_entry_store;

pub use memory_entry_store::MemoryEntryStore;
pub use pg_entry_store::PgEntryStore;
