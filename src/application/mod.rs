//! Application layer: the cache façade and the background janitor.

pub mod janitor;
pub mod services;

pub use janitor::Janitor;
pub use services::{CacheService, Lookup};
