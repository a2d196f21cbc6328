//! Cache key construction.
//!
//! A fingerprint identifies one cached analysis: the owning account, the
//! entity pair under analysis (own domain, optional target domain), and any
//! discriminating context such as social handles. Two analyses of the same
//! domain pair under different social-handle context are distinct entries,
//! so discriminators participate in the key by name.

use std::collections::BTreeMap;
use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::{CacheError, CacheResult};
use crate::utils::normalizer::{normalize_domain, normalize_handle};

/// Opaque lookup key for one cache entry.
///
/// Internally a hex-encoded SHA-256 digest of the canonical key composition,
/// which keeps the persisted key fixed-width and stable across process
/// restarts regardless of how long the underlying identifiers are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Builds a fingerprint from its identity components.
    ///
    /// All entity values pass through [`normalize_domain`] and discriminator
    /// values through [`normalize_handle`] first, so equivalent spellings of
    /// the same identifier collapse to one key. Discriminators are sorted by
    /// name before composition, so insertion order never affects the result,
    /// and a discriminator whose value normalizes to absent is excluded
    /// entirely, making "absent" and "present" never compare equal.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidInput`] when `subject_id` or
    /// `primary_entity` is absent after normalization.
    pub fn build(
        subject_id: &str,
        primary_entity: &str,
        secondary_entity: Option<&str>,
        discriminators: &[(&str, &str)],
    ) -> CacheResult<Self> {
        let subject = subject_id.trim();
        if subject.is_empty() {
            return Err(CacheError::invalid_input("subject_id"));
        }

        let primary = normalize_domain(primary_entity)
            .ok_or(CacheError::invalid_input("primary_entity"))?;

        let secondary = secondary_entity.and_then(normalize_domain);

        // BTreeMap gives name-sorted iteration; duplicate names collapse.
        let discriminators: BTreeMap<&str, String> = discriminators
            .iter()
            .filter_map(|(name, value)| normalize_handle(value).map(|v| (*name, v)))
            .collect();

        let mut canonical = format!("s:{subject}\np:{primary}\n");
        if let Some(secondary) = &secondary {
            canonical.push_str(&format!("q:{secondary}\n"));
        }
        for (name, value) in &discriminators {
            canonical.push_str(&format!("d:{name}={value}\n"));
        }

        let digest = Sha256::digest(canonical.as_bytes());
        Ok(Self(hex::encode(digest)))
    }

    /// Wraps an already-computed digest, e.g. when reading a row back from
    /// storage. No validation is performed.
    pub fn from_digest(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
