//! Identifier normalization.
//!
//! Free-form identifiers arrive from user input and from provider payloads
//! in every imaginable shape (`https://www.Example.com/`, `Example.com/blog`,
//! `@AcmeHQ`). Cache keys must not care, so everything is canonicalized here
//! before it participates in a fingerprint.

use url::Url;

/// Canonicalizes a domain-like identifier.
///
/// # Normalization Rules
///
/// 1. Leading `http://` / `https://` scheme is stripped
/// 2. A leading `www.` label is stripped
/// 3. Path, query, fragment, port, and userinfo are dropped (host only)
/// 4. The result is lower-cased
///
/// Empty and whitespace-only input yields `None`: "absent" is a distinct
/// value from "empty string provided", which matters when fingerprints are
/// compared. Idempotent: feeding the output back in returns it unchanged.
///
/// # Examples
///
/// ```
/// use provider_cache::utils::normalizer::normalize_domain;
///
/// assert_eq!(normalize_domain("https://Example.com/"), Some("example.com".into()));
/// assert_eq!(normalize_domain("www.example.com/blog?x=1"), Some("example.com".into()));
/// assert_eq!(normalize_domain("   "), None);
/// ```
pub fn normalize_domain(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let bare = strip_scheme(trimmed);

    // Parsing with a synthetic scheme lets the URL standard handle ports,
    // userinfo, and IDN hosts uniformly for scheme-less input.
    let host = match Url::parse(&format!("https://{bare}")) {
        Ok(url) => url.host_str().map(|h| h.to_ascii_lowercase()),
        Err(_) => None,
    };

    let host = host.unwrap_or_else(|| {
        // The parser rejects some things people still paste into forms;
        // fall back to cutting the authority out by hand.
        let end = bare
            .find(['/', '?', '#'])
            .unwrap_or(bare.len());
        bare[..end].to_ascii_lowercase()
    });

    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();

    if host.is_empty() { None } else { Some(host) }
}

/// Canonicalizes a handle-like identifier (social account names).
///
/// Applies the shared rules (scheme strip, `www.` strip, trailing-slash
/// strip, lower-casing) and additionally removes a leading `@`. Unlike
/// [`normalize_domain`] the remainder is kept verbatim; a handle has no
/// path to discard.
///
/// # Examples
///
/// ```
/// use provider_cache::utils::normalizer::normalize_handle;
///
/// assert_eq!(normalize_handle("@AcmeHQ"), Some("acmehq".into()));
/// assert_eq!(normalize_handle("acmehq"), Some("acmehq".into()));
/// assert_eq!(normalize_handle(""), None);
/// ```
pub fn normalize_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let bare = strip_scheme(trimmed);
    let bare = bare.strip_prefix("www.").unwrap_or(bare);
    let bare = bare.trim_end_matches('/');
    let bare = bare.trim_start_matches('@');

    if bare.is_empty() {
        None
    } else {
        Some(bare.to_ascii_lowercase())
    }
}

/// Strips a leading `http://` or `https://`, case-insensitively.
fn strip_scheme(s: &str) -> &str {
    for scheme in ["https://", "http://"] {
        if s.len() >= scheme.len() && s[..scheme.len()].eq_ignore_ascii_case(scheme) {
            return &s[scheme.len()..];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_strips_scheme() {
        assert_eq!(
            normalize_domain("https://example.com"),
            Some("example.com".to_string())
        );
        assert_eq!(
            normalize_domain("http://example.com"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_domain_strips_scheme_case_insensitive() {
        assert_eq!(
            normalize_domain("HTTPS://EXAMPLE.COM"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_domain_strips_www() {
        assert_eq!(
            normalize_domain("www.example.com"),
            Some("example.com".to_string())
        );
        assert_eq!(
            normalize_domain("https://www.example.com"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_domain_strips_path() {
        assert_eq!(
            normalize_domain("example.com/blog/post-1"),
            Some("example.com".to_string())
        );
        assert_eq!(
            normalize_domain("https://example.com/blog?utm=x#top"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_domain_strips_trailing_slash() {
        assert_eq!(
            normalize_domain("example.com/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_domain_strips_port() {
        assert_eq!(
            normalize_domain("example.com:8080"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_domain_lowercases() {
        assert_eq!(
            normalize_domain("ExAmPlE.CoM"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_domain_keeps_subdomains() {
        assert_eq!(
            normalize_domain("https://shop.example.co.uk/cart"),
            Some("shop.example.co.uk".to_string())
        );
    }

    #[test]
    fn test_domain_equivalent_spellings_collapse() {
        let expected = normalize_domain("example.com");
        assert_eq!(normalize_domain("https://Example.com/"), expected);
        assert_eq!(normalize_domain("www.example.com/"), expected);
        assert_eq!(normalize_domain("  HTTP://WWW.EXAMPLE.COM  "), expected);
    }

    #[test]
    fn test_domain_absent_inputs() {
        assert_eq!(normalize_domain(""), None);
        assert_eq!(normalize_domain("   "), None);
        assert_eq!(normalize_domain("\t\n"), None);
    }

    #[test]
    fn test_domain_idempotent() {
        for raw in [
            "https://www.Example.com/path/",
            "EXAMPLE.com",
            "sub.domain.example.com:443/x",
            "münchen.de",
        ] {
            let once = normalize_domain(raw).unwrap();
            assert_eq!(normalize_domain(&once), Some(once.clone()), "raw: {raw}");
        }
    }

    #[test]
    fn test_handle_strips_at() {
        assert_eq!(normalize_handle("@acmehq"), Some("acmehq".to_string()));
        assert_eq!(normalize_handle("acmehq"), Some("acmehq".to_string()));
    }

    #[test]
    fn test_handle_lowercases() {
        assert_eq!(normalize_handle("@AcmeHQ"), Some("acmehq".to_string()));
    }

    #[test]
    fn test_handle_strips_trailing_slash() {
        assert_eq!(normalize_handle("acmehq/"), Some("acmehq".to_string()));
    }

    #[test]
    fn test_handle_absent_inputs() {
        assert_eq!(normalize_handle(""), None);
        assert_eq!(normalize_handle("  "), None);
        assert_eq!(normalize_handle("@"), None);
    }

    #[test]
    fn test_handle_idempotent() {
        for raw in ["@AcmeHQ", "@@double", "handle/", "  @Spaced  "] {
            let once = normalize_handle(raw).unwrap();
            assert_eq!(normalize_handle(&once), Some(once.clone()), "raw: {raw}");
        }
    }
}
