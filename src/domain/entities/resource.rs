//! Cached resource families.

use chrono::Duration;

/// The resource families the dashboard caches, one storage namespace each.
///
/// Every family shares the same freshness rules; only the TTL supplied at
/// store time differs. The defaults here reflect how quickly each upstream
/// dataset actually moves: a performance audit goes stale within the hour,
/// a competitor comparison holds for a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    SearchConsoleSnapshot,
    BacklinkSummary,
    CompetitorComparison,
    PerformanceAudit,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::SearchConsoleSnapshot,
        ResourceKind::BacklinkSummary,
        ResourceKind::CompetitorComparison,
        ResourceKind::PerformanceAudit,
    ];

    /// Storage namespace for this family. Part of the persisted row key, so
    /// renaming one orphans existing entries until the janitor collects them.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::SearchConsoleSnapshot => "search_console_snapshot",
            Self::BacklinkSummary => "backlink_summary",
            Self::CompetitorComparison => "competitor_comparison",
            Self::PerformanceAudit => "performance_audit",
        }
    }

    /// Default TTL for the family; callers may override per store call.
    pub fn default_ttl(&self) -> Duration {
        match self {
            Self::SearchConsoleSnapshot => Duration::hours(24),
            Self::BacklinkSummary => Duration::hours(24),
            Self::CompetitorComparison => Duration::days(7),
            Self::PerformanceAudit => Duration::hours(1),
        }
    }
}
