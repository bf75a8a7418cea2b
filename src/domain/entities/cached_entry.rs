//! Cached resolution entity.

use chrono::{DateTime, TimeDelta, Utc};

/// The last URL the resolver found, and when it found it.
///
/// `resolved_at` is the wall-clock time of the resolution, not the creation
/// time of the post behind `url`. Only real resolutions are stored here;
/// fallback URLs never are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEntry {
    pub url: String,
    pub resolved_at: DateTime<Utc>,
}

impl CachedEntry {
    pub fn new(url: impl Into<String>, resolved_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            resolved_at,
        }
    }

    /// Returns true while `now` is less than `ttl` past `resolved_at`.
    ///
    /// An entry stamped later than `now` counts as fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now - self.resolved_at < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_boundary() {
        let t0 = Utc::now();
        let ttl = TimeDelta::seconds(60);
        let entry = CachedEntry::new("https://example.com", t0);

        assert!(entry.is_fresh(t0, ttl));
        assert!(entry.is_fresh(t0 + TimeDelta::seconds(59), ttl));
        assert!(!entry.is_fresh(t0 + TimeDelta::seconds(60), ttl));
        assert!(!entry.is_fresh(t0 + TimeDelta::seconds(61), ttl));
    }

    #[test]
    fn test_entry_from_the_future_is_fresh() {
        let t0 = Utc::now();
        let entry = CachedEntry::new("https://example.com", t0);

        assert!(entry.is_fresh(t0 - TimeDelta::seconds(5), TimeDelta::seconds(1)));
    }
}
