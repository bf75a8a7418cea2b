//! Discussion thread resolution.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::domain::entities::CandidatePost;
use crate::domain::sources::CandidateSource;
use crate::error::ResolveError;

/// Selection policy for the thread a deployment redirects to.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Community searched upstream (e.g. a subreddit name).
    pub community: String,
    /// Account that posts the thread. Compared case-insensitively.
    pub author: String,
    /// Substring the title must contain. Also used as the upstream search query.
    pub title: String,
    /// Posts older than `now - recency_window` are ignored.
    pub recency_window: TimeDelta,
    /// Result-count limit passed upstream.
    pub search_limit: u32,
    /// Redirect target when nothing matches or the upstream fails.
    pub fallback_url: String,
}

impl ResolverSettings {
    /// Oldest creation time still inside the recency window as of `now`.
    ///
    /// Clamps to the earliest representable time instead of overflowing.
    pub fn not_before(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.recency_window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Outcome of a resolution pass.
///
/// Both variants carry a usable redirect target; the cache only stores
/// [`Resolution::Found`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    Fallback(String),
}

/// Picks the newest matching post out of the upstream listing.
pub struct ThreadResolver<S: CandidateSource + ?Sized> {
    source: Arc<S>,
    settings: ResolverSettings,
}

impl<S: CandidateSource + ?Sized> ThreadResolver<S> {
    /// Creates a new resolver over `source`.
    pub fn new(source: Arc<S>, settings: ResolverSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolves the current thread URL as of `now`.
    ///
    /// Never fails: upstream errors and empty results both produce
    /// [`Resolution::Fallback`] with the configured fallback URL.
    pub async fn resolve(&self, now: DateTime<Utc>) -> Resolution {
        match self.try_resolve(now).await {
            Ok(url) => {
                debug!("Resolved thread: {}", url);
                Resolution::Found(url)
            }
            Err(e) => {
                warn!("{}; using fallback {}", e, self.settings.fallback_url);
                Resolution::Fallback(self.settings.fallback_url.clone())
            }
        }
    }

    /// Resolves the current thread URL, reporting why nothing was found.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Upstream`] if the source call fails.
    /// Returns [`ResolveError::NoMatch`] if no post passes the filter.
    pub async fn try_resolve(&self, now: DateTime<Utc>) -> Result<String, ResolveError> {
        let s = &self.settings;
        let posts = self
            .source
            .search(&s.community, &s.title, s.search_limit)
            .await?;

        debug!("Upstream returned {} candidates", posts.len());

        select_latest(&posts, &s.author, &s.title, s.not_before(now))
            .map(|post| post.url.clone())
            .ok_or_else(|| ResolveError::NoMatch {
                author: s.author.clone(),
                title: s.title.clone(),
                window_hours: s.recency_window.num_hours(),
            })
    }
}

/// Returns the newest post by `author` whose title contains `title` and that
/// was created at or after `not_before`.
///
/// Ties on `created_at` go to the post seen first.
pub fn select_latest<'a>(
    posts: &'a [CandidatePost],
    author: &str,
    title: &str,
    not_before: DateTime<Utc>,
) -> Option<&'a CandidatePost> {
    posts
        .iter()
        .filter(|p| p.is_by(author) && p.title_contains(title) && p.created_at >= not_before)
        .fold(None, |best: Option<&CandidatePost>, p| match best {
            Some(b) if b.created_at >= p.created_at => Some(b),
            _ => Some(p),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sources::MockCandidateSource;
    use crate::error::UpstreamError;
    use chrono::TimeZone;

    const FALLBACK: &str = "https://www.reddit.com/r/neoliberal";

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn post(author: Option<&str>, title: &str, url: &str, created_at: DateTime<Utc>) -> CandidatePost {
        CandidatePost::new(author.map(str::to_string), title, url, created_at)
    }

    fn settings() -> ResolverSettings {
        ResolverSettings {
            community: "neoliberal".to_string(),
            author: "X".to_string(),
            title: "Discussion Thread".to_string(),
            recency_window: TimeDelta::hours(36),
            search_limit: 25,
            fallback_url: FALLBACK.to_string(),
        }
    }

    fn resolver_returning(posts: Vec<CandidatePost>) -> ThreadResolver<MockCandidateSource> {
        let mut source = MockCandidateSource::new();
        source
            .expect_search()
            .times(1)
            .returning(move |_, _, _| Ok(posts.clone()));
        ThreadResolver::new(Arc::new(source), settings())
    }

    #[test]
    fn test_select_skips_newer_posts_failing_author_or_title() {
        let posts = vec![
            post(Some("X"), "Discussion Thread #5", "https://a", t0()),
            post(Some("Y"), "Discussion Thread #6", "https://b", t0() + TimeDelta::seconds(1)),
            post(Some("X"), "Unrelated", "https://c", t0() + TimeDelta::seconds(2)),
        ];

        let selected = select_latest(&posts, "X", "Discussion Thread", t0() - TimeDelta::hours(1));

        assert_eq!(selected.map(|p| p.url.as_str()), Some("https://a"));
    }

    #[test]
    fn test_select_picks_newest_regardless_of_order() {
        let posts = vec![
            post(Some("X"), "Discussion Thread", "https://old", t0()),
            post(Some("X"), "Discussion Thread", "https://new", t0() + TimeDelta::hours(2)),
            post(Some("X"), "Discussion Thread", "https://mid", t0() + TimeDelta::hours(1)),
        ];

        let selected = select_latest(&posts, "x", "discussion thread", t0() - TimeDelta::hours(1));

        assert_eq!(selected.map(|p| p.url.as_str()), Some("https://new"));
    }

    #[test]
    fn test_select_tie_goes_to_first_seen() {
        let posts = vec![
            post(Some("X"), "Discussion Thread", "https://first", t0()),
            post(Some("X"), "Discussion Thread", "https://second", t0()),
        ];

        let selected = select_latest(&posts, "X", "Discussion Thread", t0());

        assert_eq!(selected.map(|p| p.url.as_str()), Some("https://first"));
    }

    #[test]
    fn test_recency_boundary_is_inclusive() {
        let window = TimeDelta::hours(36);
        let now = t0();
        let at_boundary = vec![post(Some("X"), "Discussion Thread", "https://edge", now - window)];
        let past_boundary = vec![post(
            Some("X"),
            "Discussion Thread",
            "https://stale",
            now - window - TimeDelta::seconds(1),
        )];

        assert!(select_latest(&at_boundary, "X", "Discussion Thread", now - window).is_some());
        assert!(select_latest(&past_boundary, "X", "Discussion Thread", now - window).is_none());
    }

    #[test]
    fn test_deleted_author_is_skipped() {
        let posts = vec![
            post(None, "Discussion Thread", "https://deleted", t0() + TimeDelta::hours(1)),
            post(Some("X"), "Discussion Thread", "https://real", t0()),
        ];

        let selected = select_latest(&posts, "X", "Discussion Thread", t0() - TimeDelta::hours(1));

        assert_eq!(selected.map(|p| p.url.as_str()), Some("https://real"));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let resolver = resolver_returning(vec![post(
            Some("X"),
            "Discussion Thread",
            "https://www.reddit.com/r/neoliberal/comments/abc/",
            t0() - TimeDelta::hours(3),
        )]);

        let result = resolver.resolve(t0()).await;

        assert_eq!(
            result,
            Resolution::Found("https://www.reddit.com/r/neoliberal/comments/abc/".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_passes_settings_upstream() {
        let mut source = MockCandidateSource::new();
        source
            .expect_search()
            .withf(|community, query, limit| {
                community == "neoliberal" && query == "Discussion Thread" && *limit == 25
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![]));
        let resolver = ThreadResolver::new(Arc::new(source), settings());

        resolver.resolve(t0()).await;
    }

    #[tokio::test]
    async fn test_resolve_no_match_falls_back() {
        let resolver = resolver_returning(vec![post(
            Some("X"),
            "Discussion Thread",
            "https://too-old",
            t0() - TimeDelta::hours(48),
        )]);

        let result = resolver.resolve(t0()).await;

        assert_eq!(result, Resolution::Fallback(FALLBACK.to_string()));
    }

    #[tokio::test]
    async fn test_try_resolve_reports_no_match() {
        let resolver = resolver_returning(vec![]);

        let result = resolver.try_resolve(t0()).await;

        assert!(matches!(result, Err(ResolveError::NoMatch { window_hours: 36, .. })));
    }

    #[tokio::test]
    async fn test_resolve_upstream_error_falls_back() {
        let mut source = MockCandidateSource::new();
        source
            .expect_search()
            .times(1)
            .returning(|_, _, _| Err(UpstreamError::Transport("connection reset".to_string())));
        let resolver = ThreadResolver::new(Arc::new(source), settings());

        let result = resolver.resolve(t0()).await;

        assert_eq!(result, Resolution::Fallback(FALLBACK.to_string()));
    }

    #[test]
    fn test_not_before_clamps_huge_window() {
        let mut settings = settings();
        settings.recency_window = TimeDelta::MAX;

        assert_eq!(settings.not_before(t0()), DateTime::<Utc>::MIN_UTC);
    }

    #[tokio::test]
    async fn test_huge_window_resolves_without_overflow() {
        let mut source = MockCandidateSource::new();
        source.expect_search().times(1).returning(|_, _, _| {
            Ok(vec![post(
                Some("X"),
                "Discussion Thread",
                "https://ancient",
                Utc.with_ymd_and_hms(2008, 1, 1, 0, 0, 0).unwrap(),
            )])
        });
        let mut settings = settings();
        settings.recency_window = TimeDelta::MAX;
        let resolver = ThreadResolver::new(Arc::new(source), settings);

        let result = resolver.resolve(t0()).await;

        assert_eq!(result, Resolution::Found("https://ancient".to_string()));
    }
}
