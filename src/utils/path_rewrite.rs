//! Path-selected rewrites of the resolved thread URL.
//!
//! The last segment of the request path picks a site variant:
//!
//! | path         | rewrite                                   |
//! |--------------|-------------------------------------------|
//! | `/dt/old`    | first `www` becomes `old`                 |
//! | `/dt/stream` | first `reddit.com` becomes `reddit-stream.com` |
//! | `/dt/compact`| first `www` becomes `i`                   |
//!
//! Any other path leaves the URL untouched.

/// A recognized site variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteVariant {
    Old,
    Stream,
    Compact,
}

impl SiteVariant {
    /// Picks the variant named by the last segment of `path`.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        let suffix = trimmed.rsplit('/').next().unwrap_or(trimmed);

        match suffix {
            "old" => Some(Self::Old),
            "stream" => Some(Self::Stream),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }

    /// `(from, to)` pair applied to the first match in the URL.
    fn replacement(self) -> (&'static str, &'static str) {
        match self {
            Self::Old => ("www", "old"),
            Self::Stream => ("reddit.com", "reddit-stream.com"),
            Self::Compact => ("www", "i"),
        }
    }

    pub fn apply(self, url: &str) -> String {
        let (from, to) = self.replacement();
        url.replacen(from, to, 1)
    }
}

/// Rewrites `url` for the variant selected by `request_path`.
///
/// Returns `url` unchanged when the path names no known variant.
///
/// # Examples
///
/// ```
/// use dt_redirect::utils::path_rewrite::rewrite;
///
/// assert_eq!(
///     rewrite("https://www.site.example/x", "/dt/old"),
///     "https://old.site.example/x"
/// );
/// assert_eq!(
///     rewrite("https://www.site.example/x", "/unknown/path"),
///     "https://www.site.example/x"
/// );
/// ```
pub fn rewrite(url: &str, request_path: &str) -> String {
    match SiteVariant::from_path(request_path) {
        Some(variant) => variant.apply(url),
        None => url.to_string(),
    }
}
