//! Reddit search client.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::listing::{Listing, TokenResponse};
use crate::domain::entities::CandidatePost;
use crate::domain::sources::CandidateSource;
use crate::error::UpstreamError;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";

/// Tokens are renewed this long before Reddit says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Credentials of a Reddit "script" app authorized with a refresh token.
#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub user_agent: String,
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("refresh_token", &"***")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

/// [`CandidateSource`] backed by Reddit's subreddit search.
///
/// Built once at startup and shared for the life of the process. The OAuth
/// access token is cached and renewed with the refresh-token grant when it
/// is about to expire. No retries: a failed call surfaces as
/// [`UpstreamError`] and the caller decides what to do.
pub struct RedditSource {
    http: Client,
    credentials: RedditCredentials,
    token_url: String,
    api_base: String,
    token: Mutex<Option<AccessToken>>,
}

impl RedditSource {
    /// Creates a client against the public Reddit endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] if the HTTP client cannot be built.
    pub fn new(credentials: RedditCredentials, timeout: Duration) -> Result<Self, UpstreamError> {
        Self::with_endpoints(credentials, timeout, TOKEN_URL, API_BASE)
    }

    /// Creates a client against custom token and API endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] if the HTTP client cannot be built.
    pub fn with_endpoints(
        credentials: RedditCredentials,
        timeout: Duration,
        token_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .user_agent(credentials.user_agent.clone())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            credentials,
            token_url: token_url.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    /// Returns a valid access token, exchanging the refresh token if needed.
    async fn access_token(&self) -> Result<String, UpstreamError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref()
            && Instant::now() < token.expires_at
        {
            return Ok(token.value.clone());
        }

        debug!("Requesting Reddit access token");

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.credentials.refresh_token.as_str()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(UpstreamError::Auth(
                "client credentials rejected".to_string(),
            ));
        }

        let body: TokenResponse = response.error_for_status()?.json().await?;

        let value = match (body.access_token, body.error) {
            (Some(value), _) => value,
            (None, Some(error)) => return Err(UpstreamError::Auth(error)),
            (None, None) => {
                return Err(UpstreamError::Decode(
                    "token response has neither access_token nor error".to_string(),
                ));
            }
        };

        let lifetime = Duration::from_secs(body.expires_in.unwrap_or(3600));
        let expires_at = Instant::now() + lifetime.saturating_sub(TOKEN_EXPIRY_MARGIN);

        info!("Obtained Reddit access token (valid {}s)", lifetime.as_secs());

        *cached = Some(AccessToken {
            value: value.clone(),
            expires_at,
        });

        Ok(value)
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }
}

#[async_trait]
impl CandidateSource for RedditSource {
    async fn search(
        &self,
        community: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CandidatePost>, UpstreamError> {
        let token = self.access_token().await?;
        let url = format!("{}/r/{}/search", self.api_base, community);
        let limit = limit.to_string();

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("restrict_sr", "1"),
                ("sort", "new"),
                ("limit", limit.as_str()),
                ("raw_json", "1"),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Revoked early; the next call fetches a new token.
            self.invalidate_token().await;
            return Err(UpstreamError::Auth("access token rejected".to_string()));
        }

        let listing: Listing = response.error_for_status()?.json().await?;
        let posts = listing.into_candidates();

        debug!("Reddit search in r/{} returned {} posts", community, posts.len());

        Ok(posts)
    }
}
