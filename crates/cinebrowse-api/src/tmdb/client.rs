//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::category::{Category, MovieCategory, SearchType, TvCategory};
use super::types::{
    SearchParams, TmdbErrorResponse, TmdbListResponse, TmdbMovieDetails, TmdbMovieRecord,
    TmdbMultiRecord, TmdbSearchResults, TmdbTvDetails, TmdbTvRecord,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default image host prefix for poster paths (w500 rendition).
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// How requests are authenticated.
#[derive(Debug, Clone)]
enum Credentials {
    /// v3 API key sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token sent as a bearer header.
    BearerToken(String),
}

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key or bearer token.
    credentials: Credentials,
    /// Optional response language (e.g. "en-US").
    language: Option<String>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    api_token: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_token: None,
            user_agent: None,
            language: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key. Takes precedence over a bearer token.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the v4 bearer API token.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language sent with every request.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - neither `api_key` nor `api_token` is set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let credentials = match (self.api_key, self.api_token) {
            (Some(key), _) => Credentials::ApiKey(key),
            (None, Some(token)) => Credentials::BearerToken(token),
            (None, None) => bail!("api_key or api_token is required"),
        };
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credentials,
            language: self.language,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a single authenticated GET request and decodes the JSON body.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        extra_query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut query: Vec<(&str, String)> = Vec::with_capacity(extra_query.len().saturating_add(2));
        if let Credentials::ApiKey(ref key) = self.credentials {
            query.push(("api_key", key.clone()));
        }
        if let Some(ref language) = self.language {
            query.push(("language", language.clone()));
        }
        query.extend(extra_query.iter().cloned());

        let mut builder = self.http_client.get(url).query(&query);
        if let Credentials::BearerToken(ref token) = self.credentials {
            builder = builder.bearer_auth(token);
        }
        let request = builder
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(path, "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        raw_result.with_context(|| format!("failed to decode JSON response: {path}"))
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all, fields(category = category.path_segment()))]
    async fn movie_list(
        &self,
        category: MovieCategory,
    ) -> Result<TmdbListResponse<TmdbMovieRecord>> {
        let path = format!("movie/{}", category.path_segment());
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all, fields(category = category.path_segment()))]
    async fn tv_list(&self, category: TvCategory) -> Result<TmdbListResponse<TmdbTvRecord>> {
        let path = format!("tv/{}", category.path_segment());
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all, fields(search_type = params.search_type.path_segment()))]
    async fn search(&self, params: &SearchParams) -> Result<TmdbSearchResults> {
        let path = format!("search/{}", params.search_type.path_segment());
        let query = [
            ("query", params.query.clone()),
            ("include_adult", params.include_adult.to_string()),
        ];

        let results = match params.search_type {
            SearchType::Multi => {
                let response: TmdbListResponse<TmdbMultiRecord> =
                    self.get_json(&path, &query).await?;
                TmdbSearchResults::Multi(response.results)
            }
            SearchType::Movie => {
                let response: TmdbListResponse<TmdbMovieRecord> =
                    self.get_json(&path, &query).await?;
                TmdbSearchResults::Movie(response.results)
            }
            SearchType::Tv => {
                let response: TmdbListResponse<TmdbTvRecord> =
                    self.get_json(&path, &query).await?;
                TmdbSearchResults::Tv(response.results)
            }
        };
        Ok(results)
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails> {
        let path = format!("movie/{movie_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn tv_details(&self, series_id: u64) -> Result<TmdbTvDetails> {
        let path = format!("tv/{series_id}");
        self.get_json(&path, &[]).await
    }
}
