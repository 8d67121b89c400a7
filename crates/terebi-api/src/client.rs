use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::types::{
    Comment, Insight, NewComment, ShowSearchResult, ShowWithEpisodes, WatchedMark, WatchedToggle,
};

/// Characters escaped in query-string values: everything outside the
/// RFC 3986 unreserved set. Spaces encode as `%20`, never `+`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Stateless client for the terebi backend.
///
/// Cheap to clone; every method maps one server operation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    http: Client,
}

impl ApiClient {
    /// Create a client for a base URL such as `http://127.0.0.1:8000/api`.
    ///
    /// The URL is validated up front and any trailing slash is dropped so
    /// path building stays deterministic.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::BaseUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::BaseUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(ApiError::Status {
                status: resp.status().as_u16(),
            })
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        tracing::debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        let resp = Self::check_response(resp).await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/shows/search?q={}",
            self.base,
            utf8_percent_encode(query, QUERY_VALUE)
        )
    }

    /// Search shows by free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<ShowSearchResult>, ApiError> {
        self.get_json(self.search_url(query)).await
    }

    /// Fetch the full show aggregate: metadata, seasons, episodes.
    pub async fn show_details(&self, id: i64) -> Result<ShowWithEpisodes, ApiError> {
        self.get_json(format!("{}/shows/{id}/details", self.base))
            .await
    }

    /// Generate an insight blurb for a show.
    pub async fn show_insight(&self, show_id: i64) -> Result<Insight, ApiError> {
        self.get_json(format!("{}/shows/{show_id}/insight", self.base))
            .await
    }

    /// Generate an insight blurb for a single episode.
    pub async fn episode_insight(
        &self,
        show_id: i64,
        episode_id: i64,
    ) -> Result<Insight, ApiError> {
        self.get_json(format!(
            "{}/shows/{show_id}/episodes/{episode_id}/insight",
            self.base
        ))
        .await
    }

    /// List show-level comments.
    pub async fn show_comments(&self, show_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.get_json(format!("{}/shows/{show_id}/comments", self.base))
            .await
    }

    /// List episode-level comments.
    pub async fn episode_comments(&self, episode_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.get_json(format!("{}/episodes/{episode_id}/comments", self.base))
            .await
    }

    /// Post a show-level comment. Resolves to the server-created record.
    pub async fn add_show_comment(&self, show_id: i64, text: &str) -> Result<Comment, ApiError> {
        let url = format!("{}/shows/{show_id}/comments", self.base);
        tracing::debug!("POST {url}");
        let resp = self
            .http
            .post(&url)
            .json(&NewComment { text })
            .send()
            .await?;
        let resp = Self::check_response(resp).await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Post an episode-level comment.
    pub async fn add_episode_comment(
        &self,
        show_id: i64,
        episode_id: i64,
        text: &str,
    ) -> Result<Comment, ApiError> {
        let url = format!(
            "{}/shows/{show_id}/episodes/{episode_id}/comments",
            self.base
        );
        tracing::debug!("POST {url}");
        let resp = self
            .http
            .post(&url)
            .json(&NewComment { text })
            .send()
            .await?;
        let resp = Self::check_response(resp).await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Delete a comment by id. No body on success.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), ApiError> {
        let url = format!("{}/comments/{comment_id}", self.base);
        tracing::debug!("DELETE {url}");
        let resp = self.http.delete(&url).send().await?;
        Self::check_response(resp).await?;
        Ok(())
    }

    /// Fetch the watched marks for a show.
    pub async fn watched_episodes(&self, show_id: i64) -> Result<Vec<WatchedMark>, ApiError> {
        self.get_json(format!("{}/shows/{show_id}/watched", self.base))
            .await
    }

    /// Mark an episode watched.
    pub async fn mark_watched(
        &self,
        show_id: i64,
        episode_id: i64,
    ) -> Result<WatchedToggle, ApiError> {
        let url = format!(
            "{}/shows/{show_id}/episodes/{episode_id}/watched",
            self.base
        );
        tracing::debug!("PUT {url}");
        let resp = self.http.put(&url).send().await?;
        let resp = Self::check_response(resp).await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Unmark an episode as watched.
    pub async fn unmark_watched(
        &self,
        show_id: i64,
        episode_id: i64,
    ) -> Result<WatchedToggle, ApiError> {
        let url = format!(
            "{}/shows/{show_id}/episodes/{episode_id}/watched",
            self.base
        );
        tracing::debug!("DELETE {url}");
        let resp = self.http.delete(&url).send().await?;
        let resp = Self::check_response(resp).await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_new_rejects_garbage() {
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("ftp://example.com/api").is_err());
    }

    #[test]
    fn test_search_url_encodes_spaces_as_percent20() {
        let client = ApiClient::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            client.search_url("the wire"),
            "http://localhost:8000/api/shows/search?q=the%20wire"
        );
    }

    #[test]
    fn test_search_url_encodes_reserved_characters() {
        let client = ApiClient::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            client.search_url("law & order"),
            "http://localhost:8000/api/shows/search?q=law%20%26%20order"
        );
        // Unreserved characters pass through untouched.
        assert_eq!(
            client.search_url("mr.robot_s01-e02~x"),
            "http://localhost:8000/api/shows/search?q=mr.robot_s01-e02~x"
        );
    }
}
