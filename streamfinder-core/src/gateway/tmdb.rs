use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use streamfinder_model::{ExternalIds, Genre, MediaKind, ResultPage};
use tracing::{debug, warn};

use super::cache::{CacheTtls, ResponseMemo};
use super::wire::{WireDetail, WireGenres, WirePage};
use super::{GatewayError, MetadataGateway, TitleDetail};
use crate::query::DiscoverRequest;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Clone)]
pub struct TmdbSettings {
    pub api_token: Option<String>,
    pub base_url: String,
    /// Language of the genre vocabulary
    pub language: String,
    pub timeout: Duration,
    /// `None` disables memoization
    pub cache: Option<CacheTtls>,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            timeout: Duration::from_secs(30),
            cache: Some(CacheTtls::default()),
        }
    }
}

impl fmt::Debug for TmdbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbSettings")
            .field("api_token_set", &self.api_token.is_some())
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .field("cache", &self.cache)
            .finish()
    }
}

/// Bearer-authenticated TMDB v3 client.
pub struct TmdbGateway {
    client: Client,
    settings: TmdbSettings,
    memo: Option<ResponseMemo>,
}

impl fmt::Debug for TmdbGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbGateway")
            .field("settings", &self.settings)
            .field("memo_entries", &self.memo.as_ref().map(ResponseMemo::len))
            .finish()
    }
}

impl TmdbGateway {
    pub fn new(settings: TmdbSettings) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: Client, settings: TmdbSettings) -> Self {
        let memo = settings.cache.map(|_| ResponseMemo::new());
        Self {
            client,
            settings,
            memo,
        }
    }

    pub fn settings(&self) -> &TmdbSettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn token(&self) -> Result<&str, GatewayError> {
        self.settings
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(GatewayError::MissingCredential)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        ttl: impl Fn(&CacheTtls) -> Duration,
    ) -> Result<T, GatewayError> {
        let token = self.token()?;

        let request = self
            .client
            .get(self.url(path))
            .query(query)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .build()?;
        let key = request.url().to_string();

        if let Some(body) = self.memo.as_ref().and_then(|memo| memo.get(&key)) {
            return Ok(T::deserialize(body.as_ref())?);
        }

        debug!(url = %key, "requesting");
        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), path, "TMDB request failed");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = serde_json::from_slice(&response.bytes().await?)?;
        let parsed = T::deserialize(&body)?;

        if let (Some(memo), Some(ttls)) = (&self.memo, &self.settings.cache) {
            memo.insert(key, Arc::new(body), ttl(ttls));
        }
        Ok(parsed)
    }
}

#[async_trait]
impl MetadataGateway for TmdbGateway {
    async fn fetch_genre_vocabulary(
        &self,
        kind: MediaKind,
    ) -> Result<Vec<Genre>, GatewayError> {
        let path = format!("/genre/{}/list", kind.as_str());
        let wire: WireGenres = self
            .get_json(
                &path,
                &[("language", self.settings.language.clone())],
                |ttls| ttls.genre,
            )
            .await?;
        Ok(wire.genres)
    }

    async fn fetch_discover_page(
        &self,
        request: &DiscoverRequest,
    ) -> Result<ResultPage, GatewayError> {
        let wire: WirePage = self
            .get_json(&request.path(), &request.query_pairs(), |ttls| ttls.listing)
            .await?;
        Ok(wire.into_result_page(request.media_kind))
    }

    async fn fetch_search_page(
        &self,
        text: &str,
        kind: MediaKind,
        page: u32,
    ) -> Result<ResultPage, GatewayError> {
        if text.trim().is_empty() {
            return Ok(ResultPage::empty());
        }
        let path = format!("/search/{}", kind.as_str());
        let query = [("query", text.to_string()), ("page", page.max(1).to_string())];
        let wire: WirePage = self.get_json(&path, &query, |ttls| ttls.listing).await?;
        Ok(wire.into_result_page(kind))
    }

    async fn fetch_detail(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<TitleDetail, GatewayError> {
        let path = format!("/{}/{}", kind.as_str(), id);
        let query = [("append_to_response", "watch/providers".to_string())];
        let wire: WireDetail = self.get_json(&path, &query, |ttls| ttls.listing).await?;
        let (detail, availability) = wire.into_parts(kind);
        Ok(TitleDetail {
            detail,
            availability,
        })
    }

    async fn fetch_external_ids(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<ExternalIds, GatewayError> {
        let path = format!("/{}/{}/external_ids", kind.as_str(), id);
        self.get_json(&path, &[], |ttls| ttls.listing).await
    }
}
