pub mod sources;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use streamfinder_model::{LanguageCode, MediaKind, RegionCode, SortKey};
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb: TmdbConfig,
    pub browse: BrowseDefaults,
    pub cache: CacheConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn has_api_token(&self) -> bool {
        self.tmdb.api_token.is_some()
    }
}

/// Connection settings for the remote metadata API.
#[derive(Clone)]
pub struct TmdbConfig {
    pub api_token: Option<String>,
    pub base_url: Url,
    pub image_base_url: Url,
    /// Language the genre vocabulary is requested in
    pub language: LanguageCode,
    pub timeout: Duration,
}

impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_token_set", &self.api_token.is_some())
            .field("base_url", &self.base_url.as_str())
            .field("image_base_url", &self.image_base_url.as_str())
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Values a fresh browse session starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseDefaults {
    pub region: RegionCode,
    pub media_kind: MediaKind,
    pub sort_key: SortKey,
}

/// Gateway response memo settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub enabled: bool,
    pub listing_ttl: Duration,
    pub genre_ttl: Duration,
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
