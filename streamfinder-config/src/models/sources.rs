use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util::parse_bool;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub tmdb: FileTmdbConfig,
    #[serde(default)]
    pub browse: FileBrowseConfig,
    #[serde(default)]
    pub cache: FileCacheConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Humantime duration such as `30s`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileBrowseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_ttl: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub tmdb_api_token: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub tmdb_image_base_url: Option<String>,
    pub tmdb_language: Option<String>,
    pub tmdb_timeout: Option<String>,
    pub default_region: Option<String>,
    pub default_media_type: Option<String>,
    pub default_sort: Option<String>,
    pub cache_enabled: Option<bool>,
    pub listing_ttl: Option<String>,
    pub genre_ttl: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the environment view from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            config_path: var("STREAMFINDER_CONFIG").map(PathBuf::from),
            tmdb_api_token: var("TMDB_API_TOKEN"),
            tmdb_base_url: var("TMDB_BASE_URL"),
            tmdb_image_base_url: var("TMDB_IMAGE_BASE_URL"),
            tmdb_language: var("TMDB_LANGUAGE"),
            tmdb_timeout: var("TMDB_TIMEOUT"),
            default_region: var("STREAMFINDER_DEFAULT_REGION"),
            default_media_type: var("STREAMFINDER_DEFAULT_MEDIA_TYPE"),
            default_sort: var("STREAMFINDER_DEFAULT_SORT"),
            cache_enabled: var("STREAMFINDER_CACHE_ENABLED")
                .and_then(|raw| parse_bool(&raw)),
            listing_ttl: var("STREAMFINDER_LISTING_TTL"),
            genre_ttl: var("STREAMFINDER_GENRE_TTL"),
        }
    }
}
