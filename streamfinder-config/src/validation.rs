use thiserror::Error;

use super::models::Config;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("TMDB timeout must be greater than zero")]
    ZeroTimeout,
    #[error("TMDB base URL '{url}' cannot be used as a request base")]
    OpaqueBaseUrl { url: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.tmdb.timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroTimeout);
    }

    if config.tmdb.base_url.cannot_be_a_base() {
        return Err(ConfigGuardRailError::OpaqueBaseUrl {
            url: config.tmdb.base_url.to_string(),
        });
    }

    if config.tmdb.api_token.is_none() {
        warnings.push_with_hint(
            "TMDB_API_TOKEN not configured; every metadata request will fail",
            "Set TMDB_API_TOKEN or add api_token to the [tmdb] section",
        );
    }

    if config.tmdb.base_url.scheme() != "https" {
        warnings.push(format!(
            "TMDB base URL {} is not https; the bearer token is sent in clear text",
            config.tmdb.base_url
        ));
    }

    if !config.cache.enabled {
        warnings.push(
            "Response cache disabled; every listing and detail is fetched from the network",
        );
    } else if config.cache.listing_ttl.is_zero() || config.cache.genre_ttl.is_zero() {
        warnings.push_with_hint(
            "A cache TTL of zero expires entries immediately",
            "Set STREAMFINDER_CACHE_ENABLED=false to disable caching instead",
        );
    }

    Ok(warnings)
}
