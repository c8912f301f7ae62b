pub mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use streamfinder_model::{LanguageCode, MediaKind, RegionCode, SortKey};
use tracing::debug;
use url::Url;

use crate::constants::{
    DEFAULT_CONFIG_LOCATIONS, DEFAULT_GENRE_TTL, DEFAULT_LISTING_TTL,
    DEFAULT_REGION, DEFAULT_TMDB_BASE_URL, DEFAULT_TMDB_IMAGE_BASE_URL,
    DEFAULT_TMDB_LANGUAGE, DEFAULT_TMDB_TIMEOUT,
};
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{
    BrowseDefaults, CacheConfig, Config, ConfigMetadata, TmdbConfig,
};
use crate::util::parse_duration;
use crate::validation::{self, ConfigWarnings};
use error::ConfigLoadError;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    /// Loads `.env`, gathers the process environment and merges it with the
    /// config file.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Merges an already gathered environment with the config file. Does not
    /// touch the process environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let config_present = config_path.is_some();
        let config = compose_config(file_config.unwrap_or_default(), env, config_path)?;

        let mut warnings = ConfigWarnings::default();
        if !config_present {
            warnings.push_with_hint(
                "No streamfinder.toml detected; using environment variables and defaults",
                "Pass --config or set STREAMFINDER_CONFIG to point at a config file",
            );
        }
        warnings.extend(validation::apply_guard_rails(&config)?);

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(Path::new)
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.to_path_buf(),
                None => return Ok((None, None)),
            },
        };

        debug!(path = %path.display(), "reading configuration file");
        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file: FileConfig,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<Config, ConfigLoadError> {
    let FileConfig {
        tmdb: file_tmdb,
        browse: file_browse,
        cache: file_cache,
    } = file;

    let tmdb = TmdbConfig {
        api_token: env
            .tmdb_api_token
            .or(file_tmdb.api_token)
            .filter(|token| !token.trim().is_empty()),
        base_url: parse_url(
            "tmdb.base_url",
            env.tmdb_base_url.or(file_tmdb.base_url),
            DEFAULT_TMDB_BASE_URL,
        )?,
        image_base_url: parse_url(
            "tmdb.image_base_url",
            env.tmdb_image_base_url.or(file_tmdb.image_base_url),
            DEFAULT_TMDB_IMAGE_BASE_URL,
        )?,
        language: parse_value::<LanguageCode>(
            "tmdb.language",
            env.tmdb_language.or(file_tmdb.language),
            DEFAULT_TMDB_LANGUAGE,
        )?,
        timeout: duration_or(
            "tmdb.timeout",
            env.tmdb_timeout.or(file_tmdb.timeout),
            DEFAULT_TMDB_TIMEOUT,
        )?,
    };

    let browse = BrowseDefaults {
        region: parse_value::<RegionCode>(
            "browse.default_region",
            env.default_region.or(file_browse.default_region),
            DEFAULT_REGION,
        )?,
        media_kind: parse_value::<MediaKind>(
            "browse.default_media_type",
            env.default_media_type.or(file_browse.default_media_type),
            MediaKind::default().as_str(),
        )?,
        sort_key: parse_value::<SortKey>(
            "browse.default_sort",
            env.default_sort.or(file_browse.default_sort),
            SortKey::default().as_str(),
        )?,
    };

    let cache = CacheConfig {
        enabled: env.cache_enabled.or(file_cache.enabled).unwrap_or(true),
        listing_ttl: duration_or(
            "cache.listing_ttl",
            env.listing_ttl.or(file_cache.listing_ttl),
            DEFAULT_LISTING_TTL,
        )?,
        genre_ttl: duration_or(
            "cache.genre_ttl",
            env.genre_ttl.or(file_cache.genre_ttl),
            DEFAULT_GENRE_TTL,
        )?,
    };

    Ok(Config {
        tmdb,
        browse,
        cache,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    })
}

fn parse_url(
    field: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<Url, ConfigLoadError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    Url::parse(raw.trim()).map_err(|source| ConfigLoadError::InvalidUrl {
        field,
        value: raw,
        source,
    })
}

fn parse_value<T>(
    field: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<T, ConfigLoadError>
where
    T: FromStr<Err = streamfinder_model::ModelError>,
{
    value
        .as_deref()
        .unwrap_or(default)
        .parse::<T>()
        .map_err(|source| ConfigLoadError::InvalidValue { field, source })
}

fn duration_or(
    field: &'static str,
    value: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigLoadError> {
    match value {
        Some(raw) => parse_duration(&raw).map_err(|source| {
            ConfigLoadError::InvalidDuration {
                field,
                value: raw,
                source,
            }
        }),
        None => Ok(default),
    }
}
