use streamfinder_config::Config;
use streamfinder_core::{CacheTtls, FilterDefaults, TmdbSettings};

pub fn gateway_settings(config: &Config) -> TmdbSettings {
    TmdbSettings {
        api_token: config.tmdb.api_token.clone(),
        base_url: config.tmdb.base_url.as_str().trim_end_matches('/').to_string(),
        language: config.tmdb.language.to_string(),
        timeout: config.tmdb.timeout,
        cache: config.cache.enabled.then(|| CacheTtls {
            listing: config.cache.listing_ttl,
            genre: config.cache.genre_ttl,
        }),
    }
}

pub fn filter_defaults(config: &Config) -> FilterDefaults {
    FilterDefaults {
        media_kind: config.browse.media_kind,
        watch_region: Some(config.browse.region.clone()),
        sort_key: config.browse.sort_key,
    }
}
