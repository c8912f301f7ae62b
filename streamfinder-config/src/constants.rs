use std::time::Duration;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_TMDB_LANGUAGE: &str = "en";
pub const DEFAULT_TMDB_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_REGION: &str = "AU";

/// Listings, details and external ids.
pub const DEFAULT_LISTING_TTL: Duration = Duration::from_secs(60 * 60 * 24);
pub const DEFAULT_GENRE_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Probed in order when no config path is given.
pub const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["streamfinder.toml", "config/streamfinder.toml"];
