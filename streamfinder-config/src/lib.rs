//! Configuration loading for streamfinder.
//!
//! Settings come from an optional TOML file, an optional `.env` file and the
//! process environment. [`ConfigLoader`] merges them with environment values
//! taking precedence over the file, and the file over built-in defaults.

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{BrowseDefaults, CacheConfig, Config, ConfigMetadata, TmdbConfig};
pub use validation::{ConfigWarning, ConfigWarnings};
