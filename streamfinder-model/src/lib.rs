//! Core data model definitions shared across streamfinder crates.
#![allow(missing_docs)]

pub mod codes;
pub mod details;
pub mod error;
pub mod image;
pub mod media;
pub mod media_type;
pub mod prelude;
pub mod sort;
pub mod watch;

// Intentionally curated re-exports for downstream consumers.
pub use codes::{LanguageCode, RegionCode};
pub use details::{ExternalIds, Genre, MediaDetail, format_runtime};
pub use error::{ModelError, Result as ModelResult};
pub use image::{BackdropSize, LogoSize, PosterSize, image_url};
pub use media::{MAX_RESULT_PAGES, MediaIdentity, MediaSummary, ResultPage};
pub use media_type::MediaKind;
pub use sort::SortKey;
pub use watch::{MonetizationCategory, MonetizationType, ProviderAvailability};
