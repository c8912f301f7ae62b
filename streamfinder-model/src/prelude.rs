//! Glob-importable set of the model types most callers need.

pub use crate::codes::{LanguageCode, RegionCode};
pub use crate::details::{ExternalIds, Genre, MediaDetail};
pub use crate::error::ModelError;
pub use crate::image::{BackdropSize, LogoSize, PosterSize};
pub use crate::media::{MediaIdentity, MediaSummary, ResultPage};
pub use crate::media_type::MediaKind;
pub use crate::sort::SortKey;
pub use crate::watch::{
    MonetizationCategory, MonetizationType, ProviderAvailability,
};
