use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Kind of title a listing or detail request is scoped to.
///
/// Movie and TV identifiers live in separate upstream namespaces, so the kind
/// is part of every title identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    #[default]
    Movie,
    #[cfg_attr(feature = "serde", serde(rename = "tv"))]
    TvShow,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Movie, MediaKind::TvShow];

    /// Path segment and navigation value (`movie` / `tv`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::TvShow => "tv",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "Movies",
            MediaKind::TvShow => "TV Shows",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::TvShow),
            other => Err(ModelError::InvalidMediaKind(other.to_string())),
        }
    }
}
