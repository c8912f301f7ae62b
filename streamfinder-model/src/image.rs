use std::fmt::{Display, Formatter};

/// Poster sizes offered by the upstream image CDN (2:3 aspect ratio).
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PosterSize {
    W92,
    W154,
    W185,
    /// Listing grid default
    #[default]
    W342,
    W500,
    W780,
    Original,
}

impl PosterSize {
    pub const ALL: [PosterSize; 7] = [
        Self::W92,
        Self::W154,
        Self::W185,
        Self::W342,
        Self::W500,
        Self::W780,
        Self::Original,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

/// Backdrop sizes (16:9 aspect ratio).
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackdropSize {
    W300,
    W780,
    #[default]
    W1280,
    Original,
}

impl BackdropSize {
    pub const ALL: [BackdropSize; 4] =
        [Self::W300, Self::W780, Self::W1280, Self::Original];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W300 => "w300",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}

/// Provider logo sizes.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogoSize {
    W45,
    #[default]
    W92,
    W154,
    W185,
    W300,
    W500,
    Original,
}

impl LogoSize {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W45 => "w45",
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W300 => "w300",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

impl Display for PosterSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for BackdropSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for LogoSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a CDN URL for an upstream image path such as `/abc.jpg`.
///
/// Returns `None` for an absent or empty path so callers can fall back to a
/// placeholder.
pub fn image_url(
    base: &str,
    size: impl Display,
    path: Option<&str>,
) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{base}/{size}{path}"))
    } else {
        Some(format!("{base}/{size}/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p";

    #[test]
    fn builds_poster_url() {
        assert_eq!(
            image_url(BASE, PosterSize::W342, Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w342/abc.jpg")
        );
    }

    #[test]
    fn tolerates_trailing_slash_and_bare_path() {
        assert_eq!(
            image_url("https://cdn.test/p/", LogoSize::W92, Some("logo.png"))
                .as_deref(),
            Some("https://cdn.test/p/w92/logo.png")
        );
    }

    #[test]
    fn missing_path_yields_none() {
        assert!(image_url(BASE, BackdropSize::W1280, None).is_none());
        assert!(image_url(BASE, BackdropSize::W1280, Some("  ")).is_none());
    }
}
