use crate::media::MediaSummary;

/// Genre vocabulary entry. Movie and TV vocabularies are disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Per-title detail used by the detail view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaDetail {
    pub summary: MediaSummary,
    pub overview: Option<String>,
    pub backdrop_path: Option<String>,
    /// Movies only
    pub runtime_minutes: Option<u32>,
    /// TV only
    pub number_of_seasons: Option<u32>,
    pub genres: Vec<Genre>,
}

impl MediaDetail {
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime_minutes
            .filter(|minutes| *minutes > 0)
            .map(format_runtime)
    }
}

/// Identifiers of a title in other catalogues.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalIds {
    pub id: u64,
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<u64>,
    pub wikidata_id: Option<String>,
}

impl ExternalIds {
    pub fn imdb_url(&self) -> Option<String> {
        self.imdb_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.imdb.com/title/{id}/"))
    }
}

/// Formats a runtime in minutes as `"{h}h {m}m"`.
pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_formatting() {
        assert_eq!(format_runtime(125), "2h 5m");
        assert_eq!(format_runtime(59), "0h 59m");
        assert_eq!(format_runtime(120), "2h 0m");
    }

    #[test]
    fn imdb_url_requires_an_id() {
        let mut ids = ExternalIds {
            id: 550,
            imdb_id: Some("tt0137523".to_string()),
            ..ExternalIds::default()
        };
        assert_eq!(
            ids.imdb_url().as_deref(),
            Some("https://www.imdb.com/title/tt0137523/")
        );
        ids.imdb_id = Some(String::new());
        assert!(ids.imdb_url().is_none());
    }
}
