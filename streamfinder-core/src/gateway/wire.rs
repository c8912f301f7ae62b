//! Upstream JSON shapes and their conversion into model types.

use serde::Deserialize;
use serde_json::Value;
use streamfinder_model::{
    Genre, MediaDetail, MediaKind, MediaSummary, ResultPage,
};
use tracing::debug;

use crate::availability::RawAvailability;

/// Listing entry shared by discover and search results. Movies carry
/// `title`/`release_date`, TV shows `name`/`first_air_date`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireListing {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
}

impl WireListing {
    pub fn into_summary(self, kind: MediaKind) -> MediaSummary {
        MediaSummary {
            id: self.id,
            media_kind: kind,
            display_title: self.title.or(self.name).unwrap_or_default(),
            poster_path: non_empty(self.poster_path),
            vote_average: self.vote_average,
            primary_date: non_empty(self.release_date.or(self.first_air_date)),
        }
    }
}

/// Paginated listing with loosely typed results so one bad entry does not
/// fail the page.
#[derive(Debug, Deserialize)]
pub struct WirePage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl WirePage {
    pub fn into_result_page(self, kind: MediaKind) -> ResultPage {
        let items = self
            .results
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<WireListing>(raw) {
                Ok(listing) => Some(listing.into_summary(kind)),
                Err(err) => {
                    debug!(error = %err, "skipping malformed listing entry");
                    None
                }
            })
            .collect();
        ResultPage::new(self.page, items, self.total_pages, self.total_results)
    }
}

#[derive(Debug, Deserialize)]
pub struct WireGenres {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
pub struct WireWatchProviders {
    #[serde(default)]
    pub results: Value,
}

/// Detail body requested with `append_to_response=watch/providers`.
#[derive(Debug, Deserialize)]
pub struct WireDetail {
    #[serde(flatten)]
    pub listing: WireListing,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub runtime: Option<u32>,
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(rename = "watch/providers")]
    pub watch_providers: Option<WireWatchProviders>,
}

impl WireDetail {
    pub fn into_parts(self, kind: MediaKind) -> (MediaDetail, RawAvailability) {
        let availability = self
            .watch_providers
            .map(|providers| RawAvailability::new(providers.results))
            .unwrap_or_default();
        let detail = MediaDetail {
            summary: self.listing.into_summary(kind),
            overview: non_empty(self.overview),
            backdrop_path: non_empty(self.backdrop_path),
            runtime_minutes: self.runtime,
            number_of_seasons: self.number_of_seasons,
            genres: self.genres,
        };
        (detail, availability)
    }
}

fn first_page() -> u32 {
    1
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tv_listing_uses_name_and_first_air_date() {
        let listing: WireListing = serde_json::from_value(json!({
            "id": 1396,
            "name": "Breaking Bad",
            "poster_path": "/bb.jpg",
            "vote_average": 8.9,
            "first_air_date": "2008-01-20"
        }))
        .unwrap();
        let summary = listing.into_summary(MediaKind::TvShow);
        assert_eq!(summary.display_title, "Breaking Bad");
        assert_eq!(summary.primary_date.as_deref(), Some("2008-01-20"));
        assert_eq!(summary.media_kind, MediaKind::TvShow);
    }

    #[test]
    fn malformed_entries_are_skipped_and_totals_clamped() {
        let page: WirePage = serde_json::from_value(json!({
            "page": 2,
            "results": [
                {"id": 1, "title": "One"},
                {"title": "no id"},
                {"id": 3, "title": "Three", "release_date": ""}
            ],
            "total_pages": 40000,
            "total_results": 800000
        }))
        .unwrap();
        let page = page.into_result_page(MediaKind::Movie);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].primary_date, None);
        assert_eq!(page.total_pages, 500);
    }

    #[test]
    fn detail_splits_out_availability() {
        let detail: WireDetail = serde_json::from_value(json!({
            "id": 550,
            "title": "Fight Club",
            "overview": "An insomniac office worker...",
            "runtime": 139,
            "genres": [{"id": 18, "name": "Drama"}],
            "watch/providers": {"results": {"US": {"flatrate": []}}}
        }))
        .unwrap();
        let (detail, availability) = detail.into_parts(MediaKind::Movie);
        assert_eq!(detail.runtime_label().as_deref(), Some("2h 19m"));
        assert_eq!(detail.genres[0].name, "Drama");
        assert_eq!(availability.countries().count(), 1);
    }
}
