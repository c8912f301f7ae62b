use chrono::{Datelike, NaiveDate};

use crate::media_type::MediaKind;

/// Highest page the upstream listing endpoints will serve.
pub const MAX_RESULT_PAGES: u32 = 500;

/// Deduplication identity of a listed title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaIdentity {
    pub id: u64,
    pub kind: MediaKind,
}

/// Lightweight listing entity as returned by discover and search pages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaSummary {
    pub id: u64,
    pub media_kind: MediaKind,
    pub display_title: String,
    pub poster_path: Option<String>,
    /// Upstream vote average on a 0-10 scale
    pub vote_average: f32,
    /// `release_date` for movies, `first_air_date` for TV
    pub primary_date: Option<String>,
}

impl MediaSummary {
    pub fn identity(&self) -> MediaIdentity {
        MediaIdentity {
            id: self.id,
            kind: self.media_kind,
        }
    }

    pub fn release_year(&self) -> Option<i32> {
        self.primary_date.as_deref().and_then(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.year())
        })
    }

    /// Vote average rendered with one decimal, e.g. `7.3`.
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.vote_average)
    }
}

/// One fetched listing page.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultPage {
    pub page_number: u32,
    pub items: Vec<MediaSummary>,
    /// Source-reported page count, clamped to [`MAX_RESULT_PAGES`]
    pub total_pages: u32,
    pub total_results: u64,
}

impl ResultPage {
    pub fn new(
        page_number: u32,
        items: Vec<MediaSummary>,
        total_pages: u32,
        total_results: u64,
    ) -> Self {
        Self {
            page_number: page_number.max(1),
            items,
            total_pages: total_pages.min(MAX_RESULT_PAGES),
            total_results,
        }
    }

    /// Page 1 with no results and no further pages.
    pub fn empty() -> Self {
        Self {
            page_number: 1,
            items: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    /// Cursor for the page after this one, if the source has one.
    pub fn next_page(&self) -> Option<u32> {
        let limit = self.total_pages.min(MAX_RESULT_PAGES);
        (self.page_number < limit).then(|| self.page_number + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(date: Option<&str>) -> MediaSummary {
        MediaSummary {
            id: 550,
            media_kind: MediaKind::Movie,
            display_title: "Fight Club".to_string(),
            poster_path: None,
            vote_average: 8.433,
            primary_date: date.map(str::to_string),
        }
    }

    #[test]
    fn next_page_respects_upstream_ceiling() {
        assert_eq!(ResultPage::new(1, vec![], 3, 60).next_page(), Some(2));
        assert_eq!(ResultPage::new(3, vec![], 3, 60).next_page(), None);
        assert_eq!(ResultPage::new(499, vec![], 9000, 0).next_page(), Some(500));
        assert_eq!(ResultPage::new(500, vec![], 9000, 0).next_page(), None);
    }

    #[test]
    fn reported_total_is_clamped() {
        assert_eq!(ResultPage::new(1, vec![], 12_000, 0).total_pages, 500);
    }

    #[test]
    fn empty_page_is_exhausted() {
        let page = ResultPage::empty();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.next_page().is_none());
    }

    #[test]
    fn release_year_and_rating_label() {
        let item = summary(Some("1999-10-15"));
        assert_eq!(item.release_year(), Some(1999));
        assert_eq!(item.rating_label(), "8.4");
        assert_eq!(summary(Some("")).release_year(), None);
        assert_eq!(summary(None).release_year(), None);
    }
}
