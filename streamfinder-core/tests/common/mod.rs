#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use streamfinder_core::{
    DiscoverRequest, GatewayError, MetadataGateway, RawAvailability, TitleDetail,
};
use streamfinder_model::{
    ExternalIds, Genre, MediaDetail, MediaKind, MediaSummary, ResultPage,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Genres(MediaKind),
    Discover(DiscoverRequest),
    Search {
        text: String,
        kind: MediaKind,
        page: u32,
    },
    Detail(MediaKind, u64),
    ExternalIds(MediaKind, u64),
}

/// In-memory gateway serving a fixed number of deterministic pages.
///
/// Page `n` holds `per_page` ids starting at `(n - 1) * per_page`, shifted
/// back by `overlap` so consecutive pages repeat ids.
#[derive(Debug)]
pub struct ScriptedGateway {
    pub total_pages: u32,
    pub per_page: u64,
    pub overlap: u64,
    failures: Mutex<VecDeque<GatewayError>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new(total_pages: u32, per_page: u64) -> Self {
        Self {
            total_pages,
            per_page,
            overlap: 0,
            failures: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_overlap(mut self, overlap: u64) -> Self {
        self.overlap = overlap;
        self
    }

    /// The next listing call fails with `err`.
    pub fn fail_next(&self, err: GatewayError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn listing_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Discover(_) | Call::Search { .. }))
            .count()
    }

    pub fn page(&self, kind: MediaKind, page: u32, prefix: &str) -> ResultPage {
        if page > self.total_pages {
            return ResultPage::new(page, Vec::new(), self.total_pages, 0);
        }
        let start = ((page as u64 - 1) * self.per_page).saturating_sub(if page > 1 {
            self.overlap
        } else {
            0
        });
        let items = (start..start + self.per_page)
            .map(|id| summary(id, kind, &format!("{prefix} {id}")))
            .collect();
        ResultPage::new(
            page,
            items,
            self.total_pages,
            self.total_pages as u64 * self.per_page,
        )
    }

    fn record(&self, call: Call) -> Result<(), GatewayError> {
        let listing = matches!(call, Call::Discover(_) | Call::Search { .. });
        self.calls.lock().unwrap().push(call);
        match listing.then(|| self.failures.lock().unwrap().pop_front()).flatten() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn summary(id: u64, kind: MediaKind, title: &str) -> MediaSummary {
    MediaSummary {
        id,
        media_kind: kind,
        display_title: title.to_string(),
        poster_path: Some(format!("/{id}.jpg")),
        vote_average: 7.0,
        primary_date: Some("2021-06-01".to_string()),
    }
}

pub fn netflix_everywhere() -> RawAvailability {
    RawAvailability::new(json!({
        "US": {"flatrate": [{"provider_id": 8, "provider_name": "Netflix", "logo_path": "/n.png"}]},
        "GB": {"flatrate": [{"provider_id": 8, "provider_name": "Netflix", "logo_path": "/n.png"}]},
        "FR": {"rent": [{"provider_id": 2, "provider_name": "Apple TV", "logo_path": "/a.png"}]}
    }))
}

#[async_trait]
impl MetadataGateway for ScriptedGateway {
    async fn fetch_genre_vocabulary(&self, kind: MediaKind) -> Result<Vec<Genre>, GatewayError> {
        self.record(Call::Genres(kind))?;
        let genres = match kind {
            MediaKind::Movie => vec![(28, "Action"), (35, "Comedy"), (18, "Drama")],
            MediaKind::TvShow => vec![(10759, "Action & Adventure"), (18, "Drama")],
        };
        Ok(genres
            .into_iter()
            .map(|(id, name)| Genre {
                id,
                name: name.to_string(),
            })
            .collect())
    }

    async fn fetch_discover_page(
        &self,
        request: &DiscoverRequest,
    ) -> Result<ResultPage, GatewayError> {
        self.record(Call::Discover(request.clone()))?;
        Ok(self.page(request.media_kind, request.page, "discover"))
    }

    async fn fetch_search_page(
        &self,
        text: &str,
        kind: MediaKind,
        page: u32,
    ) -> Result<ResultPage, GatewayError> {
        self.record(Call::Search {
            text: text.to_string(),
            kind,
            page,
        })?;
        Ok(self.page(kind, page, text))
    }

    async fn fetch_detail(&self, kind: MediaKind, id: u64) -> Result<TitleDetail, GatewayError> {
        self.record(Call::Detail(kind, id))?;
        Ok(TitleDetail {
            detail: MediaDetail {
                summary: summary(id, kind, "Detail"),
                overview: Some("Overview".to_string()),
                backdrop_path: None,
                runtime_minutes: (kind == MediaKind::Movie).then_some(125),
                number_of_seasons: (kind == MediaKind::TvShow).then_some(3),
                genres: Vec::new(),
            },
            availability: netflix_everywhere(),
        })
    }

    async fn fetch_external_ids(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<ExternalIds, GatewayError> {
        self.record(Call::ExternalIds(kind, id))?;
        Ok(ExternalIds {
            id,
            imdb_id: Some(format!("tt{id:07}")),
            tvdb_id: None,
            wikidata_id: None,
        })
    }
}
