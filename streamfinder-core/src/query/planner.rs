use std::collections::BTreeSet;

use streamfinder_model::{
    LanguageCode, MediaKind, MonetizationType, RegionCode, SortKey,
};

use crate::filters::FilterState;
use crate::filters::navigation::comma_joined;

/// Free-text search for one media kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    pub text: String,
    pub media_kind: MediaKind,
    pub page: u32,
}

impl SearchRequest {
    /// Blank text is answered locally with an empty page.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn path(&self) -> String {
        format!("/search/{}", self.media_kind.as_str())
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("query", self.text.clone()), ("page", self.page.to_string())]
    }
}

/// Filter-driven listing request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoverRequest {
    pub media_kind: MediaKind,
    pub page: u32,
    pub sort_key: SortKey,
    pub original_language: Option<LanguageCode>,
    pub genre_ids: BTreeSet<u32>,
    pub watch_region: Option<RegionCode>,
    pub provider_ids: BTreeSet<u32>,
    /// Sent only when a region is set without providers
    pub monetization: Vec<MonetizationType>,
}

impl DiscoverRequest {
    pub fn path(&self) -> String {
        format!("/discover/{}", self.media_kind.as_str())
    }

    /// Upstream query parameters. Provider ids are OR-joined with `|`, genre
    /// ids with `,`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("sort_by", self.sort_key.as_str().to_string())];

        if let Some(language) = &self.original_language {
            pairs.push(("with_original_language", language.to_string()));
        }
        if !self.genre_ids.is_empty() {
            pairs.push(("with_genres", comma_joined(&self.genre_ids)));
        }
        if let Some(region) = &self.watch_region {
            pairs.push(("watch_region", region.to_string()));
        }
        if !self.provider_ids.is_empty() {
            let joined = self
                .provider_ids
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join("|");
            pairs.push(("with_watch_providers", joined));
        }
        if !self.monetization.is_empty() {
            pairs.push((
                "with_watch_monetization_types",
                MonetizationType::pipe_joined(&self.monetization),
            ));
        }

        pairs.push(("page", self.page.to_string()));
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestSpec {
    Search(SearchRequest),
    Discover(DiscoverRequest),
}

impl RequestSpec {
    pub fn page(&self) -> u32 {
        match self {
            RequestSpec::Search(search) => search.page,
            RequestSpec::Discover(discover) => discover.page,
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        match self {
            RequestSpec::Search(search) => search.media_kind,
            RequestSpec::Discover(discover) => discover.media_kind,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, RequestSpec::Search(_))
    }

    pub fn with_page(mut self, page: u32) -> Self {
        let page = page.max(1);
        match &mut self {
            RequestSpec::Search(search) => search.page = page,
            RequestSpec::Discover(discover) => discover.page = page,
        }
        self
    }

    pub fn fetch_key(&self) -> FetchKey {
        FetchKey(self.clone().with_page(1))
    }
}

/// The planned request with the page cursor removed. Two states with equal
/// keys share one accumulated result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey(RequestSpec);

impl FetchKey {
    pub fn request_for(&self, page: u32) -> RequestSpec {
        self.0.clone().with_page(page)
    }

    pub fn media_kind(&self) -> MediaKind {
        self.0.media_kind()
    }

    pub fn is_search(&self) -> bool {
        self.0.is_search()
    }
}

/// Turns a filter state into the request for its current page.
pub fn plan(state: &FilterState) -> RequestSpec {
    let page = state.page_cursor.max(1);

    if let Some(text) = state.search_text() {
        return RequestSpec::Search(SearchRequest {
            text: text.to_string(),
            media_kind: state.media_kind,
            page,
        });
    }

    // A region without providers is ignored upstream unless every
    // monetization type is named.
    let monetization =
        if state.watch_region.is_some() && state.provider_ids.is_empty() {
            MonetizationType::ALL.to_vec()
        } else {
            Vec::new()
        };

    RequestSpec::Discover(DiscoverRequest {
        media_kind: state.media_kind,
        page,
        sort_key: state.sort_key,
        original_language: state.original_language.clone(),
        genre_ids: state.genre_ids.clone(),
        watch_region: state.watch_region.clone(),
        provider_ids: state.provider_ids.clone(),
        monetization,
    })
}
