use std::collections::BTreeSet;

use streamfinder_model::{LanguageCode, MediaKind, RegionCode, SortKey};

use super::navigation::{self, NavigationParams};
use crate::error::FilterError;

/// Values a state falls back to when navigation omits a key or an update
/// clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDefaults {
    pub media_kind: MediaKind,
    pub watch_region: Option<RegionCode>,
    pub sort_key: SortKey,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            media_kind: MediaKind::Movie,
            watch_region: RegionCode::new("AU").ok(),
            sort_key: SortKey::PopularityDesc,
        }
    }
}

/// Canonical filter and query descriptor.
///
/// Empty id sets mean "not filtered". A present `free_text_query` switches
/// the planner to search mode; the other filters are kept but not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub media_kind: MediaKind,
    pub provider_ids: BTreeSet<u32>,
    pub original_language: Option<LanguageCode>,
    pub watch_region: Option<RegionCode>,
    /// Scoped to the vocabulary of `media_kind`
    pub genre_ids: BTreeSet<u32>,
    pub sort_key: SortKey,
    pub free_text_query: Option<String>,
    /// Starts at 1
    pub page_cursor: u32,
}

impl FilterState {
    pub fn with_defaults(defaults: &FilterDefaults) -> Self {
        Self {
            media_kind: defaults.media_kind,
            provider_ids: BTreeSet::new(),
            original_language: None,
            watch_region: defaults.watch_region.clone(),
            genre_ids: BTreeSet::new(),
            sort_key: defaults.sort_key,
            free_text_query: None,
            page_cursor: 1,
        }
    }

    /// Builds a state from navigation parameters, applying defaults for
    /// absent keys. Any malformed value rejects the whole input.
    pub fn normalize(
        params: &NavigationParams,
        defaults: &FilterDefaults,
    ) -> Result<Self, FilterError> {
        let mut state = Self::with_defaults(defaults);

        if let Some(raw) = params.get(navigation::MEDIA_TYPE) {
            state.media_kind = raw.parse()?;
        }
        if let Some(raw) = params.get(navigation::PROVIDERS) {
            state.provider_ids = parse_id_list("providers", raw)?;
        }
        if let Some(raw) = params.get(navigation::LANGUAGE) {
            state.original_language = Some(raw.parse()?);
        }
        if let Some(raw) = params.get(navigation::REGION) {
            state.watch_region = Some(raw.parse()?);
        }
        if let Some(raw) = params.get(navigation::GENRES) {
            state.genre_ids = parse_id_list("genres", raw)?;
        }
        if let Some(raw) = params.get(navigation::SORT_BY) {
            state.sort_key = raw.parse()?;
        }
        if let Some(raw) = params.get(navigation::PAGE) {
            state.page_cursor = parse_page(raw)?;
        }

        Ok(state)
    }

    /// Query text when the state is in search mode. Whitespace-only text still
    /// counts; the planner turns it into an empty page.
    pub fn search_text(&self) -> Option<&str> {
        self.free_text_query.as_deref().filter(|text| !text.is_empty())
    }

    pub fn is_search(&self) -> bool {
        self.search_text().is_some()
    }
}

/// Shortcut for [`FilterState::normalize`].
pub fn normalize(
    params: &NavigationParams,
    defaults: &FilterDefaults,
) -> Result<FilterState, FilterError> {
    FilterState::normalize(params, defaults)
}

pub(crate) fn parse_id_list(
    field: &'static str,
    raw: &str,
) -> Result<BTreeSet<u32>, FilterError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>().map_err(|_| FilterError::InvalidIdList {
                field,
                value: part.to_string(),
            })
        })
        .collect()
}

pub(crate) fn parse_page(raw: &str) -> Result<u32, FilterError> {
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(FilterError::InvalidPage(raw.to_string())),
    }
}
