//! Flat, string-keyed representation of a [`FilterState`] suitable for a
//! shareable query string.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use url::form_urlencoded;

use super::state::FilterState;

pub const MEDIA_TYPE: &str = "mediaType";
pub const PROVIDERS: &str = "providers";
pub const LANGUAGE: &str = "language";
pub const REGION: &str = "region";
pub const PAGE: &str = "page";
pub const GENRES: &str = "genres";
pub const SORT_BY: &str = "sortBy";

/// Navigation parameters. Keys with empty values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams(BTreeMap<String, String>);

impl NavigationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without the leading `?`. Later
    /// duplicates win.
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.insert(key.into_owned(), value.into_owned());
        }
        params
    }

    /// The free-text query is not part of navigation.
    pub fn from_state(state: &FilterState) -> Self {
        let mut params = Self::new();
        params.insert(MEDIA_TYPE, state.media_kind.as_str());
        params.insert(PROVIDERS, comma_joined(&state.provider_ids));
        if let Some(language) = &state.original_language {
            params.insert(LANGUAGE, language.as_str());
        }
        if let Some(region) = &state.watch_region {
            params.insert(REGION, region.as_str());
        }
        params.insert(PAGE, state.page_cursor.to_string());
        params.insert(GENRES, comma_joined(&state.genre_ids));
        params.insert(SORT_BY, state.sort_key.as_str());
        params
    }

    /// Inserts or replaces a key. An empty or blank value removes it.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value.trim().to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

impl fmt::Display for NavigationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NavigationParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

pub(crate) fn comma_joined(ids: &BTreeSet<u32>) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
