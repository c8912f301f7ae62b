use std::collections::BTreeSet;

use streamfinder_model::{LanguageCode, MediaKind, RegionCode, SortKey};

use super::navigation;
use super::state::{parse_id_list, parse_page};
use crate::error::FilterError;

/// One field of a partial update.
///
/// `Clear` returns the field to its default: empty for sets and optional
/// values, the configured fallback for kind, region, sort and page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Change<T> {
    #[default]
    Keep,
    Set(T),
    Clear,
}

impl<T> Change<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Change::Keep)
    }

    pub(crate) fn resolve(self, current: T, default: impl FnOnce() -> T) -> T {
        match self {
            Change::Keep => current,
            Change::Set(value) => value,
            Change::Clear => default(),
        }
    }

    pub(crate) fn resolve_option(self, current: Option<T>) -> Option<T> {
        match self {
            Change::Keep => current,
            Change::Set(value) => Some(value),
            Change::Clear => None,
        }
    }
}

/// Partial change merged into the current state by
/// [`FilterStore::apply`](super::FilterStore::apply).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub media_kind: Change<MediaKind>,
    pub provider_ids: Change<BTreeSet<u32>>,
    pub original_language: Change<LanguageCode>,
    pub watch_region: Change<RegionCode>,
    pub genre_ids: Change<BTreeSet<u32>>,
    pub sort_key: Change<SortKey>,
    pub free_text_query: Change<String>,
    pub page: Change<u32>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn media_kind(mut self, kind: MediaKind) -> Self {
        self.media_kind = Change::Set(kind);
        self
    }

    pub fn providers<I: IntoIterator<Item = u32>>(mut self, ids: I) -> Self {
        self.provider_ids = set_or_clear(ids.into_iter().collect());
        self
    }

    pub fn clear_providers(mut self) -> Self {
        self.provider_ids = Change::Clear;
        self
    }

    pub fn language(mut self, language: LanguageCode) -> Self {
        self.original_language = Change::Set(language);
        self
    }

    pub fn clear_language(mut self) -> Self {
        self.original_language = Change::Clear;
        self
    }

    pub fn region(mut self, region: RegionCode) -> Self {
        self.watch_region = Change::Set(region);
        self
    }

    pub fn genres<I: IntoIterator<Item = u32>>(mut self, ids: I) -> Self {
        self.genre_ids = set_or_clear(ids.into_iter().collect());
        self
    }

    pub fn clear_genres(mut self) -> Self {
        self.genre_ids = Change::Clear;
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort_key = Change::Set(key);
        self
    }

    /// Empty text leaves search mode.
    pub fn query(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.free_text_query = if text.is_empty() {
            Change::Clear
        } else {
            Change::Set(text)
        };
        self
    }

    pub fn clear_query(mut self) -> Self {
        self.free_text_query = Change::Clear;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Change::Set(page);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Builds an update from navigation-style pairs. Keys that are present
    /// with an empty value are cleared; unknown keys are ignored.
    pub fn from_params<I, K, V>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut update = Self::new();

        for (key, value) in pairs {
            let raw = value.as_ref().trim();
            let blank = raw.is_empty();
            match key.as_ref() {
                navigation::MEDIA_TYPE => {
                    update.media_kind = if blank {
                        Change::Clear
                    } else {
                        Change::Set(raw.parse()?)
                    };
                }
                navigation::PROVIDERS => {
                    update.provider_ids = set_or_clear(parse_id_list("providers", raw)?);
                }
                navigation::LANGUAGE => {
                    update.original_language = if blank {
                        Change::Clear
                    } else {
                        Change::Set(raw.parse()?)
                    };
                }
                navigation::REGION => {
                    update.watch_region = if blank {
                        Change::Clear
                    } else {
                        Change::Set(raw.parse()?)
                    };
                }
                navigation::GENRES => {
                    update.genre_ids = set_or_clear(parse_id_list("genres", raw)?);
                }
                navigation::SORT_BY => {
                    update.sort_key = if blank {
                        Change::Clear
                    } else {
                        Change::Set(raw.parse()?)
                    };
                }
                navigation::PAGE => {
                    update.page = if blank {
                        Change::Clear
                    } else {
                        Change::Set(parse_page(raw)?)
                    };
                }
                _ => {}
            }
        }

        Ok(update)
    }
}

fn set_or_clear(ids: BTreeSet<u32>) -> Change<BTreeSet<u32>> {
    if ids.is_empty() {
        Change::Clear
    } else {
        Change::Set(ids)
    }
}
