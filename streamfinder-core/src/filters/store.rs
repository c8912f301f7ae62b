use std::collections::{BTreeSet, HashMap};

use streamfinder_model::MediaKind;
use tokio::sync::watch;
use tracing::debug;

use super::navigation::NavigationParams;
use super::state::{FilterDefaults, FilterState};
use super::update::{Change, FilterUpdate};
use crate::error::FilterError;
use crate::query::plan;

/// A published filter state together with its navigation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSnapshot {
    /// Bumped on every visible change
    pub revision: u64,
    pub state: FilterState,
    pub navigation: NavigationParams,
}

impl FilterSnapshot {
    fn initial(state: FilterState) -> Self {
        Self {
            revision: 0,
            navigation: NavigationParams::from_state(&state),
            state,
        }
    }
}

/// Owner of the canonical [`FilterState`].
///
/// Every mutation builds the next state off to the side and publishes it in
/// one step, so subscribers only ever see fully merged snapshots. A rejected
/// update leaves the published snapshot untouched.
#[derive(Debug)]
pub struct FilterStore {
    defaults: FilterDefaults,
    vocabularies: HashMap<MediaKind, BTreeSet<u32>>,
    published: watch::Sender<FilterSnapshot>,
}

impl FilterStore {
    pub fn new(defaults: FilterDefaults) -> Self {
        let state = FilterState::with_defaults(&defaults);
        let (published, _) = watch::channel(FilterSnapshot::initial(state));
        Self {
            defaults,
            vocabularies: HashMap::new(),
            published,
        }
    }

    /// Starts from a navigation query string instead of the defaults.
    pub fn from_navigation(
        query: &str,
        defaults: FilterDefaults,
    ) -> Result<Self, FilterError> {
        let state =
            FilterState::normalize(&NavigationParams::parse(query), &defaults)?;
        let (published, _) = watch::channel(FilterSnapshot::initial(state));
        Ok(Self {
            defaults,
            vocabularies: HashMap::new(),
            published,
        })
    }

    pub fn defaults(&self) -> &FilterDefaults {
        &self.defaults
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        self.published.borrow().clone()
    }

    pub fn state(&self) -> FilterState {
        self.published.borrow().state.clone()
    }

    pub fn navigation(&self) -> NavigationParams {
        self.published.borrow().navigation.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterSnapshot> {
        self.published.subscribe()
    }

    /// Registers the genre vocabulary for `kind`. From now on genre ids
    /// outside it are dropped for that kind, including from the current
    /// state.
    pub fn register_vocabulary<I>(&mut self, kind: MediaKind, ids: I) -> FilterSnapshot
    where
        I: IntoIterator<Item = u32>,
    {
        self.vocabularies.insert(kind, ids.into_iter().collect());
        let current = self.state();
        self.commit(current, false)
    }

    pub fn has_vocabulary(&self, kind: MediaKind) -> bool {
        self.vocabularies.contains_key(&kind)
    }

    /// Merges a partial update into the current state.
    ///
    /// Changing the media kind clears genres unless the same update sets
    /// them. Any change to the fetch key or the query text restarts the page
    /// cursor at 1 unless the update sets a page.
    pub fn apply(
        &mut self,
        update: FilterUpdate,
    ) -> Result<FilterSnapshot, FilterError> {
        if let Change::Set(0) = update.page {
            return Err(FilterError::InvalidPage("0".to_string()));
        }

        let current = self.state();
        let FilterUpdate {
            media_kind,
            provider_ids,
            original_language,
            watch_region,
            genre_ids,
            sort_key,
            free_text_query,
            page,
        } = update;

        let genres_explicit = !genre_ids.is_keep();
        let page_explicit = !page.is_keep();
        let defaults = &self.defaults;

        let mut next = current.clone();
        next.media_kind =
            media_kind.resolve(current.media_kind, || defaults.media_kind);
        next.provider_ids =
            provider_ids.resolve(current.provider_ids.clone(), BTreeSet::new);
        next.original_language =
            original_language.resolve_option(current.original_language.clone());
        next.watch_region = match watch_region {
            Change::Clear => defaults.watch_region.clone(),
            other => other.resolve_option(current.watch_region.clone()),
        };
        next.genre_ids = genre_ids.resolve(current.genre_ids.clone(), BTreeSet::new);
        next.sort_key = sort_key.resolve(current.sort_key, || defaults.sort_key);
        next.free_text_query = free_text_query
            .resolve_option(current.free_text_query.clone())
            .filter(|text| !text.is_empty());
        next.page_cursor = page.resolve(current.page_cursor, || 1);

        if next.media_kind != current.media_kind && !genres_explicit {
            next.genre_ids.clear();
        }

        Ok(self.commit(next, page_explicit))
    }

    /// Replaces the filters with the state described by a navigation query
    /// string. The free-text query is not part of navigation and is kept.
    pub fn sync_from_navigation(
        &mut self,
        query: &str,
    ) -> Result<FilterSnapshot, FilterError> {
        let params = NavigationParams::parse(query);
        let mut next = FilterState::normalize(&params, &self.defaults)?;
        next.free_text_query = self.published.borrow().state.free_text_query.clone();
        Ok(self.commit(next, true))
    }

    pub fn set_search_query(
        &mut self,
        text: impl Into<String>,
    ) -> Result<FilterSnapshot, FilterError> {
        self.apply(FilterUpdate::new().query(text))
    }

    /// Leaves search mode with every other filter intact.
    pub fn clear_search(&mut self) -> Result<FilterSnapshot, FilterError> {
        self.apply(FilterUpdate::new().clear_query())
    }

    fn commit(&mut self, mut next: FilterState, page_explicit: bool) -> FilterSnapshot {
        self.prune_genres(&mut next);

        let current = self.snapshot();
        if !page_explicit {
            let key_changed = plan(&current.state).fetch_key() != plan(&next).fetch_key();
            let text_changed = current.state.free_text_query != next.free_text_query;
            if key_changed || text_changed {
                next.page_cursor = 1;
            }
        }

        if next == current.state {
            debug!(revision = current.revision, "filter update left state unchanged");
            return current;
        }

        let snapshot = FilterSnapshot {
            revision: current.revision + 1,
            navigation: NavigationParams::from_state(&next),
            state: next,
        };
        debug!(
            revision = snapshot.revision,
            navigation = %snapshot.navigation,
            search = snapshot.state.is_search(),
            "publishing filter state"
        );
        self.published.send_replace(snapshot.clone());
        snapshot
    }

    fn prune_genres(&self, state: &mut FilterState) {
        let Some(vocabulary) = self.vocabularies.get(&state.media_kind) else {
            return;
        };
        let before = state.genre_ids.len();
        state.genre_ids.retain(|id| vocabulary.contains(id));
        let dropped = before - state.genre_ids.len();
        if dropped > 0 {
            debug!(
                dropped,
                kind = %state.media_kind,
                "dropping genre ids outside the active vocabulary"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamfinder_model::{RegionCode, SortKey};

    fn store() -> FilterStore {
        FilterStore::new(FilterDefaults::default())
    }

    #[test]
    fn switching_kind_clears_genres() {
        let mut store = store();
        store.apply(FilterUpdate::new().genres([28, 12])).unwrap();
        let snapshot = store
            .apply(FilterUpdate::new().media_kind(MediaKind::TvShow))
            .unwrap();
        assert!(snapshot.state.genre_ids.is_empty());
        assert_eq!(snapshot.state.media_kind, MediaKind::TvShow);
    }

    #[test]
    fn kind_switch_keeps_genres_set_in_the_same_update() {
        let mut store = store();
        let snapshot = store
            .apply(FilterUpdate::new().media_kind(MediaKind::TvShow).genres([16]))
            .unwrap();
        assert_eq!(snapshot.state.genre_ids, BTreeSet::from([16]));
    }

    #[test]
    fn invalid_update_keeps_previous_state() {
        let mut store = store();
        store.apply(FilterUpdate::new().providers([8])).unwrap();
        let before = store.snapshot();

        let err = FilterUpdate::from_params([("mediaType", "radio")])
            .and_then(|update| store.apply(update));
        assert!(err.is_err());
        assert!(store.apply(FilterUpdate::new().page(0)).is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn key_change_restarts_page_unless_page_is_explicit() {
        let mut store = store();
        store.apply(FilterUpdate::new().page(4)).unwrap();
        assert_eq!(store.state().page_cursor, 4);

        let snapshot = store.apply(FilterUpdate::new().sort(SortKey::RevenueDesc)).unwrap();
        assert_eq!(snapshot.state.page_cursor, 1);

        let snapshot = store
            .apply(FilterUpdate::new().sort(SortKey::RevenueAsc).page(2))
            .unwrap();
        assert_eq!(snapshot.state.page_cursor, 2);
    }

    #[test]
    fn search_text_change_restarts_page_and_clear_keeps_filters() {
        let mut store = store();
        store.apply(FilterUpdate::new().providers([8, 337])).unwrap();
        store.set_search_query("alien").unwrap();
        store.apply(FilterUpdate::new().page(3)).unwrap();

        let snapshot = store.set_search_query("aliens").unwrap();
        assert_eq!(snapshot.state.page_cursor, 1);

        let snapshot = store.clear_search().unwrap();
        assert!(!snapshot.state.is_search());
        assert_eq!(snapshot.state.provider_ids, BTreeSet::from([8, 337]));
    }

    #[test]
    fn clearing_region_returns_to_configured_default() {
        let mut store = store();
        store
            .apply(FilterUpdate::new().region(RegionCode::new("US").unwrap()))
            .unwrap();
        let snapshot = store
            .apply(FilterUpdate::from_params([("region", "")]).unwrap())
            .unwrap();
        assert_eq!(snapshot.state.watch_region.unwrap().as_str(), "AU");
    }

    #[test]
    fn unchanged_update_does_not_bump_revision() {
        let mut store = store();
        let first = store.apply(FilterUpdate::new().providers([8])).unwrap();
        let second = store.apply(FilterUpdate::new().providers([8])).unwrap();
        assert_eq!(first.revision, second.revision);
    }

    #[test]
    fn vocabulary_prunes_unknown_genres() {
        let mut store = store();
        store.apply(FilterUpdate::new().genres([28, 99_999])).unwrap();
        assert!(!store.has_vocabulary(MediaKind::Movie));
        let snapshot = store.register_vocabulary(MediaKind::Movie, [28, 12, 16]);
        assert_eq!(snapshot.state.genre_ids, BTreeSet::from([28]));
        assert!(store.has_vocabulary(MediaKind::Movie));
        assert!(!store.has_vocabulary(MediaKind::TvShow));

        let snapshot = store.apply(FilterUpdate::new().genres([12, 4242])).unwrap();
        assert_eq!(snapshot.state.genre_ids, BTreeSet::from([12]));
    }

    #[test]
    fn navigation_sync_keeps_search_text() {
        let mut store = store();
        store.set_search_query("heat").unwrap();
        let snapshot = store
            .sync_from_navigation("mediaType=tv&region=GB&page=2")
            .unwrap();
        assert_eq!(snapshot.state.media_kind, MediaKind::TvShow);
        assert_eq!(snapshot.state.page_cursor, 2);
        assert_eq!(snapshot.state.free_text_query.as_deref(), Some("heat"));
        assert_eq!(snapshot.navigation.get("region"), Some("GB"));
    }

    #[test]
    fn subscribers_see_whole_snapshots() {
        let mut store = store();
        let mut rx = store.subscribe();
        store
            .apply(
                FilterUpdate::new()
                    .media_kind(MediaKind::TvShow)
                    .providers([8])
                    .sort(SortKey::VoteAverageDesc),
            )
            .unwrap();

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.state.media_kind, MediaKind::TvShow);
        assert_eq!(seen.state.provider_ids, BTreeSet::from([8]));
        assert_eq!(seen.state.sort_key, SortKey::VoteAverageDesc);
        assert_eq!(seen.navigation.get("providers"), Some("8"));
    }
}
