use std::collections::HashMap;

use streamfinder_model::{ExternalIds, Genre, MediaKind};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{Result, SessionError};
use crate::filters::{
    FilterDefaults, FilterSnapshot, FilterStore, FilterUpdate, NavigationParams,
};
use crate::gateway::{MetadataGateway, TitleDetail};
use crate::pagination::{
    AccumulatedResultSet, FetchTicket, LoadState, PageAccumulator, Resolution,
    dispatch,
};
use crate::query::{RequestSpec, plan};

/// Drives one browse view: a filter store feeding a page accumulator
/// through a gateway.
///
/// Each filter change re-plans the request; a changed fetch key restarts
/// accumulation at its first page.
#[derive(Debug)]
pub struct BrowseSession<G> {
    gateway: G,
    filters: FilterStore,
    pages: PageAccumulator,
    genres: HashMap<MediaKind, Vec<Genre>>,
}

impl<G: MetadataGateway> BrowseSession<G> {
    pub fn new(gateway: G, defaults: FilterDefaults) -> Self {
        Self::with_store(gateway, FilterStore::new(defaults))
    }

    pub fn with_store(gateway: G, filters: FilterStore) -> Self {
        Self {
            gateway,
            filters,
            pages: PageAccumulator::new(),
            genres: HashMap::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterSnapshot> {
        self.filters.subscribe()
    }

    pub fn results(&self) -> &AccumulatedResultSet {
        self.pages.results()
    }

    pub fn state(&self) -> &LoadState {
        self.pages.state()
    }

    pub fn navigation(&self) -> NavigationParams {
        self.filters.navigation()
    }

    /// Request for the current filters at their page cursor.
    pub fn planned_request(&self) -> RequestSpec {
        plan(&self.filters.state())
    }

    /// Loads the first page for the current filters if their fetch key is
    /// not loaded yet.
    pub async fn refresh(&mut self) -> Result<()> {
        let request = self.planned_request();
        match self.pages.establish(&request) {
            Some(ticket) => self.run(ticket).await,
            None => Ok(()),
        }
    }

    pub async fn apply(&mut self, update: FilterUpdate) -> Result<FilterSnapshot> {
        let snapshot = self.filters.apply(update)?;
        self.refresh().await?;
        Ok(snapshot)
    }

    pub async fn sync_from_navigation(&mut self, query: &str) -> Result<FilterSnapshot> {
        let snapshot = self.filters.sync_from_navigation(query)?;
        self.refresh().await?;
        Ok(snapshot)
    }

    pub async fn set_search_query(&mut self, text: &str) -> Result<FilterSnapshot> {
        let snapshot = self.filters.set_search_query(text)?;
        self.refresh().await?;
        Ok(snapshot)
    }

    pub async fn clear_search(&mut self) -> Result<FilterSnapshot> {
        let snapshot = self.filters.clear_search()?;
        self.refresh().await?;
        Ok(snapshot)
    }

    /// Continuation signal. Returns whether a page was fetched; a signal
    /// while loading, failed or exhausted is ignored.
    pub async fn load_more(&mut self) -> Result<bool> {
        match self.pages.request_more() {
            Some(ticket) => self.run(ticket).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Re-issues the first page after a failure. No-op otherwise.
    pub async fn retry(&mut self) -> Result<bool> {
        if !self.pages.state().is_failed() {
            return Ok(false);
        }
        info!("retrying after failed fetch");
        self.refresh().await.map(|()| true)
    }

    /// Fetches the genre vocabulary for `kind` once and registers it with
    /// the filter store.
    pub async fn load_genres(&mut self, kind: MediaKind) -> Result<Vec<Genre>> {
        if let Some(genres) = self.genres.get(&kind) {
            return Ok(genres.clone());
        }
        let genres = self.gateway.fetch_genre_vocabulary(kind).await?;
        debug!(kind = %kind, count = genres.len(), "registering genre vocabulary");
        let before = self.filters.snapshot().revision;
        let snapshot = self
            .filters
            .register_vocabulary(kind, genres.iter().map(|genre| genre.id));
        self.genres.insert(kind, genres.clone());
        if snapshot.revision != before {
            self.refresh().await?;
        }
        Ok(genres)
    }

    pub async fn detail(&self, kind: MediaKind, id: u64) -> Result<TitleDetail> {
        Ok(self.gateway.fetch_detail(kind, id).await?)
    }

    pub async fn external_ids(&self, kind: MediaKind, id: u64) -> Result<ExternalIds> {
        Ok(self.gateway.fetch_external_ids(kind, id).await?)
    }

    async fn run(&mut self, ticket: FetchTicket) -> Result<()> {
        let outcome = dispatch(&self.gateway, &ticket).await;
        match self.pages.resolve(&ticket, outcome) {
            Resolution::Failed(cause) => Err(SessionError::Gateway(cause)),
            Resolution::Applied { .. } | Resolution::Stale => Ok(()),
        }
    }
}
