//! # Streamfinder Core
//!
//! Client-side core of the streamfinder media discovery client: it turns a
//! set of browse filters into upstream TMDB requests, accumulates the paged
//! results, and folds per-country watch-provider data into a
//! provider-centric view.
//!
//! ## Overview
//!
//! - **Filter state**: one canonical [`FilterState`] kept in sync with its
//!   navigation (query-string) form by the [`FilterStore`]
//! - **Query planning**: [`plan`] maps filter state to a search or discover
//!   request
//! - **Pagination**: [`PageAccumulator`] merges pages for one fetch key,
//!   deduplicates by `(id, kind)` and discards stale responses
//! - **Availability**: [`aggregate`] groups watch providers across countries
//!   per monetization category
//! - **Gateway**: the [`MetadataGateway`] contract and its HTTP
//!   implementation [`TmdbGateway`]
//!
//! [`BrowseSession`] wires these together for a single browse view.
//!
//! ## Examples
//!
//! ```no_run
//! use streamfinder_core::{BrowseSession, FilterDefaults, FilterUpdate, TmdbGateway, TmdbSettings};
//! use streamfinder_model::SortKey;
//!
//! async fn browse() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = TmdbGateway::new(TmdbSettings {
//!         api_token: Some("token".to_string()),
//!         ..TmdbSettings::default()
//!     })?;
//!     let mut session = BrowseSession::new(gateway, FilterDefaults::default());
//!
//!     session.sync_from_navigation("mediaType=movie&providers=8,337").await?;
//!     session.apply(FilterUpdate::new().sort(SortKey::VoteAverageDesc)).await?;
//!     while session.load_more().await? {}
//!
//!     for item in session.results().items() {
//!         println!("{} ({})", item.display_title, item.rating_label());
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Watch-provider aggregation across countries
pub mod availability;

/// Error types shared by the filter store and browse session
pub mod error;

/// Filter state, navigation sync and the filter store
pub mod filters;

/// Metadata gateway contract and the TMDB HTTP client
pub mod gateway;

/// Page accumulation and fetch dispatch
pub mod pagination;

/// Filter state to request planning
pub mod query;

/// Browse session driver
pub mod session;

pub use availability::{AvailabilityIndex, RawAvailability, aggregate};
pub use error::{FilterError, Result, SessionError};
pub use filters::{
    Change, FilterDefaults, FilterSnapshot, FilterState, FilterStore, FilterUpdate,
    NavigationParams, normalize,
};
pub use gateway::{
    CacheTtls, GatewayError, MetadataGateway, ResponseMemo, TitleDetail, TmdbGateway,
    TmdbSettings,
};
pub use pagination::{
    AccumulatedResultSet, FetchTicket, LoadState, PageAccumulator, Resolution, dispatch,
};
pub use query::{DiscoverRequest, FetchKey, RequestSpec, SearchRequest, plan};
pub use session::BrowseSession;
