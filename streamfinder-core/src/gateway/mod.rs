//! Contract over the remote metadata API and its TMDB implementation.

pub mod cache;
pub mod tmdb;
pub mod wire;

use async_trait::async_trait;
use streamfinder_model::{ExternalIds, Genre, MediaDetail, MediaKind, ResultPage};
use thiserror::Error;

use crate::availability::{AvailabilityIndex, RawAvailability};
use crate::query::DiscoverRequest;

pub use cache::{CacheTtls, ResponseMemo};
pub use tmdb::{TmdbGateway, TmdbSettings};

#[derive(Error, Debug)]
pub enum GatewayError {
    /// No bearer credential; raised before any network call
    #[error("API token not configured")]
    MissingCredential,

    #[error("TMDB API error: {status}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// Configuration problems cannot be fixed by retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GatewayError::MissingCredential)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Detail response: descriptive fields plus the raw per-country provider
/// payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDetail {
    pub detail: MediaDetail,
    pub availability: RawAvailability,
}

impl TitleDetail {
    pub fn availability_index(&self) -> AvailabilityIndex {
        AvailabilityIndex::build(&self.availability)
    }
}

/// Possibly failing asynchronous access to listings, vocabularies and
/// details.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataGateway: Send + Sync {
    async fn fetch_genre_vocabulary(
        &self,
        kind: MediaKind,
    ) -> Result<Vec<Genre>, GatewayError>;

    async fn fetch_discover_page(
        &self,
        request: &DiscoverRequest,
    ) -> Result<ResultPage, GatewayError>;

    async fn fetch_search_page(
        &self,
        text: &str,
        kind: MediaKind,
        page: u32,
    ) -> Result<ResultPage, GatewayError>;

    async fn fetch_detail(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<TitleDetail, GatewayError>;

    async fn fetch_external_ids(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<ExternalIds, GatewayError>;
}
