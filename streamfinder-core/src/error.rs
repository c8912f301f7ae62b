use std::sync::Arc;

use streamfinder_model::ModelError;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Rejection of a filter input. The store keeps its previous state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Media kind, sort key, region or language failed to parse
    #[error(transparent)]
    Invalid(#[from] ModelError),

    #[error("invalid page '{0}' (expected an integer >= 1)")]
    InvalidPage(String),

    #[error("invalid {field} list entry '{value}'")]
    InvalidIdList { field: &'static str, value: String },
}

impl FilterError {
    pub fn is_media_kind(&self) -> bool {
        matches!(self, FilterError::Invalid(ModelError::InvalidMediaKind(_)))
    }
}

/// Failure of a browse session operation.
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Shared with the accumulator's failed state
    #[error(transparent)]
    Gateway(Arc<GatewayError>),
}

impl SessionError {
    pub fn gateway(&self) -> Option<&GatewayError> {
        match self {
            SessionError::Gateway(cause) => Some(cause.as_ref()),
            SessionError::Filter(_) => None,
        }
    }
}

impl From<GatewayError> for SessionError {
    fn from(value: GatewayError) -> Self {
        SessionError::Gateway(Arc::new(value))
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
