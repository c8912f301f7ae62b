//! Filter state to upstream request translation.

pub mod planner;

pub use planner::{DiscoverRequest, FetchKey, RequestSpec, SearchRequest, plan};
