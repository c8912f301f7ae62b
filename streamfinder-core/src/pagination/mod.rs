//! Incremental page accumulation with continuation and a stale-response
//! guard.

pub mod accumulator;
pub mod dispatch;

pub use accumulator::{
    AccumulatedResultSet, FetchTicket, LoadState, PageAccumulator, Resolution,
};
pub use dispatch::dispatch;
