//! Per-country watch-provider payload to provider/country index.

pub mod aggregate;
pub mod index;

pub use aggregate::{RawAvailability, aggregate};
pub use index::AvailabilityIndex;
