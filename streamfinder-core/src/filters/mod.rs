//! Canonical filter state, its navigation form and the store that
//! publishes it.

pub mod navigation;
pub mod state;
pub mod store;
pub mod update;

pub use navigation::NavigationParams;
pub use state::{FilterDefaults, FilterState, normalize};
pub use store::{FilterSnapshot, FilterStore};
pub use update::{Change, FilterUpdate};
