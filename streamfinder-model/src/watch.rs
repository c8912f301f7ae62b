use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Availability category reported per country in a title's provider payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MonetizationCategory {
    /// Subscription streaming
    #[default]
    Flatrate,
    Rent,
    Buy,
}

impl MonetizationCategory {
    pub const ALL: [MonetizationCategory; 3] =
        [Self::Flatrate, Self::Rent, Self::Buy];

    /// Key of the category list inside a country entry.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flatrate => "flatrate",
            Self::Rent => "rent",
            Self::Buy => "buy",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Flatrate => "Stream",
            Self::Rent => "Rent",
            Self::Buy => "Buy",
        }
    }
}

impl fmt::Display for MonetizationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonetizationCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == trimmed)
            .ok_or_else(|| ModelError::InvalidCategory(trimmed.to_string()))
    }
}

/// Monetization filter accepted by the discover endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MonetizationType {
    Flatrate,
    Free,
    Ads,
    Rent,
    Buy,
}

impl MonetizationType {
    /// Every type, in the order they are sent upstream.
    pub const ALL: [MonetizationType; 5] =
        [Self::Flatrate, Self::Free, Self::Ads, Self::Rent, Self::Buy];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flatrate => "flatrate",
            Self::Free => "free",
            Self::Ads => "ads",
            Self::Rent => "rent",
            Self::Buy => "buy",
        }
    }

    /// Joins types with the upstream OR separator, e.g. `flatrate|free`.
    pub fn pipe_joined(types: &[MonetizationType]) -> String {
        types
            .iter()
            .map(MonetizationType::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for MonetizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider and every country in which it offers a title.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProviderAvailability {
    pub provider_id: u32,
    pub provider_name: String,
    pub logo_path: Option<String>,
    /// Country codes, no duplicates
    pub countries: BTreeSet<String>,
}

impl ProviderAvailability {
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn is_available_in(&self, country: &str) -> bool {
        self.countries.contains(country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_monetization_types_join_in_upstream_order() {
        assert_eq!(
            MonetizationType::pipe_joined(&MonetizationType::ALL),
            "flatrate|free|ads|rent|buy"
        );
    }

    #[test]
    fn category_round_trips_through_its_key() {
        for category in MonetizationCategory::ALL {
            assert_eq!(
                category.as_str().parse::<MonetizationCategory>().unwrap(),
                category
            );
        }
        assert!("ads".parse::<MonetizationCategory>().is_err());
    }
}
