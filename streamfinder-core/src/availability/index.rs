use std::collections::BTreeSet;

use streamfinder_model::{MonetizationCategory, ProviderAvailability};

use super::aggregate::{RawAvailability, aggregate};

/// All three categories of a title's availability, aggregated once per
/// detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityIndex {
    stream: Vec<ProviderAvailability>,
    rent: Vec<ProviderAvailability>,
    buy: Vec<ProviderAvailability>,
}

impl AvailabilityIndex {
    pub fn build(raw: &RawAvailability) -> Self {
        Self {
            stream: aggregate(raw, MonetizationCategory::Flatrate),
            rent: aggregate(raw, MonetizationCategory::Rent),
            buy: aggregate(raw, MonetizationCategory::Buy),
        }
    }

    pub fn providers(&self, category: MonetizationCategory) -> &[ProviderAvailability] {
        match category {
            MonetizationCategory::Flatrate => &self.stream,
            MonetizationCategory::Rent => &self.rent,
            MonetizationCategory::Buy => &self.buy,
        }
    }

    /// Badge count for a category tab.
    pub fn count(&self, category: MonetizationCategory) -> usize {
        self.providers(category).len()
    }

    pub fn is_empty(&self) -> bool {
        self.stream.is_empty() && self.rent.is_empty() && self.buy.is_empty()
    }

    /// Providers offering `category` in a single country, in index order.
    pub fn providers_in<'a>(
        &'a self,
        country: &'a str,
        category: MonetizationCategory,
    ) -> impl Iterator<Item = &'a ProviderAvailability> + 'a {
        self.providers(category)
            .iter()
            .filter(move |provider| provider.is_available_in(country))
    }

    /// Every country with at least one provider in any category.
    pub fn countries(&self) -> BTreeSet<&str> {
        MonetizationCategory::ALL
            .into_iter()
            .flat_map(|category| self.providers(category))
            .flat_map(|provider| provider.countries.iter().map(String::as_str))
            .collect()
    }
}
