use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use streamfinder_model::{MonetizationCategory, ProviderAvailability};
use tracing::debug;

/// Per-country provider payload as returned upstream: country code to an
/// object with optional `flatrate`, `rent` and `buy` lists.
///
/// The shape is not trusted; anything other than an object of objects
/// contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAvailability(Value);

impl RawAvailability {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Country entries in key order. Empty if the payload is not an object.
    pub fn countries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .as_object()
            .into_iter()
            .flat_map(|map| map.iter())
            .map(|(country, entry)| (country.as_str(), entry))
    }
}

impl From<Value> for RawAvailability {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Collapses the payload into one entry per provider for `category`, each
/// with every country it appeared in.
///
/// Ordered by country count descending, then provider id ascending. Countries
/// without the category are skipped, as are non-list category values and
/// entries without a numeric `provider_id`.
pub fn aggregate(
    raw: &RawAvailability,
    category: MonetizationCategory,
) -> Vec<ProviderAvailability> {
    let mut by_provider: BTreeMap<u32, ProviderAvailability> = BTreeMap::new();

    for (country, entry) in raw.countries() {
        let Some(listed) = entry.get(category.as_str()) else {
            continue;
        };
        let Some(items) = listed.as_array() else {
            debug!(country, category = %category, "category is not a list; skipping country");
            continue;
        };

        for item in items {
            let Some(provider_id) = provider_id(item) else {
                debug!(country, category = %category, "skipping provider entry without id");
                continue;
            };
            by_provider
                .entry(provider_id)
                .or_insert_with(|| ProviderAvailability {
                    provider_id,
                    provider_name: string_field(item, "provider_name").unwrap_or_default(),
                    logo_path: string_field(item, "logo_path"),
                    countries: BTreeSet::new(),
                })
                .countries
                .insert(country.to_string());
        }
    }

    let mut providers: Vec<_> = by_provider.into_values().collect();
    providers.sort_by(|a, b| {
        b.countries
            .len()
            .cmp(&a.countries.len())
            .then(a.provider_id.cmp(&b.provider_id))
    });
    providers
}

fn provider_id(item: &Value) -> Option<u32> {
    item.get("provider_id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> RawAvailability {
        RawAvailability::new(json!({
            "US": {"flatrate": [{"provider_id": 8, "provider_name": "Netflix", "logo_path": "/n.png"}]},
            "GB": {"flatrate": [{"provider_id": 8, "provider_name": "Netflix", "logo_path": "/n.png"}]},
            "FR": {"rent": [{"provider_id": 2, "provider_name": "Apple TV", "logo_path": "/a.png"}]}
        }))
    }

    #[test]
    fn unions_countries_per_provider() {
        let stream = aggregate(&sample(), MonetizationCategory::Flatrate);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].provider_id, 8);
        assert_eq!(stream[0].provider_name, "Netflix");
        assert_eq!(
            stream[0].countries,
            BTreeSet::from(["GB".to_string(), "US".to_string()])
        );

        let rent = aggregate(&sample(), MonetizationCategory::Rent);
        assert_eq!(rent.len(), 1);
        assert_eq!(rent[0].provider_id, 2);
        assert_eq!(rent[0].countries, BTreeSet::from(["FR".to_string()]));

        assert!(aggregate(&sample(), MonetizationCategory::Buy).is_empty());
    }

    #[test]
    fn orders_by_reach_then_id() {
        let raw = RawAvailability::new(json!({
            "AU": {"buy": [{"provider_id": 10}, {"provider_id": 3}, {"provider_id": 7}]},
            "NZ": {"buy": [{"provider_id": 7}, {"provider_id": 10}]},
            "CA": {"buy": [{"provider_id": 7}]}
        }));
        let ids: Vec<_> = aggregate(&raw, MonetizationCategory::Buy)
            .into_iter()
            .map(|p| (p.provider_id, p.countries.len()))
            .collect();
        assert_eq!(ids, vec![(7, 3), (10, 2), (3, 1)]);
    }

    #[test]
    fn tolerates_malformed_entries() {
        let raw = RawAvailability::new(json!({
            "US": {"flatrate": "not a list"},
            "GB": {"flatrate": [{"provider_name": "No id"}, {"provider_id": 9, "provider_name": "Prime"}]},
            "DE": "not an object",
            "JP": {"flatrate": [{"provider_id": -1}]}
        }));
        let stream = aggregate(&raw, MonetizationCategory::Flatrate);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].provider_id, 9);
        assert_eq!(stream[0].countries, BTreeSet::from(["GB".to_string()]));
    }

    #[test]
    fn non_object_payload_is_empty() {
        for value in [json!(null), json!([]), json!("US")] {
            let raw = RawAvailability::new(value);
            assert!(aggregate(&raw, MonetizationCategory::Flatrate).is_empty());
        }
    }

    #[test]
    fn is_deterministic() {
        let first = aggregate(&sample(), MonetizationCategory::Flatrate);
        let second = aggregate(&sample(), MonetizationCategory::Flatrate);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
