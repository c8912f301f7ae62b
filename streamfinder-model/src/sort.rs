use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Upstream ranking order for discover listings.
///
/// Ranking itself is done by the remote API; this only names the field and
/// direction passed as `sort_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortKey {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "popularity.desc"))]
    PopularityDesc,
    #[cfg_attr(feature = "serde", serde(rename = "popularity.asc"))]
    PopularityAsc,
    #[cfg_attr(feature = "serde", serde(rename = "vote_average.desc"))]
    VoteAverageDesc,
    #[cfg_attr(feature = "serde", serde(rename = "vote_average.asc"))]
    VoteAverageAsc,
    #[cfg_attr(feature = "serde", serde(rename = "primary_release_date.desc"))]
    ReleaseDateDesc,
    #[cfg_attr(feature = "serde", serde(rename = "primary_release_date.asc"))]
    ReleaseDateAsc,
    #[cfg_attr(feature = "serde", serde(rename = "revenue.desc"))]
    RevenueDesc,
    #[cfg_attr(feature = "serde", serde(rename = "revenue.asc"))]
    RevenueAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::PopularityDesc,
        SortKey::PopularityAsc,
        SortKey::VoteAverageDesc,
        SortKey::VoteAverageAsc,
        SortKey::ReleaseDateDesc,
        SortKey::ReleaseDateAsc,
        SortKey::RevenueDesc,
        SortKey::RevenueAsc,
    ];

    /// Wire token sent as `sort_by` and stored in navigation state.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::PopularityAsc => "popularity.asc",
            SortKey::VoteAverageDesc => "vote_average.desc",
            SortKey::VoteAverageAsc => "vote_average.asc",
            SortKey::ReleaseDateDesc => "primary_release_date.desc",
            SortKey::ReleaseDateAsc => "primary_release_date.asc",
            SortKey::RevenueDesc => "revenue.desc",
            SortKey::RevenueAsc => "revenue.asc",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "Popularity (High to Low)",
            SortKey::PopularityAsc => "Popularity (Low to High)",
            SortKey::VoteAverageDesc => "Rating (High to Low)",
            SortKey::VoteAverageAsc => "Rating (Low to High)",
            SortKey::ReleaseDateDesc => "Release Date (Newest)",
            SortKey::ReleaseDateAsc => "Release Date (Oldest)",
            SortKey::RevenueDesc => "Revenue (High to Low)",
            SortKey::RevenueAsc => "Revenue (Low to High)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == trimmed)
            .ok_or_else(|| ModelError::InvalidSortKey(trimmed.to_string()))
    }
}
