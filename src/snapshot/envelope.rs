use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::RegionSnapshot;

/// One tick of the result stream: every region's statistics plus the
/// expected request total for the whole run (`<= 0` when unknown).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AggregateEnvelope {
    pub regions: HashMap<String, RegionSnapshot>,
    pub total_expected_requests: i64,
}

impl AggregateEnvelope {
    /// Region identifiers in ascending lexicographic order.
    #[must_use]
    pub fn sorted_region_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Completed requests summed across all regions.
    #[must_use]
    pub fn total_completed(&self) -> u64 {
        self.regions
            .values()
            .fold(0u64, |acc, region| acc.saturating_add(region.total_requests))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
