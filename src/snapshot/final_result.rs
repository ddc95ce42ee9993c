use super::{AggregateEnvelope, RegionSnapshot};

/// Key of the synthetic cross-region entry in summaries and exports.
pub const OVERALL_KEY: &str = "overall";

/// The last envelope observed before the dashboard loop stopped, plus the
/// cross-region totals derived from it.
#[derive(Debug, Clone, Default)]
pub struct FinalResult {
    envelope: AggregateEnvelope,
    overall: Option<RegionSnapshot>,
}

impl FinalResult {
    #[must_use]
    pub fn new(last: Option<AggregateEnvelope>) -> Self {
        let envelope = last.unwrap_or_default();
        let overall = if envelope.is_empty() {
            None
        } else {
            Some(sum_regions(envelope.regions.values()))
        };
        Self { envelope, overall }
    }

    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.envelope.is_empty()
    }

    /// Regions paired with their identifiers, in ascending identifier order.
    #[must_use]
    pub fn regions(&self) -> Vec<(&str, &RegionSnapshot)> {
        self.envelope
            .sorted_region_ids()
            .into_iter()
            .filter_map(|id| self.envelope.regions.get(id).map(|data| (id, data)))
            .collect()
    }

    #[must_use]
    pub const fn overall(&self) -> Option<&RegionSnapshot> {
        self.overall.as_ref()
    }
}

/// Field-wise sum of all regions, labelled [`OVERALL_KEY`].
#[must_use]
pub fn sum_regions<'snap, I>(regions: I) -> RegionSnapshot
where
    I: IntoIterator<Item = &'snap RegionSnapshot>,
{
    let mut overall = RegionSnapshot {
        region: OVERALL_KEY.to_owned(),
        ..RegionSnapshot::default()
    };
    for region in regions {
        overall.accumulate(region);
    }
    overall
}
