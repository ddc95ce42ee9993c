use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// HTTP status code (as reported on the wire) to occurrence count.
pub type StatusCounts = BTreeMap<String, u64>;

/// Status codes below this value count as successful responses.
const ERROR_STATUS_FLOOR: i64 = 400;

/// Aggregate statistics for one region as of the latest update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionSnapshot {
    pub region: String,
    #[serde(rename = "total-reqs")]
    pub total_requests: u64,
    #[serde(rename = "tot-bytes-read")]
    pub bytes_read: u64,
    #[serde(rename = "ave-time-for-req", with = "super::nanos")]
    pub avg_time_per_request: Duration,
    #[serde(rename = "ave-req-per-sec")]
    pub avg_requests_per_sec: f64,
    #[serde(rename = "ave-kbytes-per-sec")]
    pub avg_kbytes_per_sec: f64,
    #[serde(with = "super::nanos")]
    pub slowest: Duration,
    #[serde(with = "super::nanos")]
    pub fastest: Duration,
    #[serde(rename = "total-timed-out")]
    pub timed_out: u64,
    pub statuses: StatusCounts,
}

impl RegionSnapshot {
    /// Sum of histogram counts whose key parses as a status code below 400.
    ///
    /// Keys that do not parse as an integer, including padded ones such as
    /// `" 200"`, never count as successful.
    #[must_use]
    pub fn successful_requests(&self) -> u64 {
        self.statuses
            .iter()
            .filter(|(status, _)| {
                status
                    .parse::<i64>()
                    .is_ok_and(|code| code < ERROR_STATUS_FLOOR)
            })
            .fold(0u64, |acc, (_, count)| acc.saturating_add(*count))
    }

    /// Requests that did not end in a successful status.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NegativeErrorCount`] when the histogram
    /// reports more successful responses than total requests.
    pub fn total_errors(&self) -> Result<u64, SnapshotError> {
        let ok = self.successful_requests();
        self.total_requests
            .checked_sub(ok)
            .ok_or_else(|| SnapshotError::NegativeErrorCount {
                region: self.region.clone(),
                total: self.total_requests,
                ok,
            })
    }

    /// Adds every field of `other` into `self`; histograms merge per status key.
    #[expect(
        clippy::float_arithmetic,
        reason = "Per-second averages are reported as floats"
    )]
    pub fn accumulate(&mut self, other: &Self) {
        self.total_requests = self.total_requests.saturating_add(other.total_requests);
        self.bytes_read = self.bytes_read.saturating_add(other.bytes_read);
        self.avg_time_per_request = self
            .avg_time_per_request
            .saturating_add(other.avg_time_per_request);
        self.avg_requests_per_sec += other.avg_requests_per_sec;
        self.avg_kbytes_per_sec += other.avg_kbytes_per_sec;
        self.slowest = self.slowest.saturating_add(other.slowest);
        self.fastest = self.fastest.saturating_add(other.fastest);
        self.timed_out = self.timed_out.saturating_add(other.timed_out);
        for (status, count) in &other.statuses {
            let entry = self.statuses.entry(status.clone()).or_insert(0);
            *entry = entry.saturating_add(*count);
        }
    }
}
