//! Display rows for one region's statistics.
use std::time::Duration;

use crate::error::SnapshotError;
use crate::snapshot::RegionSnapshot;

pub const THROUGHPUT_HEADING: &str = "   TotReqs   TotBytes    AvgTime   AvgReq/s  AvgKbps/s";
pub const LATENCY_HEADING: &str = "   Slowest    Fastest   Timeouts  TotErrors";
/// Shown in the TotErrors column when the histogram is inconsistent.
const INVALID_ERRORS: &str = "invalid";

/// Formatted value rows for one region, matching the two headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRows {
    pub throughput: String,
    pub latency: String,
    pub errors: Result<u64, SnapshotError>,
}

#[must_use]
pub fn format_region(data: &RegionSnapshot) -> RegionRows {
    let errors = data.total_errors();
    let errors_cell = match &errors {
        Ok(count) => count.to_string(),
        Err(_) => INVALID_ERRORS.to_owned(),
    };
    let throughput = format!(
        "{:>10} {:>10}   {} {:>10.2} {:>10.2}",
        data.total_requests,
        format_bytes(data.bytes_read),
        format_seconds(data.avg_time_per_request),
        data.avg_requests_per_sec,
        data.avg_kbytes_per_sec
    );
    let latency = format!(
        "  {}   {} {:>10} {:>10}",
        format_seconds(data.slowest),
        format_seconds(data.fastest),
        data.timed_out,
        errors_cell
    );
    RegionRows {
        throughput,
        latency,
        errors,
    }
}

/// Seconds with millisecond precision, right aligned to seven columns.
#[must_use]
pub fn format_seconds(value: Duration) -> String {
    format!("{:7.3}s", value.as_secs_f64())
}

/// Byte count with a decimal magnitude suffix, e.g. `512B` or `1.50MB`.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    let (scale, suffix) = select_bytes_scale(bytes);
    if scale == 1 {
        return format!("{bytes}{suffix}");
    }
    let whole = bytes.checked_div(scale).unwrap_or(0);
    let frac = bytes
        .checked_rem(scale)
        .unwrap_or(0)
        .saturating_mul(100)
        .checked_div(scale)
        .unwrap_or(0);
    format!("{whole}.{frac:02}{suffix}")
}

const fn select_bytes_scale(value: u64) -> (u64, &'static str) {
    if value >= 1_000_000_000_000_000 {
        (1_000_000_000_000_000, "PB")
    } else if value >= 1_000_000_000_000 {
        (1_000_000_000_000, "TB")
    } else if value >= 1_000_000_000 {
        (1_000_000_000, "GB")
    } else if value >= 1_000_000 {
        (1_000_000, "MB")
    } else if value >= 1_000 {
        (1_000, "KB")
    } else {
        (1, "B")
    }
}
