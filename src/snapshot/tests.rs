use std::collections::HashMap;
use std::time::Duration;

use super::{AggregateEnvelope, FinalResult, OVERALL_KEY, RegionSnapshot, sum_regions};
use crate::error::SnapshotError;

fn region(id: &str, total: u64, statuses: &[(&str, u64)]) -> RegionSnapshot {
    RegionSnapshot {
        region: id.to_owned(),
        total_requests: total,
        bytes_read: total.saturating_mul(100),
        avg_time_per_request: Duration::from_millis(20),
        avg_requests_per_sec: 50.0,
        avg_kbytes_per_sec: 4.0,
        slowest: Duration::from_millis(90),
        fastest: Duration::from_millis(5),
        timed_out: 1,
        statuses: statuses
            .iter()
            .map(|(status, count)| ((*status).to_owned(), *count))
            .collect(),
    }
}

fn envelope(regions: Vec<RegionSnapshot>, expected: i64) -> AggregateEnvelope {
    AggregateEnvelope {
        regions: regions
            .into_iter()
            .map(|data| (data.region.clone(), data))
            .collect(),
        total_expected_requests: expected,
    }
}

#[test]
fn unparseable_status_counts_as_error() -> Result<(), String> {
    let data = region("us-east-1", 100, &[("200", 80), ("404", 15), ("abc", 5)]);
    let errors = data.total_errors().map_err(|err| err.to_string())?;
    if errors != 20 {
        return Err(format!("Expected 20 errors, got {}", errors));
    }
    Ok(())
}

#[test]
fn padded_status_keys_count_as_errors() -> Result<(), String> {
    for key in [" 200", "200\n", "200 "] {
        let data = region("us-east-1", 10, &[(key, 10)]);
        let errors = data.total_errors().map_err(|err| err.to_string())?;
        if errors != 10 {
            return Err(format!("Expected 10 errors for {:?}, got {}", key, errors));
        }
    }
    Ok(())
}

#[test]
fn redirects_count_as_successful() -> Result<(), String> {
    let data = region("eu-west-1", 10, &[("200", 6), ("302", 2), ("500", 2)]);
    if data.successful_requests() != 8 {
        return Err(format!("Unexpected ok count {}", data.successful_requests()));
    }
    Ok(())
}

#[test]
fn inconsistent_histogram_is_reported() -> Result<(), String> {
    let data = region("ap-northeast-1", 5, &[("200", 7)]);
    match data.total_errors() {
        Err(SnapshotError::NegativeErrorCount { region, total, ok }) => {
            if region != "ap-northeast-1" || total != 5 || ok != 7 {
                return Err(format!("Unexpected diagnostic: {} {} {}", region, total, ok));
            }
            Ok(())
        }
        Ok(value) => Err(format!("Expected diagnostic, got {}", value)),
    }
}

#[test]
fn sorted_region_ids_ignore_insertion_order() -> Result<(), String> {
    let mut regions = HashMap::new();
    for id in ["us-west-2", "ap-northeast-1", "eu-west-1", "us-east-1"] {
        regions.insert(id.to_owned(), region(id, 1, &[]));
    }
    let data = AggregateEnvelope {
        regions,
        total_expected_requests: 0,
    };
    let ids = data.sorted_region_ids();
    if ids != ["ap-northeast-1", "eu-west-1", "us-east-1", "us-west-2"] {
        return Err(format!("Unexpected order: {:?}", ids));
    }
    Ok(())
}

#[test]
fn overall_is_field_wise_sum() -> Result<(), String> {
    let first = region("us-east-1", 500, &[("200", 490), ("503", 10)]);
    let second = region("eu-west-1", 500, &[("200", 495), ("404", 5)]);
    let overall = sum_regions([&first, &second]);

    let checks = [
        (overall.region == OVERALL_KEY, "Unexpected overall label"),
        (overall.total_requests == 1000, "Unexpected total_requests"),
        (overall.bytes_read == 100_000, "Unexpected bytes_read"),
        (
            overall.avg_time_per_request == Duration::from_millis(40),
            "Unexpected avg_time_per_request",
        ),
        (
            (overall.avg_requests_per_sec - 100.0).abs() < f64::EPSILON,
            "Unexpected avg_requests_per_sec",
        ),
        (
            (overall.avg_kbytes_per_sec - 8.0).abs() < f64::EPSILON,
            "Unexpected avg_kbytes_per_sec",
        ),
        (
            overall.slowest == Duration::from_millis(180),
            "Unexpected slowest",
        ),
        (overall.fastest == Duration::from_millis(10), "Unexpected fastest"),
        (overall.timed_out == 2, "Unexpected timed_out"),
        (
            overall.statuses.get("200") == Some(&985),
            "Unexpected 200 count",
        ),
        (overall.statuses.get("503") == Some(&10), "Unexpected 503 count"),
        (overall.statuses.get("404") == Some(&5), "Unexpected 404 count"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(message.to_owned());
        }
    }
    Ok(())
}

#[test]
fn final_result_without_regions_has_no_overall() -> Result<(), String> {
    let empty = FinalResult::new(None);
    if empty.has_results() || empty.overall().is_some() {
        return Err("Expected empty final result".to_owned());
    }
    let blank = FinalResult::new(Some(AggregateEnvelope::default()));
    if blank.has_results() || blank.overall().is_some() {
        return Err("Expected empty envelope to yield no results".to_owned());
    }
    Ok(())
}

#[test]
fn final_result_lists_regions_in_order() -> Result<(), String> {
    let result = FinalResult::new(Some(envelope(
        vec![region("us-east-1", 500, &[]), region("eu-west-1", 500, &[])],
        1000,
    )));
    let ids: Vec<&str> = result.regions().into_iter().map(|(id, _)| id).collect();
    if ids != ["eu-west-1", "us-east-1"] {
        return Err(format!("Unexpected order: {:?}", ids));
    }
    let total = result.overall().map(|overall| overall.total_requests);
    if total != Some(1000) {
        return Err(format!("Unexpected overall total: {:?}", total));
    }
    Ok(())
}

#[test]
fn envelope_decodes_wire_format() -> Result<(), String> {
    let line = r#"{"regions":{"us-east-1":{"region":"us-east-1","total-reqs":12,"tot-bytes-read":2048,"ave-time-for-req":1500000,"ave-req-per-sec":6.5,"ave-kbytes-per-sec":1.25,"slowest":9000000,"fastest":250000,"total-timed-out":1,"statuses":{"200":11,"500":1}}},"total-expected-requests":100}"#;
    let data: AggregateEnvelope =
        serde_json::from_str(line).map_err(|err| format!("decode failed: {}", err))?;
    let Some(us) = data.regions.get("us-east-1") else {
        return Err("Missing region".to_owned());
    };
    if us.avg_time_per_request != Duration::from_micros(1500) {
        return Err(format!("Unexpected avg time {:?}", us.avg_time_per_request));
    }
    if us.fastest != Duration::from_micros(250) || us.total_requests != 12 {
        return Err("Unexpected region fields".to_owned());
    }
    if data.total_expected_requests != 100 {
        return Err("Unexpected expected total".to_owned());
    }
    Ok(())
}

#[test]
fn envelope_tolerates_missing_fields() -> Result<(), String> {
    let data: AggregateEnvelope = serde_json::from_str(r#"{"regions":{"eu-west-1":{}}}"#)
        .map_err(|err| format!("decode failed: {}", err))?;
    if data.total_expected_requests != 0 || data.total_completed() != 0 {
        return Err("Expected zeroed defaults".to_owned());
    }
    Ok(())
}
