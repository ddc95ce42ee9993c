use crate::snapshot::{FinalResult, RegionSnapshot};
use crate::ui::{LATENCY_HEADING, THROUGHPUT_HEADING, format_region};

pub const NO_RESULTS: &str = "No results received";

const BOLD_START: &str = "\x1b[1m";
const BOLD_END: &str = "\x1b[0m";

fn bold(text: &str, no_color: bool) -> String {
    if no_color {
        text.to_owned()
    } else {
        format!("{BOLD_START}{text}{BOLD_END}")
    }
}

fn push_region_rows(lines: &mut Vec<String>, data: &RegionSnapshot, no_color: bool) {
    let rows = format_region(data);
    lines.push(bold(THROUGHPUT_HEADING, no_color));
    lines.push(rows.throughput);
    lines.push(bold(LATENCY_HEADING, no_color));
    lines.push(rows.latency);
    if let Err(err) = rows.errors {
        lines.push(format!("Diagnostic: {}", err));
    }
    lines.push(String::new());
}

/// Console summary of the final result, one entry per output line.
#[must_use]
pub fn summary_lines(result: &FinalResult, no_color: bool) -> Vec<String> {
    if !result.has_results() {
        return vec![NO_RESULTS.to_owned()];
    }

    let mut lines = vec![bold("Regional results", no_color)];
    for (id, data) in result.regions() {
        lines.push(bold(&format!("Region: {}", id), no_color));
        push_region_rows(&mut lines, data, no_color);
    }

    if let Some(overall) = result.overall() {
        lines.push(bold("Overall", no_color));
        push_region_rows(&mut lines, overall, no_color);
        lines.push(bold(
            &format!("{:>10} {:>10}", "HTTPStatus", "Requests"),
            no_color,
        ));
        for (status, count) in &overall.statuses {
            lines.push(format!("{:>10} {:>10}", status, count));
        }
    }
    lines
}

pub fn print_summary(result: &FinalResult, no_color: bool) {
    for line in summary_lines(result, no_color) {
        println!("{}", line);
    }
}
