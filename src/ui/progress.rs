use std::time::Duration;

/// Inner width of the progress bar, in cells.
pub const PROGRESS_BAR_WIDTH: usize = 52;
/// Above this fraction the bar is drawn full to hide jitter near completion.
const FULL_BAR_THRESHOLD: f64 = 0.99;

/// Estimates how far the run has progressed toward its target.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEstimator {
    time_limit: Duration,
}

impl ProgressEstimator {
    #[must_use]
    pub const fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    /// Completed over expected requests when the expected total is known;
    /// otherwise elapsed over the time limit, capped at 1.0.
    ///
    /// The request ratio is returned as is, even above 1.0.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "Progress is a ratio of two measurements"
    )]
    pub fn fraction(&self, completed: u64, expected: i64, elapsed: Duration) -> f64 {
        if expected > 0 {
            return completed as f64 / expected as f64;
        }
        let limit = self.time_limit.as_secs_f64();
        if limit <= 0.0 {
            return 1.0;
        }
        (elapsed.as_secs_f64() / limit).min(1.0)
    }
}

/// Number of filled cells for `fraction` on a bar `width` cells wide.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "Scaling a fraction onto the bar width"
)]
pub fn filled_segments(fraction: f64, width: usize) -> usize {
    if fraction > FULL_BAR_THRESHOLD {
        return width;
    }
    let filled = (fraction * width as f64).floor();
    if filled.is_nan() || filled <= 0.0 {
        return 0;
    }
    (filled as usize).min(width)
}

/// Percentage with one decimal, clamped to 100%.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "Converting a fraction to percent")]
pub fn percent_label(fraction: f64) -> String {
    format!("{:5.1}%", fraction.clamp(0.0, 1.0) * 100.0)
}

/// Bracketed bar of `#` cells, `width` cells between the brackets.
#[must_use]
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = filled_segments(fraction, width);
    let mut bar = String::with_capacity(width.saturating_add(2));
    bar.push('[');
    bar.extend(std::iter::repeat('#').take(filled));
    bar.extend(std::iter::repeat(' ').take(width.saturating_sub(filled)));
    bar.push(']');
    bar
}
