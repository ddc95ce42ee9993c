use std::collections::HashSet;

use crate::snapshot::{AggregateEnvelope, RegionSnapshot};

use super::format::{LATENCY_HEADING, THROUGHPUT_HEADING, format_region};
use super::progress::{PROGRESS_BAR_WIDTH, percent_label, progress_bar};
use super::surface::Surface;
use super::theme::{
    BANNER_TOP, CANCEL_HINT, LAUNCH_MESSAGE, LOGO_LINES, REGION_LABEL, banner_footprint,
    heading_style, plain_style, region_label_style, region_name_style,
};

/// First row used by region blocks once data is flowing.
const REGION_TOP: u16 = 0;
/// Label row plus two heading/value pairs.
const REGION_BLOCK_ROWS: u16 = 5;
/// Percent line, bar, and hint at the bottom of the grid.
const FOOTER_ROWS: u16 = 3;

/// Live dashboard. Owns the surface for the whole session; every redraw
/// goes through here.
pub struct Dashboard<S: Surface> {
    surface: S,
    no_color: bool,
    banner_visible: bool,
    flagged_regions: HashSet<String>,
}

impl<S: Surface> Dashboard<S> {
    #[must_use]
    pub fn new(surface: S, no_color: bool) -> Self {
        Self {
            surface,
            no_color,
            banner_visible: false,
            flagged_regions: HashSet::new(),
        }
    }

    /// Draws the launch message and logo shown until the first envelope.
    pub fn show_banner(&mut self) {
        self.surface
            .draw_str(0, BANNER_TOP, LAUNCH_MESSAGE, plain_style());
        let mut row = BANNER_TOP;
        for line in LOGO_LINES {
            row = row.saturating_add(1);
            self.surface.draw_str(0, row, line, plain_style());
        }
        self.banner_visible = true;
        self.surface.flush();
    }

    /// Draws the cancellation hint on the bottom row.
    pub fn show_cancel_hint(&mut self) {
        self.draw_cancel_hint();
        self.surface.flush();
    }

    /// Redraws every region in `order`, then the progress line, then flushes.
    pub fn render_envelope(&mut self, envelope: &AggregateEnvelope, order: &[&str], fraction: f64) {
        if self.banner_visible {
            self.clear_banner();
        }

        let (width, height) = self.surface.size();
        let hint_row = height.saturating_sub(1);
        for row in REGION_TOP..hint_row {
            self.surface.blank(0, row, width);
        }

        // Blocks plus their trailing blank line must end above the footer;
        // the rest are only counted.
        let region_limit = height.saturating_sub(FOOTER_ROWS);
        let mut row = REGION_TOP;
        let mut hidden: usize = 0;
        for id in order {
            let Some(data) = envelope.regions.get(*id) else {
                continue;
            };
            let block_end = row.saturating_add(REGION_BLOCK_ROWS).saturating_add(1);
            if hidden > 0 || block_end > region_limit {
                hidden = hidden.saturating_add(1);
                continue;
            }
            row = self.draw_region(id, data, row);
            row = row.saturating_add(1);
        }
        self.draw_progress(fraction, hidden, row);
        self.draw_cancel_hint();
        self.surface.flush();
    }

    #[must_use]
    pub const fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn close(&mut self) {
        self.surface.close();
    }

    fn clear_banner(&mut self) {
        let (width, height) = banner_footprint();
        for offset in 0..height {
            self.surface
                .blank(0, BANNER_TOP.saturating_add(offset), width);
        }
        self.banner_visible = false;
    }

    fn draw_cancel_hint(&mut self) {
        let (_, height) = self.surface.size();
        self.surface
            .draw_str(0, height.saturating_sub(1), CANCEL_HINT, plain_style());
    }

    /// Draws one region block starting at `row`; returns the next free row.
    fn draw_region(&mut self, id: &str, data: &RegionSnapshot, row: u16) -> u16 {
        let rows = format_region(data);
        if let Err(err) = &rows.errors
            && self.flagged_regions.insert(id.to_owned())
        {
            tracing::warn!("{}", err);
        }

        let label_width = u16::try_from(REGION_LABEL.len()).unwrap_or(u16::MAX);
        self.surface
            .draw_str(0, row, REGION_LABEL, region_label_style(self.no_color));
        self.surface
            .draw_str(label_width, row, id, region_name_style(self.no_color));

        let lines = [
            (THROUGHPUT_HEADING, heading_style()),
            (rows.throughput.as_str(), plain_style()),
            (LATENCY_HEADING, heading_style()),
            (rows.latency.as_str(), plain_style()),
        ];
        let mut next = row;
        for (text, style) in lines {
            next = next.saturating_add(1);
            self.surface.draw_str(0, next, text, style);
        }
        next.saturating_add(1)
    }

    fn draw_progress(&mut self, fraction: f64, hidden: usize, row: u16) {
        let label = match hidden {
            0 => percent_label(fraction),
            1 => format!("{}  (+1 more region)", percent_label(fraction)),
            count => format!("{}  (+{} more regions)", percent_label(fraction), count),
        };
        self.surface.draw_str(0, row, &label, plain_style());
        self.surface.draw_str(
            0,
            row.saturating_add(1),
            &progress_bar(fraction, PROGRESS_BAR_WIDTH),
            plain_style(),
        );
    }
}
