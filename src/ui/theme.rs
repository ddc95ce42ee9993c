use ratatui::style::{Color, Modifier, Style};

pub(super) const LAUNCH_MESSAGE: &str = "Launching regional workers... (be patient)";
pub(super) const CANCEL_HINT: &str = "Press ctrl-c to interrupt";
pub(super) const REGION_LABEL: &str = "Region: ";
pub(super) const LOGO_LINES: [&str; 7] = [
    r"  ____            _             ____            _     ",
    r" |  _ \ ___  __ _(_) ___  _ __ |  _ \  __ _ ___| |__  ",
    r" | |_) / _ \/ _` | |/ _ \| '_ \| | | |/ _` / __| '_ \ ",
    r" |  _ <  __/ (_| | | (_) | | | | |_| | (_| \__ \ | | |",
    r" |_| \_\___|\__, |_|\___/|_| |_|____/ \__,_|___/_| |_|",
    r"            |___/                                     ",
    r" One dashboard for every region",
];
/// Row of the launch message; the logo follows directly below it.
pub(super) const BANNER_TOP: u16 = 0;

pub(super) fn plain_style() -> Style {
    Style::default()
}

pub(super) fn heading_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(super) fn region_label_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(Color::White).bg(Color::Blue)
    }
}

pub(super) fn region_name_style(no_color: bool) -> Style {
    region_label_style(no_color).add_modifier(Modifier::BOLD)
}

/// Width and height of the launch message plus logo.
pub(super) fn banner_footprint() -> (u16, u16) {
    let width = LOGO_LINES
        .iter()
        .map(|line| line.chars().count())
        .chain(std::iter::once(LAUNCH_MESSAGE.chars().count()))
        .max()
        .unwrap_or(0);
    let height = LOGO_LINES.len().saturating_add(1);
    (
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(height).unwrap_or(u16::MAX),
    )
}
