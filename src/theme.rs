use crate::week::GOLDEN;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const GOLDEN_COLOR: Color = Color::Rgb(0xE6, 0xB3, 0x25);

/// Month-view digits for days carrying a golden anchor.
pub(crate) const GOLDEN_DAY_STYLE: Style = Style::new()
    .fg(GOLDEN_COLOR)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

/// A pill whose anchor is tagged golden.
pub(crate) const GOLDEN_PILL_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(GOLDEN_COLOR)
    .add_modifier(Modifier::BOLD);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const SUBTITLE_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .bg(Color::Black)
    .add_modifier(Modifier::ITALIC);

pub(crate) const PLACEHOLDER_STYLE: Style = SUBTITLE_STYLE;

pub(crate) const HINT_STYLE: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);

pub(crate) const SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE
    .add_modifier(Modifier::BOLD)
    .add_modifier(Modifier::UNDERLINED);

pub(crate) const CURRENT_WEEK_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// The pastel palette offered by the color menu.  Tokens are stored in the
/// week record verbatim.
pub(crate) const PALETTE: [(&str, &str); 8] = [
    ("soft rose", "#F8E8E8"),
    ("mint", "#E8F8F0"),
    ("mist", "#E8F0F8"),
    ("cream", "#FFF9E8"),
    ("lilac", "#F0E8F8"),
    ("peach", "#F8F0E8"),
    ("sky", "#E8F4F8"),
    ("citrus", "#F4F8E8"),
];

/// Maps a stored color token to the pill style.  Unknown tokens render
/// unstyled, like the sentinels for "no color".
pub(crate) fn anchor_style(color: Option<&str>) -> Style {
    let Some(token) = color else {
        return BASE_STYLE;
    };
    if token == GOLDEN {
        GOLDEN_PILL_STYLE
    } else if let Some(rgb) = parse_hex(token) {
        Style::new().fg(Color::Black).bg(rgb)
    } else {
        // "transparent" and unrecognized tokens render unstyled.
        BASE_STYLE
    }
}

pub(crate) fn parse_hex(token: &str) -> Option<Color> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
