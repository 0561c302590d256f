//! Colour resolution and selection dimming.
//!
//! The core treats colour hints as opaque; this is where they become terminal
//! colours. Items without a usable hint get a stable colour derived from
//! their id, each channel in `100..200` so labels stay readable.

use crate::model::Item;
use ratatui::style::Color;

/// Lowest channel value for generated colours.
const FALLBACK_CHANNEL_MIN: u8 = 100;
/// Width of the generated channel range (`100..200`).
const FALLBACK_CHANNEL_SPAN: u64 = 100;

/// Colour for an item: its hint if recognised, otherwise a generated one.
pub fn resolve_color(item: &Item) -> Color {
    item.color()
        .and_then(|hint| parse_color(hint.as_str()))
        .unwrap_or_else(|| fallback_color(&item.id().to_string()))
}

/// Parse `#rrggbb` or a small set of colour names (case-insensitive).
pub fn parse_color(token: &str) -> Option<Color> {
    let token = token.trim();
    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex);
    }

    let rgb = match token.to_ascii_lowercase().as_str() {
        "blue" => (0, 0, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "yellow" => (255, 255, 0),
        "beige" => (245, 245, 220),
        "lightyellow" => (255, 255, 224),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "cyan" => (0, 255, 255),
        "magenta" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        _ => return None,
    };
    Some(Color::Rgb(rgb.0, rgb.1, rgb.2))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Stable generated colour for a key.
pub fn fallback_color(key: &str) -> Color {
    let hash = fnv1a(key.as_bytes());
    let channel = |shift: u32| {
        FALLBACK_CHANNEL_MIN + ((hash >> shift) % FALLBACK_CHANNEL_SPAN) as u8
    };
    Color::Rgb(channel(0), channel(16), channel(32))
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Opacity for an item given the current selection.
///
/// Everything is opaque while nothing is selected; otherwise everything but
/// the selected item is dimmed.
pub fn highlight_opacity(item: &Item, selected: Option<&Item>, dim_opacity: f64) -> f64 {
    match selected {
        Some(selected) if !selected.same_item(item) => dim_opacity,
        _ => 1.0,
    }
}

/// Approximate opacity on a dark terminal by scaling towards black.
pub fn apply_opacity(color: Color, opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => {
            let scale = |c: u8| (f64::from(c) * opacity).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Readable text colour on top of `background`.
pub fn label_color(background: Color) -> Color {
    match background {
        Color::Rgb(r, g, b) => {
            let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
            if luma > 186.0 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => Color::White,
    }
}
