//! Color palette

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);
pub const INPUT_BG: Color = Color::Rgb(45, 51, 59);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;
/// Text drawn on top of a (light) tank color
pub const TEXT_ON_TANK: Color = Color::Black;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;

// --- Grid ---
/// Border of the tank being carried
pub const DRAG_SOURCE: Color = Color::Yellow;
/// Cells covered by a large tank that is not drawn across them
pub const BLOCKED_BG: Color = Color::Rgb(40, 40, 50);

/// Parse a `#RRGGBB` tank color
pub fn hex_color(text: &str) -> Option<Color> {
    let hex = text.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parses() {
        assert_eq!(hex_color("#bbdefb"), Some(Color::Rgb(0xbb, 0xde, 0xfb)));
        assert_eq!(hex_color(" #FFCDD2 "), Some(Color::Rgb(0xff, 0xcd, 0xd2)));
    }

    #[test]
    fn test_hex_color_rejects_other_forms() {
        assert_eq!(hex_color("bbdefb"), None);
        assert_eq!(hex_color("#bbd"), None);
        assert_eq!(hex_color("#gggggg"), None);
        assert_eq!(hex_color("blue"), None);
        assert_eq!(hex_color(""), None);
    }
}
