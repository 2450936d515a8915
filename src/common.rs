//! Common helpers shared across multiple modules.
//!
//! Color values travel through the application as `#rrggbb` strings (the
//! format the document codec persists), so both the UI color picker and the
//! renderer need conversions to and from that representation.

use bevy::color::Color;

/// Parse a `#rrggbb` string into an sRGB byte triple.
///
/// Returns `None` for anything that is not exactly seven characters of
/// `#` + hex digits.
pub fn hex_to_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Format an sRGB byte triple as a lowercase `#rrggbb` string.
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Convert a `#rrggbb` string to a Bevy color with the given alpha.
/// Unparseable strings fall back to opaque white rather than failing.
pub fn hex_to_color(hex: &str, alpha: f32) -> Color {
    let [r, g, b] = hex_to_rgb(hex).unwrap_or([255, 255, 255]);
    Color::srgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        alpha,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_default_blue() {
        assert_eq!(hex_to_rgb("#0000ff"), Some([0, 0, 255]));
    }

    #[test]
    fn test_hex_to_rgb_mixed_case() {
        assert_eq!(hex_to_rgb("#FFa500"), Some([255, 165, 0]));
    }

    #[test]
    fn test_hex_to_rgb_rejects_garbage() {
        assert_eq!(hex_to_rgb("0000ff"), None);
        assert_eq!(hex_to_rgb("#00ff"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
        assert_eq!(hex_to_rgb(""), None);
    }

    #[test]
    fn test_rgb_to_hex_round_trip() {
        let rgb = [18, 52, 86];
        assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)), Some(rgb));
    }

    #[test]
    fn test_hex_to_color_fallback() {
        // Bad input should not panic, just produce white
        let color = hex_to_color("not-a-color", 1.0);
        assert_eq!(color, Color::srgba(1.0, 1.0, 1.0, 1.0));
    }
}
