use serde::Serialize;

use crate::config::DEFAULT_PRIMARY_COLOR;

const FALLBACK_RGB: (u8, u8, u8) = (21, 101, 192);

/// Accent colour handed to the rendering host. `rgb` feeds the translucent
/// chip backgrounds.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Theme {
    pub primary_hex: String,
    pub rgb: (u8, u8, u8),
}

impl Theme {
    pub fn from_hex(hex: &str) -> Self {
        match hex_to_rgb(hex) {
            Some(rgb) => Self {
                primary_hex: hex.trim().to_string(),
                rgb,
            },
            None => {
                tracing::warn!("Invalid theme colour '{hex}', using {DEFAULT_PRIMARY_COLOR}");
                Self {
                    primary_hex: DEFAULT_PRIMARY_COLOR.to_string(),
                    rgb: FALLBACK_RGB,
                }
            }
        }
    }
}

/// Parses `#rrggbb`, the shorthand `#rgb`, or `#rrggbbaa` with the alpha
/// byte dropped.
fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        8 => digits[..6].to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
