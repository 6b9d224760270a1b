use crate::constants::*;

/// Orb material inputs handed to the renderer each frame.
///
/// `color` is the CSS colour string exactly as the page supplied it; only the
/// renderer interprets it (see [`parse_hex_color`]).
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialParams {
    pub color: String,
    pub distort: f32,
    pub speed: f32,
}

impl MaterialParams {
    pub fn from_state(hovered: bool, active: bool, base_color: &str) -> Self {
        Self {
            color: if hovered {
                HOVER_COLOR.to_string()
            } else {
                base_color.to_string()
            },
            distort: if active { DISTORT_ACTIVE } else { DISTORT_IDLE },
            speed: if active {
                DISTORT_SPEED_ACTIVE
            } else {
                DISTORT_SPEED_IDLE
            },
        }
    }
}

/// Parse `#rgb` or `#rrggbb` into linear-ish 0..1 components.
///
/// Returns `None` for anything else; the renderer then keeps its last colour.
pub fn parse_hex_color(value: &str) -> Option<[f32; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    let expand = |c: u8| c * 16 + c;
    let bytes: [u8; 3] = match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in hex.chars().enumerate() {
                out[i] = expand(ch.to_digit(16)? as u8);
            }
            out
        }
        6 => {
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = u8::from_str_radix(hex.get(i * 2..i * 2 + 2)?, 16).ok()?;
            }
            out
        }
        _ => return None,
    };
    Some(bytes.map(|b| b as f32 / 255.0))
}
