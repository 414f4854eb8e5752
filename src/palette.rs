//! Colour palettes.
//!
//! A palette is a fixed-length table of colours built by linear
//! interpolation between a few stops. Stops can be written as `[r, g, b]`
//! arrays, `0xRRGGBB` integers or colour names, the same shapes the config
//! file accepts.

use serde_json::Value;

use crate::error::{Result, SphereError};
use crate::strip::{rgb_clamped, Rgb};

pub const DEFAULT_LENGTH: usize = 256;

pub const COLOR_BLACK: Rgb = [0, 0, 0];
pub const COLOR_RED: Rgb = [255, 0, 0];
pub const COLOR_ORANGE: Rgb = [255, 165, 0];
pub const COLOR_YELLOW: Rgb = [255, 255, 0];
pub const COLOR_GREEN: Rgb = [0, 128, 0];
pub const COLOR_BLUE: Rgb = [0, 0, 255];
pub const COLOR_PURPLE: Rgb = [75, 0, 130];
pub const COLOR_INDIGO: Rgb = [238, 130, 238];

pub fn named_color(name: &str) -> Option<Rgb> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(COLOR_BLACK),
        "red" => Some(COLOR_RED),
        "orange" => Some(COLOR_ORANGE),
        "yellow" => Some(COLOR_YELLOW),
        "green" => Some(COLOR_GREEN),
        "blue" => Some(COLOR_BLUE),
        "purple" => Some(COLOR_PURPLE),
        "indigo" => Some(COLOR_INDIGO),
        _ => None,
    }
}

/// Split a `0xRRGGBB` value into channels.
pub fn hex_color(value: u32) -> Result<Rgb> {
    if value > 0xFF_FFFF {
        return Err(SphereError::argument(format!("hex colour {:#x} is out of range", value)));
    }
    Ok([(value >> 16) as u8, (value >> 8) as u8, value as u8])
}

/// Parse a colour from JSON: `[r, g, b]`, `0xRRGGBB` or a name.
pub fn parse_color(value: &Value) -> Result<Rgb> {
    match value {
        Value::String(name) => {
            named_color(name)
                .ok_or_else(|| SphereError::argument(format!("unknown colour name '{}'", name)))
        }
        Value::Number(n) => {
            let hex = n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| SphereError::argument(format!("hex colour {} is out of range", n)))?;
            hex_color(hex)
        }
        Value::Array(channels) if channels.len() == 3 => {
            let mut out = [0.0f32; 3];
            for (slot, channel) in out.iter_mut().zip(channels) {
                let value = channel.as_f64().ok_or_else(|| {
                    SphereError::argument(format!("colour channel is not a number: {}", channel))
                })?;
                *slot = value as f32;
            }
            Ok(rgb_clamped(out[0], out[1], out[2]))
        }
        other => Err(SphereError::argument(format!("malformed colour: {}", other))),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Interpolate `length` colours through `stops`.
    ///
    /// Stop `i` lands at `floor(i * (length - 1) / (stops - 1))`. Each
    /// segment ramps linearly from its left stop (inclusive) toward its right
    /// stop (exclusive), truncating channels toward zero; the final stop
    /// closes the table.
    pub fn new(stops: &[Rgb], length: usize) -> Result<Self> {
        if stops.len() < 2 {
            return Err(SphereError::argument(format!(
                "a palette needs at least two colour stops, got {}",
                stops.len()
            )));
        }
        if length < 2 {
            return Err(SphereError::argument(format!(
                "palette length must be at least 2, got {}",
                length
            )));
        }

        let segments = stops.len() - 1;
        let positions: Vec<usize> = (0..stops.len()).map(|i| i * (length - 1) / segments).collect();

        let mut colors = Vec::with_capacity(length);
        for (pair, span) in stops.windows(2).zip(positions.windows(2)) {
            let entries = span[1] - span[0];
            colors.extend(lerp(pair[0], pair[1], entries));
        }
        colors.push(stops[stops.len() - 1]);

        Ok(Self { colors })
    }

    /// Parse stops from JSON and interpolate.
    pub fn from_json(stops: &[Value], length: usize) -> Result<Self> {
        let stops = stops.iter().map(parse_color).collect::<Result<Vec<_>>>()?;
        Self::new(&stops, length)
    }

    /// One of the built-in palettes.
    pub fn named(name: &str, length: usize) -> Result<Self> {
        let stops: Vec<Rgb> = match name.to_ascii_lowercase().as_str() {
            "spectrum" => [0xaa0000, 0xaa6600, 0xaaaa00, 0x00aa00, 0x0000aa, 0xaa00aa, 0xaa0033, 0xaa0000]
                .iter()
                .map(|&c| hex_color(c))
                .collect::<Result<_>>()?,
            "rainbow" => vec![
                COLOR_BLACK,
                COLOR_RED,
                COLOR_ORANGE,
                COLOR_YELLOW,
                COLOR_GREEN,
                COLOR_BLUE,
                COLOR_PURPLE,
                COLOR_INDIGO,
            ],
            "ocean" => vec![
                [0, 0, 0],
                COLOR_PURPLE,
                COLOR_GREEN,
                [6, 66, 115],
                [118, 182, 196],
                [127, 205, 255],
                [29, 162, 216],
                [222, 243, 246],
            ],
            "forest" => vec![[0, 0, 0], [60, 30, 10], [10, 30, 10], [30, 50, 15], [50, 80, 50], [50, 140, 70]],
            "deep_blue" => vec![[0, 0, 32], [0, 0, 64], [0, 32, 128], [32, 64, 192], [64, 96, 220]],
            "violet" => vec![[0, 0, 32], [32, 0, 64], [64, 0, 96], [96, 0, 128], [32, 32, 160], [0, 96, 192]],
            _ => return Err(SphereError::argument(format!("unknown palette '{}'", name))),
        };
        Self::new(&stops, length)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn index(&self, i: usize) -> Option<Rgb> {
        self.colors.get(i).copied()
    }

    /// Lookup with the index taken modulo the palette length (negative
    /// indices count back from the end).
    pub fn wrapped(&self, i: i64) -> Rgb {
        let len = self.colors.len() as i64;
        self.colors[i.rem_euclid(len) as usize]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

fn lerp(left: Rgb, right: Rgb, entries: usize) -> impl Iterator<Item = Rgb> {
    (0..entries).map(move |x| {
        let mut out = [0u8; 3];
        for c in 0..3 {
            let l = left[c] as f64;
            let r = right[c] as f64;
            let v = l + (r - l) / entries as f64 * x as f64;
            out[c] = v.trunc().clamp(0.0, 255.0) as u8;
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_two_stop_ramp() {
        let palette = Palette::new(&[[0, 0, 0], [200, 100, 0]], 5).unwrap();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.index(0), Some([0, 0, 0]));
        assert_eq!(palette.index(1), Some([50, 25, 0]));
        assert_eq!(palette.index(2), Some([100, 50, 0]));
        assert_eq!(palette.index(4), Some([200, 100, 0]));
        assert_eq!(palette.index(5), None);
    }

    #[test]
    fn test_descending_channels_truncate_toward_zero() {
        let palette = Palette::new(&[[10, 0, 0], [0, 0, 0]], 4).unwrap();
        // 10 - 10/3 * 1 = 6.67 -> 6
        assert_eq!(palette.index(1), Some([6, 0, 0]));
        assert_eq!(palette.index(3), Some([0, 0, 0]));
    }

    #[test]
    fn test_named_palettes_have_requested_length() {
        for name in ["spectrum", "rainbow", "ocean", "forest", "deep_blue", "violet"] {
            let palette = Palette::named(name, DEFAULT_LENGTH).unwrap();
            assert_eq!(palette.len(), DEFAULT_LENGTH, "Palette {}", name);
        }
        assert!(Palette::named("plaid", DEFAULT_LENGTH).is_err());
    }

    #[test]
    fn test_first_and_last_stops_are_exact() {
        let palette = Palette::named("ocean", 100).unwrap();
        assert_eq!(palette.index(0), Some([0, 0, 0]));
        assert_eq!(palette.index(99), Some([222, 243, 246]));
    }

    #[test]
    fn test_wrapped_lookup() {
        let palette = Palette::new(&[[0, 0, 0], [30, 30, 30]], 4).unwrap();
        assert_eq!(palette.wrapped(4), palette.colors()[0]);
        assert_eq!(palette.wrapped(-1), palette.colors()[3]);
        assert_eq!(palette.wrapped(-9), palette.colors()[3]);
    }

    #[test]
    fn test_rejects_degenerate_input() {
        assert!(Palette::new(&[[1, 2, 3]], 10).is_err());
        assert!(Palette::new(&[[1, 2, 3], [4, 5, 6]], 1).is_err());
    }

    #[test]
    fn test_parse_color_shapes() {
        assert_eq!(parse_color(&json!("red")).unwrap(), COLOR_RED);
        assert_eq!(parse_color(&json!("Purple")).unwrap(), COLOR_PURPLE);
        assert_eq!(parse_color(&json!(0xaa6600)).unwrap(), [0xaa, 0x66, 0x00]);
        assert_eq!(parse_color(&json!([300, -4, 12.7])).unwrap(), [255, 0, 12]);
    }

    #[test]
    fn test_parse_color_errors() {
        let bad = [json!("mauve"), json!(0x1000000), json!(-1), json!([1, 2]), json!([1, "x", 3]), json!(null)];
        for value in &bad {
            assert!(
                matches!(parse_color(value), Err(SphereError::Argument(_))),
                "{} should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_from_json() {
        let palette = Palette::from_json(&[json!("black"), json!(0xffffff)], 3).unwrap();
        assert_eq!(palette.colors(), &[[0, 0, 0], [127, 127, 127], [255, 255, 255]]);
    }
}
