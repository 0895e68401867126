//! Pure color arithmetic for deriving chrome palettes.
//!
//! Everything here is format-tolerant on the way in (`parse_rgb` accepts
//! `"rgb(1, 2, 3)"`, `"1,2,3"`, `"rgba(1, 2, 3, 0.5)"`, ...) and strict on
//! the way out: hex strings are always lowercase, zero-padded, `#`-prefixed.

use crate::error::ColorError;

/// An RGB triplet. Channels are `u8`, so the [0,255] invariant holds by
/// construction; arithmetic goes through clamping helpers below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise inversion (`255 - c`). Applying it twice recovers the
    /// original color.
    pub fn opposite(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Channel-wise addition of a single scalar delta, clamped to [0,255]
    /// per channel. A negative delta darkens, a positive one lightens.
    pub fn contrast(self, delta: i32) -> Self {
        let adjust = |c: u8| (i32::from(c) + delta).clamp(0, 255) as u8;
        Self::new(adjust(self.r), adjust(self.g), adjust(self.b))
    }
}

/// Parse the first three decimal groups found anywhere in `input` as an RGB
/// triplet. Groups larger than 255 are clamped.
///
/// Fails only when fewer than three numeric groups are present; downstream
/// hex formatting cannot proceed without a full triplet.
pub fn parse_rgb(input: &str) -> Result<Rgb, ColorError> {
    let mut channels = [0u8; 3];
    let mut found = 0;
    for group in digit_groups(input) {
        if found == 3 {
            break;
        }
        channels[found] = group.min(255) as u8;
        found += 1;
    }
    if found < 3 {
        return Err(ColorError::TooFewComponents { found });
    }
    Ok(Rgb::new(channels[0], channels[1], channels[2]))
}

/// True when a sampled color string represents full transparency.
///
/// Computed styles report an unset background as `rgba(0, 0, 0, 0)`; we
/// accept any spelling whose fourth numeric component is zero, plus the
/// bare `transparent` keyword.
pub fn is_fully_transparent(input: &str) -> bool {
    if input.trim().eq_ignore_ascii_case("transparent") {
        return true;
    }
    match number_tokens(input).get(3) {
        Some(alpha) => *alpha == 0.0,
        None => false,
    }
}

/// Runs of ASCII digits in `input`, parsed as integers. Oversized runs
/// saturate rather than fail.
fn digit_groups(input: &str) -> Vec<u32> {
    let mut groups = Vec::new();
    let mut current: Option<u32> = None;
    for ch in input.chars() {
        match ch.to_digit(10) {
            Some(d) => {
                let acc = current.unwrap_or(0);
                current = Some(acc.saturating_mul(10).saturating_add(d));
            }
            None => {
                if let Some(value) = current.take() {
                    groups.push(value);
                }
            }
        }
    }
    if let Some(value) = current {
        groups.push(value);
    }
    groups
}

/// Numeric tokens including a fractional part, for alpha inspection.
fn number_tokens(input: &str) -> Vec<f64> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in input.chars() {
        if ch.is_ascii_digit() || (ch == '.' && !current.contains('.')) {
            current.push(ch);
        } else if !current.is_empty() {
            if let Ok(value) = current.parse::<f64>() {
                tokens.push(value);
            }
            current.clear();
        }
    }
    if !current.is_empty() {
        if let Ok(value) = current.parse::<f64>() {
            tokens.push(value);
        }
    }
    tokens
}
