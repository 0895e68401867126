//! Theme presets and the palette derived from a single base color.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A full theme preset from the rule file.
///
/// Presets are opaque to this process: whatever object the rule author put
/// under `"theme"` is forwarded to the chrome theme API verbatim, so new
/// chrome regions work without a code change here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ThemePreset(pub Value);

/// Chrome regions colored when deriving a theme from one base color.
///
/// Region names follow the browser theme API: most regions take the base
/// color verbatim, the field border is nudged darker for separation, and
/// text regions get the channel-inverted color so they stay legible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub toolbar: String,
    pub toolbar_bottom_separator: String,
    pub toolbar_field: String,
    pub toolbar_field_border: String,
    pub toolbar_field_text: String,
    pub tab_selected: String,
    pub tab_background_text: String,
    pub frame: String,
}

impl Palette {
    /// Derive a full palette from one base color.
    ///
    /// `border_delta` is the scalar contrast adjustment for the field
    /// border (negative darkens).
    pub fn derive(base: Rgb, border_delta: i32) -> Self {
        let base_hex = base.to_hex();
        let text_hex = base.opposite().to_hex();
        Self {
            toolbar: base_hex.clone(),
            toolbar_bottom_separator: base_hex.clone(),
            toolbar_field: base_hex.clone(),
            toolbar_field_border: base.contrast(border_delta).to_hex(),
            toolbar_field_text: text_hex.clone(),
            tab_selected: base_hex.clone(),
            tab_background_text: text_hex,
            frame: base_hex,
        }
    }
}

/// One atomic update pushed to the chrome theme API.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeUpdate {
    /// A rule preset, forwarded unmodified.
    Preset(ThemePreset),
    /// A palette derived from a single base color.
    Colors(Palette),
}

impl ThemeUpdate {
    /// Wire form for the `update-theme` capability call. Presets go through
    /// as-is; palettes are wrapped under the API's `colors` key.
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Preset(preset) => preset.0.clone(),
            Self::Colors(palette) => {
                serde_json::json!({ "colors": palette })
            }
        }
    }
}
