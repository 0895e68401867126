//! Pushing themes to the browser chrome.

use crate::color::parse_rgb;
use crate::error::ResolveError;
use crate::host::BrowserHost;
use crate::theme::{Palette, ThemePreset, ThemeUpdate};

/// Forward a rule preset to the chrome theme API unmodified.
pub async fn apply_preset(
    host: &dyn BrowserHost,
    preset: &ThemePreset,
) -> Result<(), ResolveError> {
    host.update_theme(&ThemeUpdate::Preset(preset.clone()))
        .await
        .map_err(ResolveError::ThemeUpdate)
}

/// Derive a full palette from one base color string and push it.
///
/// The color string comes either from page sampling or from an extension
/// message; a string with fewer than three channels is a hard error.
pub async fn apply_base_color(
    host: &dyn BrowserHost,
    color: &str,
    border_delta: i32,
) -> Result<(), ResolveError> {
    let base = parse_rgb(color)?;
    let palette = Palette::derive(base, border_delta);
    host.update_theme(&ThemeUpdate::Colors(palette))
        .await
        .map_err(ResolveError::ThemeUpdate)
}
