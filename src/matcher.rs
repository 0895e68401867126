//! URL-to-theme rule matching.

use crate::rules::ThemeRule;
use crate::theme::ThemePreset;

/// Select the preset for `url`, first match wins.
///
/// Rules are scanned in file order. A rule matches when its `url` field is
/// a substring of the tab URL and its `dark_mode` constraint (if any)
/// agrees with `is_dark_preferred`. `rules` is `None` when the rule file
/// failed to load; that and an empty list both yield no match, and the
/// distinction stays with the caller.
pub fn match_theme<'r>(
    rules: Option<&'r [ThemeRule]>,
    url: &str,
    is_dark_preferred: bool,
) -> Option<&'r ThemePreset> {
    for rule in rules? {
        if !url.contains(&rule.url) {
            continue;
        }
        match rule.dark_mode {
            None => return Some(&rule.theme),
            Some(dark) if dark == is_dark_preferred => return Some(&rule.theme),
            Some(_) => {}
        }
    }
    None
}
