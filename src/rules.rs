//! Theme rule source.
//!
//! Rules live in a JSON resource bundled with the extension and are fetched
//! through the host on every lookup. No caching, by design: the rule set is
//! small and a stale copy is worse than a fetch.

use crate::host::BrowserHost;
use crate::theme::ThemePreset;
use serde::Deserialize;
use tracing::warn;

/// One entry of the rule file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeRule {
    /// Substring matched against the active tab's URL.
    pub url: String,
    /// Preset applied when this rule wins.
    pub theme: ThemePreset,
    /// When present, the rule only applies if the browser's content color
    /// scheme preference agrees. Absent means "either scheme".
    #[serde(rename = "darkMode", default)]
    pub dark_mode: Option<bool>,
}

/// Parse the raw rule file text, preserving file order.
pub fn parse_rules(text: &str) -> Result<Vec<ThemeRule>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Fetch and parse the bundled rule resource.
///
/// `None` means "no rules available" — the resource was missing or
/// malformed. Callers must distinguish that from `Some(vec![])` (a valid,
/// empty rule file): either way no rule will match, but the fallback
/// sampling path still runs.
pub async fn load_rules(host: &dyn BrowserHost, resource: &str) -> Option<Vec<ThemeRule>> {
    let text = match host.fetch_resource(resource).await {
        Ok(text) => text,
        Err(e) => {
            warn!("failed to fetch rule resource `{resource}`: {e}");
            return None;
        }
    };
    match parse_rules(&text) {
        Ok(rules) => Some(rules),
        Err(e) => {
            warn!("failed to parse rule resource `{resource}`: {e}");
            None
        }
    }
}
