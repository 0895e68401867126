//! The browser-host boundary.
//!
//! Every capability the background process consumes from the browser (tab
//! info, script injection, theme updates, ...) goes through the
//! [`BrowserHost`] trait. The production implementation in [`stdio`] speaks
//! the WebExtensions native-messaging wire to an extension shim; tests use a
//! recording mock instead.

pub mod stdio;

use crate::error::HostError;
use crate::theme::ThemeUpdate;
use async_trait::async_trait;
use serde::Deserialize;

/// Browser-assigned tab identifier.
pub type TabId = i64;

/// The slice of tab state this process ever sees.
///
/// Ephemeral by design: supplied per event, never stored beyond the current
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    #[serde(default)]
    pub url: Option<String>,
}

/// The browser-wide content color scheme preference.
///
/// Consulted at match time, never cached or owned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    /// Map the browser setting string. Anything that isn't literally
    /// `"dark"` (including `"auto"`) counts as light, matching how the
    /// setting is compared upstream.
    pub fn from_setting(value: &str) -> Self {
        if value == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// URL portion of a tab-updated change descriptor. Events without a `url`
/// field are dropped before any host call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeInfo {
    #[serde(default)]
    pub url: Option<String>,
}

/// An inbound extension runtime message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtensionMessage {
    pub action: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Events the extension shim pushes to this process.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostEvent {
    /// A different tab became active.
    #[serde(rename_all = "camelCase")]
    TabActivated { tab_id: TabId },
    /// A tab's state changed; only URL changes are of interest.
    #[serde(rename_all = "camelCase")]
    TabUpdated { tab_id: TabId, change: ChangeInfo },
    /// A runtime message from the extension's other pages.
    Message { payload: ExtensionMessage },
}

/// Asynchronous capability calls into the browser.
///
/// Implementations are opaque collaborators: this trait fixes only the
/// shape of the data crossing the boundary. No call carries a timeout; a
/// hung host leaves that resolution pending, per the design.
#[async_trait]
pub trait BrowserHost: Send + Sync {
    /// Fetch a bundled extension resource (e.g. `urls.json`) as text.
    async fn fetch_resource(&self, name: &str) -> Result<String, HostError>;

    /// Look up a tab by id.
    async fn tab_info(&self, tab_id: TabId) -> Result<TabInfo, HostError>;

    /// Tabs matching active + current-window, for the startup pass.
    async fn query_active_tabs(&self) -> Result<Vec<TabInfo>, HostError>;

    /// Inject a script into the tab and return the computed body
    /// background color, if the page reported one.
    async fn sample_background_color(&self, tab_id: TabId) -> Result<Option<String>, HostError>;

    /// Read the content color scheme preference.
    async fn color_scheme(&self) -> Result<ColorScheme, HostError>;

    /// Push one atomic theme update to the chrome.
    async fn update_theme(&self, update: &ThemeUpdate) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_scheme_from_setting() {
        assert_eq!(ColorScheme::from_setting("dark"), ColorScheme::Dark);
        assert_eq!(ColorScheme::from_setting("light"), ColorScheme::Light);
        assert_eq!(ColorScheme::from_setting("auto"), ColorScheme::Light);
        assert!(ColorScheme::from_setting("dark").is_dark());
    }

    #[test]
    fn tab_activated_event_decodes() {
        let event: HostEvent =
            serde_json::from_str(r#"{"event":"tabActivated","tabId":7}"#).unwrap();
        assert_eq!(event, HostEvent::TabActivated { tab_id: 7 });
    }

    #[test]
    fn tab_updated_event_decodes_with_and_without_url() {
        let event: HostEvent = serde_json::from_str(
            r#"{"event":"tabUpdated","tabId":3,"change":{"url":"https://a.com/x"}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            HostEvent::TabUpdated {
                tab_id: 3,
                change: ChangeInfo {
                    url: Some("https://a.com/x".into())
                }
            }
        );

        let event: HostEvent =
            serde_json::from_str(r#"{"event":"tabUpdated","tabId":3,"change":{"status":"loading"}}"#)
                .unwrap();
        assert_eq!(
            event,
            HostEvent::TabUpdated {
                tab_id: 3,
                change: ChangeInfo { url: None }
            }
        );
    }

    #[test]
    fn message_event_decodes() {
        let event: HostEvent = serde_json::from_str(
            r#"{"event":"message","payload":{"action":"setToolbarColor","color":"rgb(1,2,3)"}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            HostEvent::Message {
                payload: ExtensionMessage {
                    action: "setToolbarColor".into(),
                    color: Some("rgb(1,2,3)".into()),
                }
            }
        );
    }

    #[test]
    fn tab_info_tolerates_missing_url() {
        let tab: TabInfo = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(tab, TabInfo { id: 1, url: None });
    }
}
