//! Shared test fixtures.
//!
//! The resolver and dispatcher tests all need a scriptable browser host
//! with recorded calls; keeping one mock here prevents each test module
//! from rebuilding it.

use crate::error::HostError;
use crate::host::{BrowserHost, ColorScheme, TabId, TabInfo};
use crate::theme::ThemeUpdate;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scriptable [`BrowserHost`] with canned responses and call recording.
pub struct MockHost {
    /// Rule file text; `None` makes `fetch_resource` fail.
    pub rules_json: Mutex<Option<String>>,
    pub tabs: Mutex<HashMap<TabId, TabInfo>>,
    pub active_tabs: Mutex<Vec<TabInfo>>,
    /// Sampled body background; `Err` simulates a script injection failure.
    pub sample: Mutex<Result<Option<String>, String>>,
    pub scheme: Mutex<ColorScheme>,
    pub fetch_count: AtomicUsize,
    pub sample_count: AtomicUsize,
    pub updates: Mutex<Vec<ThemeUpdate>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            rules_json: Mutex::new(Some("[]".to_string())),
            tabs: Mutex::new(HashMap::new()),
            active_tabs: Mutex::new(Vec::new()),
            sample: Mutex::new(Ok(None)),
            scheme: Mutex::new(ColorScheme::Light),
            fetch_count: AtomicUsize::new(0),
            sample_count: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
        }
    }
}

impl MockHost {
    pub fn with_rules(self, json: &str) -> Self {
        *self.rules_json.lock().unwrap() = Some(json.to_string());
        self
    }

    pub fn with_failing_rules(self) -> Self {
        *self.rules_json.lock().unwrap() = None;
        self
    }

    pub fn with_tab(self, id: TabId, url: Option<&str>) -> Self {
        self.tabs.lock().unwrap().insert(
            id,
            TabInfo {
                id,
                url: url.map(str::to_string),
            },
        );
        self
    }

    pub fn with_active_tab(self, id: TabId, url: Option<&str>) -> Self {
        self.active_tabs.lock().unwrap().push(TabInfo {
            id,
            url: url.map(str::to_string),
        });
        self
    }

    pub fn with_sample(self, color: Option<&str>) -> Self {
        *self.sample.lock().unwrap() = Ok(color.map(str::to_string));
        self
    }

    pub fn with_failing_sample(self, message: &str) -> Self {
        *self.sample.lock().unwrap() = Err(message.to_string());
        self
    }

    pub fn with_scheme(self, scheme: ColorScheme) -> Self {
        *self.scheme.lock().unwrap() = scheme;
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::Relaxed)
    }

    pub fn samples(&self) -> usize {
        self.sample_count.load(Ordering::Relaxed)
    }

    pub fn recorded_updates(&self) -> Vec<ThemeUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowserHost for MockHost {
    async fn fetch_resource(&self, _name: &str) -> Result<String, HostError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.rules_json
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| HostError::Remote("resource missing".to_string()))
    }

    async fn tab_info(&self, tab_id: TabId) -> Result<TabInfo, HostError> {
        self.tabs
            .lock()
            .unwrap()
            .get(&tab_id)
            .cloned()
            .ok_or_else(|| HostError::Remote(format!("no such tab: {tab_id}")))
    }

    async fn query_active_tabs(&self) -> Result<Vec<TabInfo>, HostError> {
        Ok(self.active_tabs.lock().unwrap().clone())
    }

    async fn sample_background_color(&self, _tab_id: TabId) -> Result<Option<String>, HostError> {
        self.sample_count.fetch_add(1, Ordering::Relaxed);
        self.sample
            .lock()
            .unwrap()
            .clone()
            .map_err(HostError::Remote)
    }

    async fn color_scheme(&self) -> Result<ColorScheme, HostError> {
        Ok(*self.scheme.lock().unwrap())
    }

    async fn update_theme(&self, update: &ThemeUpdate) -> Result<(), HostError> {
        self.updates.lock().unwrap().push(update.clone());
        Ok(())
    }
}
