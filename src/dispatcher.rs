//! Event dispatch loop.
//!
//! Routes host events to per-tab resolutions. Resolutions run as
//! independent tasks with no ordering between them; when two overlap, the
//! last one to complete owns the chrome color. Failures are logged here and
//! go no further.

use crate::applicator;
use crate::config::Config;
use crate::host::{BrowserHost, ExtensionMessage, HostEvent, TabId};
use crate::resolver;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Inbound message action that sets the toolbar color directly.
const SET_TOOLBAR_COLOR: &str = "setToolbarColor";

pub struct Dispatcher {
    host: Arc<dyn BrowserHost>,
    config: Arc<Config>,
}

impl Dispatcher {
    pub fn new(host: Arc<dyn BrowserHost>, config: Arc<Config>) -> Self {
        Self { host, config }
    }

    /// Resolve the initially active tab, then route events until the host
    /// stream closes. In-flight resolutions are drained before returning.
    pub async fn run(&self, mut events: mpsc::Receiver<HostEvent>) {
        let mut tasks = JoinSet::new();
        self.resolve_startup_tab(&mut tasks).await;
        while let Some(event) = events.recv().await {
            self.dispatch(&mut tasks, event);
        }
        debug!("event stream closed, draining resolutions");
        while tasks.join_next().await.is_some() {}
    }

    /// One pass over the tabs that are active at startup: the browser
    /// already shows one before any event fires.
    async fn resolve_startup_tab(&self, tasks: &mut JoinSet<()>) {
        match self.host.query_active_tabs().await {
            Ok(tabs) => {
                if let Some(tab) = tabs.first() {
                    self.spawn_resolution(tasks, tab.id);
                }
            }
            Err(e) => warn!("startup tab query failed: {e}"),
        }
    }

    fn dispatch(&self, tasks: &mut JoinSet<()>, event: HostEvent) {
        match event {
            HostEvent::TabActivated { tab_id } => self.spawn_resolution(tasks, tab_id),
            HostEvent::TabUpdated { tab_id, change } => {
                // Only URL changes matter; loading/title updates are noise.
                if change.url.is_some() {
                    self.spawn_resolution(tasks, tab_id);
                }
            }
            HostEvent::Message { payload } => self.handle_message(tasks, payload),
        }
    }

    fn spawn_resolution(&self, tasks: &mut JoinSet<()>, tab_id: TabId) {
        let host = Arc::clone(&self.host);
        let config = Arc::clone(&self.config);
        tasks.spawn(async move {
            match resolver::resolve_tab(host.as_ref(), &config, tab_id).await {
                Ok(outcome) => debug!(tab_id, ?outcome, "resolution finished"),
                Err(e) => warn!(tab_id, "resolution failed: {e}"),
            }
        });
    }

    /// `setToolbarColor` bypasses the resolver entirely: the sender already
    /// chose the color.
    fn handle_message(&self, tasks: &mut JoinSet<()>, payload: ExtensionMessage) {
        if payload.action != SET_TOOLBAR_COLOR {
            debug!(action = %payload.action, "ignoring message");
            return;
        }
        let Some(color) = payload.color else {
            warn!("setToolbarColor message without a color");
            return;
        };
        let host = Arc::clone(&self.host);
        let config = Arc::clone(&self.config);
        tasks.spawn(async move {
            match applicator::apply_base_color(host.as_ref(), &color, config.border_delta).await {
                Ok(()) => debug!("toolbar color set from message"),
                Err(e) => warn!("setToolbarColor `{color}` failed: {e}"),
            }
        });
    }
}
