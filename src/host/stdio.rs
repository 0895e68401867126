//! Native-messaging transport to the extension shim.
//!
//! The browser launches this process and connects it to the extension over
//! stdin/stdout using the WebExtensions native-messaging framing: each
//! message is a little-endian u32 byte length followed by a JSON body.
//!
//! Two kinds of frames arrive from the shim:
//!   - events (objects with an `"event"` key), forwarded to the dispatcher;
//!   - capability call responses (`{"id": n, "ok": ...}` or
//!     `{"id": n, "err": "..."}`), matched to the pending call by id.
//!
//! Outbound frames are capability call requests. A writer task owns the
//! write half so concurrent resolutions never interleave partial frames.
//! Logging must go to stderr; stdout is the wire.

use crate::error::HostError;
use crate::host::{BrowserHost, ColorScheme, HostEvent, TabId, TabInfo};
use crate::theme::ThemeUpdate;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, warn};

/// Expression evaluated in the tab to sample its rendered background.
const SAMPLE_SCRIPT: &str = "window.getComputedStyle(document.body).backgroundColor";

/// Upper bound on accepted frame bodies. The browser side caps messages far
/// below this; anything larger means a corrupt length prefix.
const MAX_FRAME_LEN: u32 = 16 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Frame codec
// ---------------------------------------------------------------------------

/// Read one length-prefixed frame. `Ok(None)` is clean EOF at a frame
/// boundary.
pub(crate) async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>, HostError>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let len = u32::from_le_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(HostError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("frame length {len} exceeds limit"),
        )));
    }
    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;
    Ok(Some(body))
}

/// Write one length-prefixed frame and flush it.
pub(crate) async fn write_frame<W>(writer: &mut W, body: &[u8]) -> Result<(), HostError>
where
    W: AsyncWrite + Unpin,
{
    let len = u32::try_from(body.len()).map_err(|_| {
        HostError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "frame body exceeds u32 length",
        ))
    })?;
    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// NativeHost
// ---------------------------------------------------------------------------

/// [`BrowserHost`] implementation over a native-messaging connection.
pub struct NativeHost {
    next_id: AtomicU64,
    pending: Mutex<HashMap<u64, oneshot::Sender<Result<Value, String>>>>,
    outgoing: mpsc::Sender<Vec<u8>>,
}

/// Connect over this process's stdin/stdout.
pub fn spawn_stdio_host() -> (Arc<NativeHost>, mpsc::Receiver<HostEvent>) {
    spawn_host_with(tokio::io::stdin(), tokio::io::stdout())
}

/// Connect over arbitrary halves. Split out from [`spawn_stdio_host`] so
/// tests can drive the wire through an in-memory duplex.
pub fn spawn_host_with<R, W>(reader: R, writer: W) -> (Arc<NativeHost>, mpsc::Receiver<HostEvent>)
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (out_tx, mut out_rx) = mpsc::channel::<Vec<u8>>(64);
    let (event_tx, event_rx) = mpsc::channel::<HostEvent>(64);
    let host = Arc::new(NativeHost {
        next_id: AtomicU64::new(1),
        pending: Mutex::new(HashMap::new()),
        outgoing: out_tx,
    });

    tokio::spawn(async move {
        let mut writer = writer;
        while let Some(frame) = out_rx.recv().await {
            if let Err(e) = write_frame(&mut writer, &frame).await {
                warn!("host writer stopping: {e}");
                break;
            }
        }
    });

    let reader_host = Arc::clone(&host);
    tokio::spawn(async move {
        let mut reader = reader;
        loop {
            match read_frame(&mut reader).await {
                Ok(Some(body)) => reader_host.route_frame(&body, &event_tx).await,
                Ok(None) => {
                    debug!("host connection closed");
                    break;
                }
                Err(e) => {
                    warn!("host reader stopping: {e}");
                    break;
                }
            }
        }
        // Unblock calls still waiting on a response.
        reader_host.pending.lock().await.clear();
    });

    (host, event_rx)
}

impl NativeHost {
    async fn route_frame(&self, body: &[u8], events: &mpsc::Sender<HostEvent>) {
        let value: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(e) => {
                warn!("dropping undecodable frame: {e}");
                return;
            }
        };

        if let Some(id) = value.get("id").and_then(Value::as_u64) {
            let Some(tx) = self.pending.lock().await.remove(&id) else {
                warn!(id, "response for unknown call id");
                return;
            };
            let outcome = match value.get("err").and_then(Value::as_str) {
                Some(err) => Err(err.to_string()),
                None => Ok(value.get("ok").cloned().unwrap_or(Value::Null)),
            };
            let _ = tx.send(outcome);
            return;
        }

        match serde_json::from_value::<HostEvent>(value) {
            Ok(event) => {
                if events.send(event).await.is_err() {
                    debug!("event receiver dropped");
                }
            }
            Err(e) => warn!("dropping unrecognized event frame: {e}"),
        }
    }

    /// Send one capability call request and await its response.
    async fn call(&self, mut request: Value) -> Result<Value, HostError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        request["id"] = Value::from(id);
        let encoded = serde_json::to_vec(&request)?;

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);
        if self.outgoing.send(encoded).await.is_err() {
            self.pending.lock().await.remove(&id);
            return Err(HostError::Disconnected);
        }

        match rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(HostError::Remote(message)),
            Err(_) => Err(HostError::Disconnected),
        }
    }
}

#[async_trait]
impl BrowserHost for NativeHost {
    async fn fetch_resource(&self, name: &str) -> Result<String, HostError> {
        let value = self
            .call(json!({ "call": "fetchResource", "name": name }))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn tab_info(&self, tab_id: TabId) -> Result<TabInfo, HostError> {
        let value = self.call(json!({ "call": "getTab", "tabId": tab_id })).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn query_active_tabs(&self) -> Result<Vec<TabInfo>, HostError> {
        let value = self.call(json!({ "call": "queryActiveTabs" })).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn sample_background_color(&self, tab_id: TabId) -> Result<Option<String>, HostError> {
        let value = self
            .call(json!({
                "call": "executeScript",
                "tabId": tab_id,
                "code": SAMPLE_SCRIPT,
            }))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn color_scheme(&self) -> Result<ColorScheme, HostError> {
        let value = self.call(json!({ "call": "getColorScheme" })).await?;
        let setting: String = serde_json::from_value(value)?;
        Ok(ColorScheme::from_setting(&setting))
    }

    async fn update_theme(&self, update: &ThemeUpdate) -> Result<(), HostError> {
        self.call(json!({ "call": "updateTheme", "update": update.to_wire() }))
            .await?;
        Ok(())
    }
}
