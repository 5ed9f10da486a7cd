//! Real-time catalog update channel
//!
//! Persistent WebSocket client for `<apiBase>/real-time-updates`. After
//! connecting it joins the tenant's room and funnels every inbound message
//! into one broadcast stream of [`SyncEvent`]s.
//!
//! Reconnects are bounded: up to `max_connect_attempts` per cycle with a
//! fixed delay, then the client stays `Disconnected` until `connect` is
//! called again. `dispose` closes the stream permanently; no callback
//! fires after disposal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use shared::updates::{SyncEvent, UpdateMessage};

use crate::config::ClientConfig;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Connection lifecycle of the update channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    /// Terminal: the client was disposed and the event stream is closed.
    Closed,
}

struct SessionHandle {
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

struct SyncShared {
    updates_url: String,
    connect_timeout: Duration,
    reconnect_delay: Duration,
    max_connect_attempts: u32,
    event_tx: broadcast::Sender<SyncEvent>,
    state_tx: watch::Sender<ConnectionState>,
    disposed: AtomicBool,
    session: Mutex<Option<SessionHandle>>,
}

impl SyncShared {
    /// State changes are suppressed once the client is disposed so
    /// `Closed` stays the last word.
    fn set_state(&self, state: ConnectionState) {
        if !self.disposed.load(Ordering::SeqCst) {
            self.state_tx.send_replace(state);
        }
    }

    fn emit(&self, event: SyncEvent) {
        if self.disposed.load(Ordering::SeqCst) {
            return;
        }
        // No subscribers is fine; events are fire-and-forget
        let _ = self.event_tx.send(event);
    }
}

/// Client for the tenant-scoped real-time update channel.
///
/// Explicitly constructed and owned; cloning shares the same underlying
/// channel and session.
#[derive(Clone)]
pub struct CatalogSyncClient {
    inner: Arc<SyncShared>,
}

impl CatalogSyncClient {
    pub fn new(config: &ClientConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);

        Self {
            inner: Arc::new(SyncShared {
                updates_url: config.updates_url(),
                connect_timeout: config.connect_timeout,
                reconnect_delay: config.reconnect_delay,
                max_connect_attempts: config.max_connect_attempts,
                event_tx,
                state_tx,
                disposed: AtomicBool::new(false),
                session: Mutex::new(None),
            }),
        }
    }

    /// Subscribe to the unified update stream. Each subscriber receives
    /// every event published after it subscribes; there is no replay.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.inner.event_tx.subscribe()
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.inner.state_tx.borrow()
    }

    /// Watch connection state changes.
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state_tx.subscribe()
    }

    /// Open the channel and join the tenant's room.
    ///
    /// Idempotent: a call while a session task is live is a no-op. Must be
    /// called within a tokio runtime. A disposed client never reconnects.
    pub fn connect(&self, tenant_id: &str) {
        if self.inner.disposed.load(Ordering::SeqCst) {
            tracing::warn!("connect called on a disposed sync client");
            return;
        }

        let mut session = self.inner.session.lock().unwrap();
        if let Some(handle) = session.as_ref() {
            if !handle.task.is_finished() {
                tracing::debug!("sync client already connected, ignoring connect");
                return;
            }
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_session(
            Arc::clone(&self.inner),
            tenant_id.to_string(),
            cancel.clone(),
        ));
        *session = Some(SessionHandle { cancel, task });
    }

    /// Tear down the channel. A later `connect` may re-establish it.
    pub fn disconnect(&self) {
        if let Some(handle) = self.inner.session.lock().unwrap().take() {
            handle.cancel.cancel();
            handle.task.abort();
        }
        self.inner.set_state(ConnectionState::Disconnected);
    }

    /// Disconnect and permanently close the event stream.
    ///
    /// Safe to call multiple times. After disposal no state change or
    /// event is ever delivered again.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self.inner.session.lock().unwrap().take() {
            handle.cancel.cancel();
            handle.task.abort();
        }
        self.inner.state_tx.send_replace(ConnectionState::Closed);
        tracing::info!("sync client disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// Inject an event onto the stream without a live channel.
    #[cfg(test)]
    pub(crate) fn test_emit(&self, event: SyncEvent) {
        self.inner.emit(event);
    }
}

/// Connect-and-read loop for one `connect` cycle.
///
/// Attempts are bounded; the counter resets after every successful
/// connection so a long-lived channel gets the full number of attempts
/// each time it drops.
async fn run_session(shared: Arc<SyncShared>, tenant_id: String, cancel: CancellationToken) {
    let mut attempt: u32 = 0;
    let mut ever_connected = false;

    loop {
        if cancel.is_cancelled() {
            return;
        }

        attempt += 1;
        shared.set_state(if ever_connected || attempt > 1 {
            ConnectionState::Reconnecting
        } else {
            ConnectionState::Connecting
        });

        let connect = tokio_tungstenite::connect_async(shared.updates_url.as_str());
        match tokio::time::timeout(shared.connect_timeout, connect).await {
            Ok(Ok((ws, _response))) => {
                tracing::info!(url = %shared.updates_url, "update channel connected");
                attempt = 0;
                ever_connected = true;
                shared.set_state(ConnectionState::Connected);

                run_stream(&shared, &tenant_id, ws, &cancel).await;

                if cancel.is_cancelled() {
                    return;
                }
                tracing::warn!("update channel lost");
                continue;
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    attempt,
                    max_attempts = shared.max_connect_attempts,
                    "update channel connect failed: {e}"
                );
            }
            Err(_) => {
                tracing::warn!(
                    attempt,
                    max_attempts = shared.max_connect_attempts,
                    timeout_ms = shared.connect_timeout.as_millis() as u64,
                    "update channel connect timed out"
                );
            }
        }

        if attempt >= shared.max_connect_attempts {
            tracing::warn!(
                attempts = attempt,
                "giving up on update channel until connect is called again"
            );
            shared.set_state(ConnectionState::Disconnected);
            return;
        }

        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(shared.reconnect_delay) => {}
        }
    }
}

/// Drive one established connection until it drops or is cancelled.
async fn run_stream(
    shared: &SyncShared,
    tenant_id: &str,
    ws: WsStream,
    cancel: &CancellationToken,
) {
    let (mut sink, mut stream) = ws.split();

    // Scope this connection to the tenant's room before anything else
    let join = UpdateMessage::JoinAdminRoom {
        admin_id: tenant_id.to_string(),
    };
    let json = match serde_json::to_string(&join) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("failed to serialize join message: {e}");
            return;
        }
    };
    if let Err(e) = sink.send(Message::Text(json.into())).await {
        tracing::warn!("failed to join admin room: {e}");
        return;
    }
    tracing::info!(tenant_id = %tenant_id, "joined admin room");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = sink.close().await;
                return;
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_frame(shared, tenant_id, &text);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("update channel closed by server");
                        return;
                    }
                    Some(Err(e)) => {
                        tracing::warn!("update channel error: {e}");
                        return;
                    }
                    None => {
                        tracing::info!("update channel stream ended");
                        return;
                    }
                    _ => {} // Binary, Pong — ignore
                }
            }
        }
    }
}

/// Parse one inbound frame and publish it on the unified stream.
/// Malformed frames are logged and dropped.
fn handle_frame(shared: &SyncShared, tenant_id: &str, text: &str) {
    let msg: UpdateMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("invalid update frame: {e}");
            return;
        }
    };

    if let Some(event) = SyncEvent::from_message(tenant_id, msg) {
        tracing::debug!(kind = ?event.kind, "update received");
        shared.emit(event);
    }
}
