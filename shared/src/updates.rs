//! Real-time update channel protocol
//!
//! Client → server: JoinAdminRoom (tenant room scoping).
//! Server → client: DynamicUpdate, HomePage.
//!
//! Inbound messages are normalized into [`SyncEvent`]s on a single
//! broadcast stream. Events are trigger signals only: payload freshness is
//! re-derived by a full snapshot pull, never trusted as authoritative.

use serde::{Deserialize, Serialize};

/// Messages exchanged on the `/real-time-updates` channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UpdateMessage {
    /// Client → server: scope this connection to one tenant's room.
    JoinAdminRoom {
        #[serde(rename = "adminId")]
        admin_id: String,
    },

    /// Server → client: generic configuration change. The payload passes
    /// through to the event stream verbatim.
    DynamicUpdate {
        #[serde(default)]
        data: serde_json::Value,
    },

    /// Server → client: the home page / catalog changed.
    HomePage {
        #[serde(default)]
        data: serde_json::Value,
    },
}

/// Kind of change a sync event signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncEventKind {
    CatalogChanged,
    ConfigChanged,
}

/// Normalized event published on the client's unified update stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncEvent {
    #[serde(rename = "type")]
    pub kind: SyncEventKind,
    pub tenant_id: String,
    pub data: serde_json::Value,
}

impl SyncEvent {
    /// Normalize an inbound channel message into a stream event.
    ///
    /// Returns `None` for outbound-only messages.
    pub fn from_message(tenant_id: &str, msg: UpdateMessage) -> Option<Self> {
        match msg {
            UpdateMessage::JoinAdminRoom { .. } => None,
            UpdateMessage::DynamicUpdate { data } => Some(Self {
                kind: SyncEventKind::ConfigChanged,
                tenant_id: tenant_id.to_string(),
                data,
            }),
            UpdateMessage::HomePage { data } => Some(Self {
                kind: SyncEventKind::CatalogChanged,
                tenant_id: tenant_id.to_string(),
                data,
            }),
        }
    }

    /// Whether this event should trigger a snapshot reload.
    pub fn triggers_reload(&self) -> bool {
        matches!(
            self.kind,
            SyncEventKind::CatalogChanged | SyncEventKind::ConfigChanged
        )
    }
}
