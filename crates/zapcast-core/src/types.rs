// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Zapcast workspace.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a messaging-device connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub String);

/// Unique identifier for a campaign (a named audience).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignId(pub String);

/// Unique identifier for a message template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub String);

/// Unique identifier for a dispatch order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

/// Link status of a messaging-device connection.
///
/// Transitions only `Disconnected -> Connecting -> Linked`, or back to
/// `Disconnected` on deletion or failure. A linked connection never moves
/// back to `Connecting` without an explicit new pairing request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Disconnected,
    Connecting,
    Linked,
}

/// One messaging-device link. At most one connection per account is
/// meaningful to the orchestration layer; the record of truth lives in
/// the campaign gateway and is observed via polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub name: String,
    pub status: LinkStatus,
    /// Identifier of the linked device. `None` until pairing completes.
    pub device_id: Option<String>,
}

/// Status of a dispatch order as reported by the gateway.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Close,
}

/// The two campaign flavors. Audience-search campaigns and
/// direct-audience-list campaigns are parallel instances of the same
/// dispatch contract and are treated uniformly by the state machine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CampaignKind {
    Search,
    List,
}

/// Reference to a campaign, carrying the audience size the surrounding
/// CRUD layer reported. The size gates dispatch starts but is owned by
/// the out-of-scope contact subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRef {
    pub id: CampaignId,
    pub kind: CampaignKind,
    pub name: String,
    pub audience_size: u64,
}

/// One start/stop cycle of a mass-send campaign run.
///
/// For a given campaign at most one order is meaningful at a time, and
/// across the entire account at most one order may be `Open` at any
/// instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOrder {
    pub id: OrderId,
    pub campaign_id: CampaignId,
    pub template_id: TemplateId,
    pub status: OrderStatus,
    /// Timestamp of the last status transition.
    pub updated_at: DateTime<Utc>,
}

/// Account-wide send-rate tunables, consumed by the external send worker.
/// Both values must be positive; this layer only stores and forwards them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchParameters {
    pub max_per_run: u32,
    pub delay_seconds: u32,
}

/// An opaque scannable pairing code issued by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingCode {
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

/// An in-flight pairing handshake: the code plus its polling schedule.
/// Ephemeral; never persisted by this subsystem.
#[derive(Debug, Clone)]
pub struct PairingAttempt {
    pub connection_id: ConnectionId,
    pub code: PairingCode,
    /// Interval between gateway status polls.
    pub poll_interval: Duration,
    /// Hard deadline after which the attempt is abandoned.
    pub deadline: Duration,
}

/// A message template available for dispatch. Owned by the CRUD
/// collaborator; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: TemplateId,
    pub name: String,
}
