// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-scoped view of the account's connection.
//!
//! Many screens need to read the link status cheaply; instead of ambient
//! globals, one `SessionView` is constructed explicitly and shared by
//! `Arc`, with an explicit load/invalidate lifecycle. The gateway stays
//! the record of truth; this is a cached observation, refreshed by
//! explicit `load` calls or pairing events.

use tokio::sync::RwLock;

use zapcast_core::error::ZapcastError;
use zapcast_core::gateway::CampaignGateway;
use zapcast_core::types::{Connection, ConnectionId, LinkStatus};

/// Cached connection state for one console session.
#[derive(Debug, Default)]
pub struct SessionView {
    connection: RwLock<Option<Connection>>,
}

impl SessionView {
    pub fn new() -> Self {
        Self {
            connection: RwLock::new(None),
        }
    }

    /// Fetches the connection from the gateway and caches it.
    pub async fn load(
        &self,
        gateway: &dyn CampaignGateway,
        id: &ConnectionId,
    ) -> Result<Connection, ZapcastError> {
        let conn = gateway.connection(id).await?;
        *self.connection.write().await = Some(conn.clone());
        Ok(conn)
    }

    /// Replaces the cached connection, e.g. from a pairing event.
    pub async fn set_connection(&self, conn: Connection) {
        *self.connection.write().await = Some(conn);
    }

    /// Drops the cached connection; the next reader sees `Disconnected`
    /// until a fresh `load`.
    pub async fn invalidate(&self) {
        *self.connection.write().await = None;
    }

    /// Returns the cached connection, if any.
    pub async fn connection(&self) -> Option<Connection> {
        self.connection.read().await.clone()
    }

    /// Current link status; `Disconnected` when nothing is cached.
    pub async fn link_status(&self) -> LinkStatus {
        self.connection
            .read()
            .await
            .as_ref()
            .map(|c| c.status)
            .unwrap_or(LinkStatus::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use zapcast_test_utils::MockGateway;

    #[tokio::test]
    async fn empty_session_reads_disconnected() {
        let session = SessionView::new();
        assert_eq!(session.link_status().await, LinkStatus::Disconnected);
        assert!(session.connection().await.is_none());
    }

    #[tokio::test]
    async fn load_caches_gateway_snapshot() {
        let gateway = Arc::new(MockGateway::new());
        gateway
            .set_connection(MockGateway::connection_snapshot("primary", LinkStatus::Linked))
            .await;

        let session = SessionView::new();
        let conn = session
            .load(gateway.as_ref(), &ConnectionId("primary".into()))
            .await
            .unwrap();
        assert_eq!(conn.status, LinkStatus::Linked);
        assert_eq!(session.link_status().await, LinkStatus::Linked);
    }

    #[tokio::test]
    async fn invalidate_resets_to_disconnected() {
        let session = SessionView::new();
        session
            .set_connection(MockGateway::connection_snapshot("primary", LinkStatus::Linked))
            .await;
        assert_eq!(session.link_status().await, LinkStatus::Linked);

        session.invalidate().await;
        assert_eq!(session.link_status().await, LinkStatus::Disconnected);
    }
}
