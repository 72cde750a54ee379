// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The campaign gateway trait: the boundary to the remote automation
//! backend that owns connections, dispatch orders, and parameters.

use async_trait::async_trait;

use crate::error::ZapcastError;
use crate::types::{
    CampaignRef, Connection, ConnectionId, DispatchOrder, DispatchParameters, MessageTemplate,
    PairingCode, TemplateId,
};

/// Client interface to the remote campaign gateway.
///
/// The gateway is the record of truth for connection state and dispatch
/// orders; every component here treats those as remotely-owned,
/// eventually-consistent views refreshed by explicit re-fetch after each
/// mutating call.
#[async_trait]
pub trait CampaignGateway: Send + Sync {
    /// Fetches the current state of a connection.
    async fn connection(&self, id: &ConnectionId) -> Result<Connection, ZapcastError>;

    /// Requests (or re-issues) a pairing code for a connection.
    ///
    /// Returns `Ok(None)` when the gateway has no code to hand out,
    /// a soft condition the caller maps to
    /// [`ZapcastError::NoCodeAvailable`].
    async fn request_pairing_code(
        &self,
        id: &ConnectionId,
    ) -> Result<Option<PairingCode>, ZapcastError>;

    /// Deletes a connection, unlinking the device.
    async fn delete_connection(&self, id: &ConnectionId) -> Result<(), ZapcastError>;

    /// Creates a new dispatch order for a campaign. A new order
    /// supersedes any prior order for the same campaign.
    async fn create_order(
        &self,
        campaign: &CampaignRef,
        template: &TemplateId,
    ) -> Result<DispatchOrder, ZapcastError>;

    /// Closes the current order for a campaign.
    async fn close_order(&self, campaign: &CampaignRef) -> Result<(), ZapcastError>;

    /// Fetches the most recent order for a campaign, if any exists.
    async fn current_order(
        &self,
        campaign: &CampaignRef,
    ) -> Result<Option<DispatchOrder>, ZapcastError>;

    /// Fetches all dispatch orders across the account. Consulted by the
    /// active-dispatch guard before every start/restart.
    async fn list_orders(&self) -> Result<Vec<DispatchOrder>, ZapcastError>;

    /// Reads the account-wide dispatch parameters.
    async fn dispatch_parameters(&self) -> Result<DispatchParameters, ZapcastError>;

    /// Writes the account-wide dispatch parameters.
    async fn set_dispatch_parameters(
        &self,
        params: &DispatchParameters,
    ) -> Result<(), ZapcastError>;

    /// Lists the message templates available for dispatch.
    async fn list_templates(&self) -> Result<Vec<MessageTemplate>, ZapcastError>;
}
