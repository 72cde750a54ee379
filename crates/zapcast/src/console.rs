// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared wiring for all console commands.
//!
//! One `Console` is built per invocation: the gateway client, the session
//! view, the pairing service, and the parameters store, all hanging off a
//! single `Arc<dyn CampaignGateway>`. Commands construct controllers from
//! it as needed. Tests swap the HTTP client for a mock gateway through
//! [`Console::with_gateway`].

use std::sync::Arc;

use zapcast_config::model::{PairingConfig, ZapcastConfig};
use zapcast_core::error::ZapcastError;
use zapcast_core::gateway::CampaignGateway;
use zapcast_core::types::{CampaignRef, ConnectionId};
use zapcast_dispatch::{DispatchController, ParametersStore, SessionView};
use zapcast_gateway::GatewayClient;
use zapcast_pairing::PairingService;

pub struct Console {
    pub gateway: Arc<dyn CampaignGateway>,
    pub session: Arc<SessionView>,
    pub pairing: PairingService,
    pub params: ParametersStore,
    /// The account's connection, from `pairing.connection_id` in config.
    pub connection_id: ConnectionId,
}

impl Console {
    /// Builds a console backed by the configured HTTP gateway.
    pub fn connect(config: &ZapcastConfig) -> Result<Self, ZapcastError> {
        let gateway: Arc<dyn CampaignGateway> = Arc::new(GatewayClient::new(&config.gateway)?);
        Ok(Self::with_gateway(gateway, &config.pairing))
    }

    /// Builds a console over an arbitrary gateway implementation.
    pub fn with_gateway(gateway: Arc<dyn CampaignGateway>, pairing: &PairingConfig) -> Self {
        Self {
            session: Arc::new(SessionView::new()),
            pairing: PairingService::new(gateway.clone(), pairing),
            params: ParametersStore::new(gateway.clone()),
            connection_id: ConnectionId(pairing.connection_id.clone()),
            gateway,
        }
    }

    /// Builds a controller for one campaign, seeded from the gateway.
    ///
    /// Each invocation starts with no local history, so the controller is
    /// refreshed before use; otherwise a `stop` would see `NoOrder` and
    /// no-op even though the gateway holds an open order.
    pub async fn controller(
        &self,
        campaign: CampaignRef,
    ) -> Result<DispatchController, ZapcastError> {
        let controller =
            DispatchController::new(self.gateway.clone(), self.session.clone(), campaign);
        controller.refresh().await?;
        Ok(controller)
    }

    /// Loads the connection into the session cache, tolerating a gateway
    /// that has no connection record yet.
    pub async fn load_session(&self) -> Result<(), ZapcastError> {
        match self
            .session
            .load(self.gateway.as_ref(), &self.connection_id)
            .await
        {
            Ok(_) => Ok(()),
            Err(ZapcastError::Gateway { .. }) => {
                self.session.invalidate().await;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
