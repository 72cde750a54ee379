// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account-wide dispatch parameters store.
//!
//! Reads and writes the two operator tunables consumed by the external
//! send worker: maximum sends per run and delay between sends. This
//! store only validates and forwards; rate limiting itself happens in
//! the worker.

use std::sync::Arc;

use tracing::info;

use zapcast_core::error::ZapcastError;
use zapcast_core::gateway::CampaignGateway;
use zapcast_core::types::DispatchParameters;

/// Gateway-backed store for the account's dispatch parameters.
pub struct ParametersStore {
    gateway: Arc<dyn CampaignGateway>,
}

impl ParametersStore {
    pub fn new(gateway: Arc<dyn CampaignGateway>) -> Self {
        Self { gateway }
    }

    /// Reads the current parameters from the gateway.
    pub async fn get(&self) -> Result<DispatchParameters, ZapcastError> {
        self.gateway.dispatch_parameters().await
    }

    /// Validates and writes new parameters.
    ///
    /// Both values must be positive integers; nothing is clamped. On
    /// validation failure no gateway call is issued.
    pub async fn set(&self, max_per_run: u32, delay_seconds: u32) -> Result<(), ZapcastError> {
        if max_per_run == 0 {
            return Err(ZapcastError::ParametersInvalid(
                "max_per_run must be a positive integer".into(),
            ));
        }
        if delay_seconds == 0 {
            return Err(ZapcastError::ParametersInvalid(
                "delay_seconds must be a positive integer".into(),
            ));
        }

        let params = DispatchParameters {
            max_per_run,
            delay_seconds,
        };
        self.gateway.set_dispatch_parameters(&params).await?;

        info!(max_per_run, delay_seconds, "dispatch parameters updated");
        Ok(())
    }
}
