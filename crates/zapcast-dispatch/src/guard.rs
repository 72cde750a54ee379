// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account-wide active-dispatch guard.
//!
//! Answers "is there an open dispatch order anywhere in the account,
//! other than the one I'm about to touch?" before every start/restart.
//! This is a check-then-act guard, not a transactional lock: only the
//! gateway can make the at-most-one-open invariant atomic. The guard
//! narrows the race window between two simultaneous start attempts; the
//! controller re-checks it immediately before each create call.

use std::sync::Arc;

use tracing::warn;

use zapcast_core::gateway::CampaignGateway;
use zapcast_core::types::{OrderId, OrderStatus};

/// Best-effort, gateway-backed check for an open dispatch order.
pub struct ActiveDispatchGuard {
    gateway: Arc<dyn CampaignGateway>,
}

impl ActiveDispatchGuard {
    pub fn new(gateway: Arc<dyn CampaignGateway>) -> Self {
        Self { gateway }
    }

    /// Returns true if any order other than `excluding` is open.
    ///
    /// Fails **closed**: when the gateway is unreachable this reports
    /// "active", blocking new starts rather than risking two concurrent
    /// mass-sends.
    pub async fn has_active_dispatch(&self, excluding: Option<&OrderId>) -> bool {
        match self.gateway.list_orders().await {
            Ok(orders) => orders
                .iter()
                .any(|o| o.status == OrderStatus::Open && Some(&o.id) != excluding),
            Err(e) => {
                warn!(error = %e, "order listing failed, guard reports active");
                true
            }
        }
    }
}
