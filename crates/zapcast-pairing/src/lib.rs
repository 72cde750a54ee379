// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection pairing service for the Zapcast console.
//!
//! Obtains a scannable pairing code from the campaign gateway, then polls
//! the connection status on a fixed interval until the device links or a
//! hard deadline elapses. The poll loop is a cancellable spawned task, not
//! a blocking loop; results are delivered as [`PairingEvent`]s on an mpsc
//! channel.
//!
//! This service owns no persisted state; the Connection record of truth
//! lives in the gateway and is only observed here.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use zapcast_config::model::PairingConfig;
use zapcast_core::error::ZapcastError;
use zapcast_core::gateway::CampaignGateway;
use zapcast_core::types::{Connection, ConnectionId, LinkStatus, PairingAttempt};

/// Outcome of a pairing poll loop, delivered at most once per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingEvent {
    /// The device completed pairing; carries the updated connection.
    Linked(Connection),
    /// The deadline elapsed without the device linking.
    TimedOut,
}

/// Requests pairing codes and watches for link confirmation.
///
/// Only one poll loop may be active per connection; starting a new one
/// cancels any prior loop for the same connection first.
pub struct PairingService {
    gateway: Arc<dyn CampaignGateway>,
    poll_interval: Duration,
    link_timeout: Duration,
    active: Arc<Mutex<HashMap<ConnectionId, CancellationToken>>>,
}

impl PairingService {
    /// Creates a pairing service with timing from configuration.
    pub fn new(gateway: Arc<dyn CampaignGateway>, config: &PairingConfig) -> Self {
        Self::with_timing(
            gateway,
            Duration::from_secs(config.poll_interval_secs),
            Duration::from_secs(config.link_timeout_secs),
        )
    }

    /// Creates a pairing service with explicit timing.
    pub fn with_timing(
        gateway: Arc<dyn CampaignGateway>,
        poll_interval: Duration,
        link_timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            poll_interval,
            link_timeout,
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Requests a pairing code for a connection.
    ///
    /// Maps the gateway's "no code right now" response to the soft
    /// [`ZapcastError::NoCodeAvailable`]; the caller should present
    /// "try again shortly" rather than treat it as fatal.
    pub async fn request_pairing(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<PairingAttempt, ZapcastError> {
        let code = self
            .gateway
            .request_pairing_code(connection_id)
            .await?
            .ok_or(ZapcastError::NoCodeAvailable)?;

        info!(connection = %connection_id.0, "pairing code issued");

        Ok(PairingAttempt {
            connection_id: connection_id.clone(),
            code,
            poll_interval: self.poll_interval,
            deadline: self.link_timeout,
        })
    }

    /// Starts polling for link confirmation.
    ///
    /// Every `poll_interval`, the connection status is fetched from the
    /// gateway. A tick that observes [`LinkStatus::Linked`] emits
    /// [`PairingEvent::Linked`] exactly once and stops. If the deadline
    /// elapses first, [`PairingEvent::TimedOut`] is emitted exactly once
    /// and polling stops. Transient gateway errors on a tick are logged
    /// and retried on the next tick; only the deadline gives up.
    ///
    /// Any prior loop for the same connection is cancelled first, so a
    /// restarted pairing attempt never races two loops.
    pub async fn start_polling(&self, attempt: &PairingAttempt) -> mpsc::Receiver<PairingEvent> {
        let token = CancellationToken::new();

        {
            let mut active = self.active.lock().await;
            if let Some(prior) = active.insert(attempt.connection_id.clone(), token.clone()) {
                debug!(connection = %attempt.connection_id.0, "cancelling prior pairing poll");
                prior.cancel();
            }
        }

        let (tx, rx) = mpsc::channel(1);
        let gateway = self.gateway.clone();
        let connection_id = attempt.connection_id.clone();
        let poll_interval = attempt.poll_interval;
        let deadline = attempt.deadline;

        tokio::spawn(async move {
            poll_loop(gateway, connection_id, poll_interval, deadline, token, tx).await;
        });

        rx
    }

    /// Stops the poll loop for a connection without side effects.
    ///
    /// Idempotent: safe to call repeatedly or after the loop already
    /// finished on its own. No events are emitted after cancellation.
    pub async fn cancel_polling(&self, connection_id: &ConnectionId) {
        if let Some(token) = self.active.lock().await.remove(connection_id) {
            token.cancel();
            debug!(connection = %connection_id.0, "pairing poll cancelled");
        }
    }
}

async fn poll_loop(
    gateway: Arc<dyn CampaignGateway>,
    connection_id: ConnectionId,
    poll_interval: Duration,
    deadline: Duration,
    token: CancellationToken,
    tx: mpsc::Sender<PairingEvent>,
) {
    let give_up_at = tokio::time::Instant::now() + deadline;
    let timeout = tokio::time::sleep_until(give_up_at);
    tokio::pin!(timeout);

    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // interval fires immediately; the first poll belongs one interval in.
    ticker.tick().await;

    loop {
        tokio::select! {
            // Cancellation wins over a due tick, and the deadline wins
            // over a tick that lands on the same instant.
            biased;

            _ = token.cancelled() => {
                debug!(connection = %connection_id.0, "pairing poll stopped by cancellation");
                return;
            }

            _ = &mut timeout => {
                info!(connection = %connection_id.0, "pairing deadline elapsed without link");
                let _ = tx.send(PairingEvent::TimedOut).await;
                return;
            }

            _ = ticker.tick() => {
                match gateway.connection(&connection_id).await {
                    Ok(conn) if conn.status == LinkStatus::Linked => {
                        info!(connection = %connection_id.0, "device linked");
                        let _ = tx.send(PairingEvent::Linked(conn)).await;
                        return;
                    }
                    Ok(conn) => {
                        debug!(
                            connection = %connection_id.0,
                            status = %conn.status,
                            "device not linked yet"
                        );
                    }
                    Err(e) => {
                        // Transient: retried on the next tick. Only the
                        // deadline timer is authoritative for giving up.
                        warn!(
                            connection = %connection_id.0,
                            error = %e,
                            "pairing poll tick failed, retrying on next tick"
                        );
                    }
                }
            }
        }
    }
}
