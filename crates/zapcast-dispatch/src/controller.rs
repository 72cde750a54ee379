// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch order controller: the per-campaign open/close state machine.
//!
//! Owns one campaign's dispatch lifecycle (`NoOrder -> Open -> Closed ->
//! Open ...`), validating every precondition before a gateway call and
//! reconciling local state from the gateway after each mutation. No
//! optimistic-only updates: downstream sends depend on the order status
//! being correct.
//!
//! Transitions are serialized through an internal mutex held for the
//! whole transition, so a second start issued before the first completes
//! queues behind it and then fails the already-open check instead of
//! double-creating.

use std::sync::Arc;

use strum::Display;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use zapcast_core::error::{StartBlocked, ZapcastError};
use zapcast_core::gateway::CampaignGateway;
use zapcast_core::types::{CampaignRef, DispatchOrder, LinkStatus, OrderStatus, TemplateId};

use crate::guard::ActiveDispatchGuard;
use crate::session::SessionView;

/// Per-campaign dispatch state as seen by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DispatchState {
    /// No dispatch order exists yet for this campaign.
    NoOrder,
    /// An order exists with status `open`; sends are in progress.
    Open,
    /// The most recent order is closed (stopped or completed).
    Closed,
}

#[derive(Debug)]
struct ControllerInner {
    state: DispatchState,
    order: Option<DispatchOrder>,
    /// Template used by the most recent order; reused on restart when no
    /// new template is supplied.
    last_template: Option<TemplateId>,
}

/// Controls one campaign's dispatch order lifecycle.
pub struct DispatchController {
    gateway: Arc<dyn CampaignGateway>,
    guard: ActiveDispatchGuard,
    session: Arc<SessionView>,
    campaign: CampaignRef,
    inner: Mutex<ControllerInner>,
}

impl DispatchController {
    pub fn new(
        gateway: Arc<dyn CampaignGateway>,
        session: Arc<SessionView>,
        campaign: CampaignRef,
    ) -> Self {
        Self {
            guard: ActiveDispatchGuard::new(gateway.clone()),
            gateway,
            session,
            campaign,
            inner: Mutex::new(ControllerInner {
                state: DispatchState::NoOrder,
                order: None,
                last_template: None,
            }),
        }
    }

    /// The campaign this controller owns.
    pub fn campaign(&self) -> &CampaignRef {
        &self.campaign
    }

    /// Current state snapshot.
    pub async fn state(&self) -> DispatchState {
        self.inner.lock().await.state
    }

    /// Re-fetches the campaign's current order and reconciles local state.
    pub async fn refresh(&self) -> Result<DispatchState, ZapcastError> {
        let mut inner = self.inner.lock().await;
        self.reconcile(&mut inner).await?;
        Ok(inner.state)
    }

    /// Starts a dispatch for this campaign.
    ///
    /// Preconditions, checked in order before the gateway create call:
    /// audience size > 1, a template (explicit or remembered), the device
    /// linked, no open order for this campaign, and the active-dispatch
    /// guard clear. The guard is re-validated here, immediately before the
    /// create call, not only at render time.
    pub async fn start(
        &self,
        template: Option<TemplateId>,
    ) -> Result<DispatchOrder, ZapcastError> {
        let mut inner = self.inner.lock().await;
        self.start_locked(&mut inner, template).await
    }

    /// Restarts a dispatch after a stop or natural completion.
    ///
    /// Same preconditions as [`start`](Self::start); when no template is
    /// supplied, the previously used template is reused.
    pub async fn restart(
        &self,
        template: Option<TemplateId>,
    ) -> Result<DispatchOrder, ZapcastError> {
        let mut inner = self.inner.lock().await;
        self.start_locked(&mut inner, template).await
    }

    /// Stops the open dispatch for this campaign.
    ///
    /// Whether the external send worker hard-aborts or drains in-flight
    /// sends on close is not observable from this layer; the controller
    /// only flips the order and reconciles. Stopping with no open order
    /// is an idempotent no-op.
    pub async fn stop(&self) -> Result<DispatchState, ZapcastError> {
        let mut inner = self.inner.lock().await;

        if inner.state != DispatchState::Open {
            debug!(campaign = %self.campaign.id.0, "stop requested with no open order");
            return Ok(inner.state);
        }

        self.gateway
            .close_order(&self.campaign)
            .await
            .map_err(dispatch_action_failed)?;

        info!(campaign = %self.campaign.id.0, "dispatch order closed");

        if let Err(e) = self.reconcile(&mut inner).await {
            // The close succeeded; a failed re-fetch must not resurrect
            // the open state.
            warn!(error = %e, "post-stop refresh failed, marking order closed locally");
            if let Some(order) = inner.order.as_mut() {
                order.status = OrderStatus::Close;
            }
            inner.state = DispatchState::Closed;
        }

        Ok(inner.state)
    }

    /// The reason a Start/Restart is currently blocked, or `None` when the
    /// action is available. Re-computed on demand for the UI; `start`
    /// re-validates everything again before acting.
    pub async fn disabled_reason(&self) -> Option<StartBlocked> {
        let inner = self.inner.lock().await;

        if self.campaign.audience_size <= 1 {
            return Some(StartBlocked::AudienceTooSmall {
                size: self.campaign.audience_size,
            });
        }
        if inner.last_template.is_none() {
            return Some(StartBlocked::TemplateRequired);
        }
        if self.session.link_status().await != LinkStatus::Linked {
            return Some(StartBlocked::NotLinked);
        }
        if inner.state == DispatchState::Open {
            return Some(StartBlocked::AnotherDispatchActive);
        }
        let excluding = inner.order.as_ref().map(|o| &o.id);
        if self.guard.has_active_dispatch(excluding).await {
            return Some(StartBlocked::AnotherDispatchActive);
        }
        None
    }

    async fn start_locked(
        &self,
        inner: &mut ControllerInner,
        template: Option<TemplateId>,
    ) -> Result<DispatchOrder, ZapcastError> {
        // Local preconditions first: these never touch the gateway.
        if self.campaign.audience_size <= 1 {
            return Err(StartBlocked::AudienceTooSmall {
                size: self.campaign.audience_size,
            }
            .into());
        }

        let template = template
            .or_else(|| inner.last_template.clone())
            .ok_or(StartBlocked::TemplateRequired)?;

        // The selection is remembered even when a later precondition
        // vetoes this attempt; a retry or restart reuses it.
        inner.last_template = Some(template.clone());

        if self.session.link_status().await != LinkStatus::Linked {
            return Err(StartBlocked::NotLinked.into());
        }

        if inner.state == DispatchState::Open {
            return Err(StartBlocked::AnotherDispatchActive.into());
        }

        // Guard re-check as close to the create call as possible; the
        // campaign's own (closed) order does not count against it.
        let excluding = inner.order.as_ref().map(|o| &o.id);
        if self.guard.has_active_dispatch(excluding).await {
            return Err(StartBlocked::AnotherDispatchActive.into());
        }

        let order = self
            .gateway
            .create_order(&self.campaign, &template)
            .await
            .map_err(dispatch_action_failed)?;

        info!(
            campaign = %self.campaign.id.0,
            order = %order.id.0,
            template = %template.0,
            "dispatch order opened"
        );

        // Reconcile from the source of truth rather than trusting the
        // create response alone.
        if let Err(e) = self.reconcile(inner).await {
            warn!(error = %e, "post-start refresh failed, using create response");
            inner.state = DispatchState::Open;
            inner.order = Some(order.clone());
        }

        Ok(order)
    }

    async fn reconcile(&self, inner: &mut ControllerInner) -> Result<(), ZapcastError> {
        let order = self.gateway.current_order(&self.campaign).await?;

        inner.state = match &order {
            None => DispatchState::NoOrder,
            Some(o) if o.status == OrderStatus::Open => DispatchState::Open,
            Some(_) => DispatchState::Closed,
        };
        if let Some(o) = &order {
            inner.last_template = Some(o.template_id.clone());
        }
        inner.order = order;

        Ok(())
    }
}

fn dispatch_action_failed(e: ZapcastError) -> ZapcastError {
    ZapcastError::DispatchActionFailed {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}
