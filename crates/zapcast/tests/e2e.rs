// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the dispatch orchestration pipeline.
//!
//! Each test builds an isolated harness over a mock gateway and walks an
//! operator flow: pair a device, start and stop dispatches, tune
//! parameters. Tests are independent and order-insensitive.

use std::sync::Arc;
use std::time::Duration;

use zapcast_config::model::PairingConfig;
use zapcast_core::error::StartBlocked;
use zapcast_core::gateway::CampaignGateway;
use zapcast_core::types::{
    CampaignId, CampaignKind, CampaignRef, ConnectionId, LinkStatus, MessageTemplate, OrderStatus,
    TemplateId,
};
use zapcast_dispatch::{DispatchController, DispatchState, ParametersStore, SessionView};
use zapcast_pairing::{PairingEvent, PairingService};
use zapcast_test_utils::MockGateway;

/// The same wiring the console binary builds per invocation.
struct Harness {
    gateway: Arc<MockGateway>,
    session: Arc<SessionView>,
    pairing: PairingService,
    params: ParametersStore,
    connection_id: ConnectionId,
}

impl Harness {
    fn new() -> Self {
        let gateway = Arc::new(MockGateway::new());
        let pairing_config = PairingConfig::default();
        Self {
            session: Arc::new(SessionView::new()),
            pairing: PairingService::new(gateway.clone(), &pairing_config),
            params: ParametersStore::new(gateway.clone()),
            connection_id: ConnectionId(pairing_config.connection_id.clone()),
            gateway,
        }
    }

    /// Fresh controller for a campaign, reconciled from the gateway first,
    /// the way each console invocation seeds its state.
    async fn controller(&self, campaign: CampaignRef) -> DispatchController {
        let controller =
            DispatchController::new(self.gateway.clone(), self.session.clone(), campaign);
        controller.refresh().await.unwrap();
        controller
    }

    async fn link_device(&self) {
        self.session
            .set_connection(MockGateway::connection_snapshot("primary", LinkStatus::Linked))
            .await;
    }
}

fn campaign(id: &str, kind: CampaignKind, audience_size: u64) -> CampaignRef {
    CampaignRef {
        id: CampaignId(id.to_string()),
        kind,
        name: format!("Campaign {id}"),
        audience_size,
    }
}

// ---- Pairing handshake ----

#[tokio::test(start_paused = true)]
async fn pairing_flow_links_device_and_updates_session() {
    let harness = Harness::new();

    // Device stays connecting for two polls, links on the third.
    for _ in 0..2 {
        harness
            .gateway
            .push_connection(MockGateway::connection_snapshot(
                "primary",
                LinkStatus::Connecting,
            ))
            .await;
    }
    harness
        .gateway
        .push_connection(MockGateway::connection_snapshot(
            "primary",
            LinkStatus::Linked,
        ))
        .await;

    let attempt = harness
        .pairing
        .request_pairing(&harness.connection_id)
        .await
        .unwrap();
    assert!(!attempt.code.code.is_empty());

    let mut events = harness.pairing.start_polling(&attempt).await;
    let event = events.recv().await.unwrap();
    let conn = match event {
        PairingEvent::Linked(conn) => conn,
        other => panic!("expected linked, got {other:?}"),
    };

    harness.session.set_connection(conn).await;
    assert_eq!(harness.session.link_status().await, LinkStatus::Linked);
}

#[tokio::test(start_paused = true)]
async fn pairing_times_out_when_device_never_links() {
    let harness = Harness::new();
    harness
        .gateway
        .set_connection(MockGateway::connection_snapshot(
            "primary",
            LinkStatus::Connecting,
        ))
        .await;

    let attempt = harness
        .pairing
        .request_pairing(&harness.connection_id)
        .await
        .unwrap();
    assert_eq!(attempt.deadline, Duration::from_secs(120));

    let mut events = harness.pairing.start_polling(&attempt).await;
    assert_eq!(events.recv().await, Some(PairingEvent::TimedOut));
    assert_eq!(harness.session.link_status().await, LinkStatus::Disconnected);
}

// ---- Full operator flow ----

#[tokio::test]
async fn start_stop_restart_cycle_across_invocations() {
    let harness = Harness::new();
    harness.link_device().await;

    let spring = campaign("spring", CampaignKind::Search, 40);

    let controller = harness.controller(spring.clone()).await;
    let order = controller
        .start(Some(TemplateId("tpl-1".into())))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Open);

    // A later invocation builds a fresh controller; reconciliation picks
    // up the open order so stop acts on it.
    let controller = harness.controller(spring.clone()).await;
    assert_eq!(controller.state().await, DispatchState::Open);
    assert_eq!(controller.stop().await.unwrap(), DispatchState::Closed);

    // Restart without a template reuses the one from the closed order.
    let controller = harness.controller(spring).await;
    let order = controller.restart(None).await.unwrap();
    assert_eq!(order.template_id, TemplateId("tpl-1".into()));
    assert_eq!(order.status, OrderStatus::Open);
}

#[tokio::test]
async fn only_one_dispatch_runs_account_wide() {
    let harness = Harness::new();
    harness.link_device().await;

    let search = harness
        .controller(campaign("spring", CampaignKind::Search, 40))
        .await;
    let list = harness
        .controller(campaign("vips", CampaignKind::List, 12))
        .await;

    search.start(Some(TemplateId("tpl-1".into()))).await.unwrap();

    let err = list.start(Some(TemplateId("tpl-2".into()))).await.unwrap_err();
    assert_eq!(
        err.blocked_reason(),
        Some(StartBlocked::AnotherDispatchActive)
    );

    // Stopping the first frees the account for the second.
    search.stop().await.unwrap();
    list.start(Some(TemplateId("tpl-2".into()))).await.unwrap();
    assert_eq!(list.state().await, DispatchState::Open);
}

#[tokio::test]
async fn unreachable_gateway_blocks_starts() {
    let harness = Harness::new();
    harness.link_device().await;

    harness.gateway.set_fail_list_orders(true);

    let controller = harness
        .controller(campaign("spring", CampaignKind::Search, 40))
        .await;
    let err = controller
        .start(Some(TemplateId("tpl-1".into())))
        .await
        .unwrap_err();
    assert_eq!(
        err.blocked_reason(),
        Some(StartBlocked::AnotherDispatchActive)
    );
    assert!(harness.gateway.created_orders().await.is_empty());
}

#[tokio::test]
async fn unlinked_device_blocks_starts_until_paired() {
    let harness = Harness::new();

    let controller = harness
        .controller(campaign("spring", CampaignKind::Search, 40))
        .await;
    let err = controller
        .start(Some(TemplateId("tpl-1".into())))
        .await
        .unwrap_err();
    assert_eq!(err.blocked_reason(), Some(StartBlocked::NotLinked));

    harness.link_device().await;
    controller.start(None).await.unwrap();
    assert_eq!(controller.state().await, DispatchState::Open);
}

// ---- Templates ----

#[tokio::test]
async fn templates_listed_from_gateway_feed_starts() {
    let harness = Harness::new();
    harness.link_device().await;
    harness
        .gateway
        .set_templates(vec![
            MessageTemplate {
                id: TemplateId("tpl-welcome".into()),
                name: "Welcome".into(),
            },
            MessageTemplate {
                id: TemplateId("tpl-reminder".into()),
                name: "Reminder".into(),
            },
        ])
        .await;

    let templates = harness.gateway.list_templates().await.unwrap();
    assert_eq!(templates.len(), 2);

    // A listed template id is what start consumes.
    let controller = harness
        .controller(campaign("spring", CampaignKind::Search, 40))
        .await;
    let order = controller.start(Some(templates[0].id.clone())).await.unwrap();
    assert_eq!(order.template_id, TemplateId("tpl-welcome".into()));
}

// ---- Dispatch parameters ----

#[tokio::test]
async fn parameter_updates_survive_new_invocations() {
    let harness = Harness::new();
    harness.params.set(250, 45).await.unwrap();

    // A fresh store over the same gateway sees the stored values.
    let params = ParametersStore::new(harness.gateway.clone());
    let current = params.get().await.unwrap();
    assert_eq!(current.max_per_run, 250);
    assert_eq!(current.delay_seconds, 45);
}

#[tokio::test]
async fn invalid_parameters_never_reach_the_gateway() {
    let harness = Harness::new();
    let before = harness.params.get().await.unwrap();

    assert!(harness.params.set(0, 30).await.is_err());
    assert!(harness.params.set(100, 0).await.is_err());

    assert_eq!(harness.params.get().await.unwrap(), before);
}
