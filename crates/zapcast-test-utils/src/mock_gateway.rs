// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock campaign gateway for deterministic testing.
//!
//! `MockGateway` implements `CampaignGateway` with scriptable connection
//! snapshots, an injectable pairing-code queue, an in-memory order set,
//! failure toggles, and captured mutating calls for assertion in tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use zapcast_core::error::ZapcastError;
use zapcast_core::gateway::CampaignGateway;
use zapcast_core::types::{
    CampaignId, CampaignRef, Connection, ConnectionId, DispatchOrder, DispatchParameters,
    LinkStatus, MessageTemplate, OrderId, OrderStatus, PairingCode, TemplateId,
};

fn unreachable_gateway() -> ZapcastError {
    ZapcastError::Gateway {
        message: "mock gateway unreachable".into(),
        source: None,
    }
}

/// A scriptable in-memory campaign gateway for tests.
///
/// Connection reads consume a script of snapshots (the last one repeats
/// once the script is exhausted), which lets pairing tests stage a
/// `connecting, connecting, linked` sequence tick by tick.
pub struct MockGateway {
    /// Scripted snapshots consumed by successive `connection()` calls.
    connection_script: Mutex<VecDeque<Connection>>,
    /// Snapshot repeated after the script runs out.
    connection_fallback: Mutex<Option<Connection>>,
    /// Queue of pairing codes; `None` entries model "no code available".
    pairing_codes: Mutex<VecDeque<Option<PairingCode>>>,
    orders: Mutex<Vec<DispatchOrder>>,
    parameters: Mutex<DispatchParameters>,
    templates: Mutex<Vec<MessageTemplate>>,
    /// Captured (campaign, template) pairs from `create_order`.
    created: Mutex<Vec<(CampaignId, TemplateId)>>,
    /// Captured campaign ids from `close_order`.
    closed: Mutex<Vec<CampaignId>>,
    connection_calls: AtomicUsize,
    list_order_calls: AtomicUsize,
    fail_connection: AtomicBool,
    fail_list_orders: AtomicBool,
    fail_create_order: AtomicBool,
    fail_close_order: AtomicBool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            connection_script: Mutex::new(VecDeque::new()),
            connection_fallback: Mutex::new(None),
            pairing_codes: Mutex::new(VecDeque::new()),
            orders: Mutex::new(Vec::new()),
            parameters: Mutex::new(DispatchParameters {
                max_per_run: 100,
                delay_seconds: 10,
            }),
            templates: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            closed: Mutex::new(Vec::new()),
            connection_calls: AtomicUsize::new(0),
            list_order_calls: AtomicUsize::new(0),
            fail_connection: AtomicBool::new(false),
            fail_list_orders: AtomicBool::new(false),
            fail_create_order: AtomicBool::new(false),
            fail_close_order: AtomicBool::new(false),
        }
    }

    /// Convenience snapshot for a connection in the given status.
    pub fn connection_snapshot(id: &str, status: LinkStatus) -> Connection {
        Connection {
            id: ConnectionId(id.to_string()),
            name: "Mock device".to_string(),
            status,
            device_id: match status {
                LinkStatus::Linked => Some("mock-device@c.us".to_string()),
                _ => None,
            },
        }
    }

    /// Append a snapshot to the connection script.
    pub async fn push_connection(&self, conn: Connection) {
        self.connection_script.lock().await.push_back(conn);
    }

    /// Set the snapshot repeated after the script is exhausted.
    pub async fn set_connection(&self, conn: Connection) {
        *self.connection_fallback.lock().await = Some(conn);
    }

    /// Queue a pairing-code response; `None` models the gateway having
    /// no code to hand out.
    pub async fn push_pairing_code(&self, code: Option<PairingCode>) {
        self.pairing_codes.lock().await.push_back(code);
    }

    /// Insert an order directly, bypassing `create_order`.
    pub async fn insert_order(&self, order: DispatchOrder) {
        self.orders.lock().await.push(order);
    }

    /// Build and insert an open order for a campaign id.
    pub async fn insert_open_order(&self, campaign_id: &str, template_id: &str) -> DispatchOrder {
        let order = DispatchOrder {
            id: OrderId(uuid::Uuid::new_v4().to_string()),
            campaign_id: CampaignId(campaign_id.to_string()),
            template_id: TemplateId(template_id.to_string()),
            status: OrderStatus::Open,
            updated_at: Utc::now(),
        };
        self.insert_order(order.clone()).await;
        order
    }

    pub async fn set_templates(&self, templates: Vec<MessageTemplate>) {
        *self.templates.lock().await = templates;
    }

    pub fn set_fail_connection(&self, fail: bool) {
        self.fail_connection.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_list_orders(&self, fail: bool) {
        self.fail_list_orders.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_create_order(&self, fail: bool) {
        self.fail_create_order.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_close_order(&self, fail: bool) {
        self.fail_close_order.store(fail, Ordering::SeqCst);
    }

    /// Number of `connection()` calls observed.
    pub fn connection_calls(&self) -> usize {
        self.connection_calls.load(Ordering::SeqCst)
    }

    /// Number of `list_orders()` calls observed (guard consultations).
    pub fn list_order_calls(&self) -> usize {
        self.list_order_calls.load(Ordering::SeqCst)
    }

    /// Captured create-order calls.
    pub async fn created_orders(&self) -> Vec<(CampaignId, TemplateId)> {
        self.created.lock().await.clone()
    }

    /// Captured close-order calls.
    pub async fn closed_orders(&self) -> Vec<CampaignId> {
        self.closed.lock().await.clone()
    }

    /// Current order rows (newest last).
    pub async fn orders(&self) -> Vec<DispatchOrder> {
        self.orders.lock().await.clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CampaignGateway for MockGateway {
    async fn connection(&self, id: &ConnectionId) -> Result<Connection, ZapcastError> {
        self.connection_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_connection.load(Ordering::SeqCst) {
            return Err(unreachable_gateway());
        }

        if let Some(conn) = self.connection_script.lock().await.pop_front() {
            // The final scripted snapshot keeps repeating.
            *self.connection_fallback.lock().await = Some(conn.clone());
            return Ok(conn);
        }

        self.connection_fallback
            .lock()
            .await
            .clone()
            .ok_or_else(|| ZapcastError::Internal(format!("no scripted connection for {}", id.0)))
    }

    async fn request_pairing_code(
        &self,
        _id: &ConnectionId,
    ) -> Result<Option<PairingCode>, ZapcastError> {
        let mut codes = self.pairing_codes.lock().await;
        match codes.pop_front() {
            Some(entry) => Ok(entry),
            None => Ok(Some(PairingCode {
                code: "2@mock-pairing-code".to_string(),
                issued_at: Utc::now(),
            })),
        }
    }

    async fn delete_connection(&self, id: &ConnectionId) -> Result<(), ZapcastError> {
        *self.connection_fallback.lock().await = Some(Self::connection_snapshot(
            &id.0,
            LinkStatus::Disconnected,
        ));
        self.connection_script.lock().await.clear();
        Ok(())
    }

    async fn create_order(
        &self,
        campaign: &CampaignRef,
        template: &TemplateId,
    ) -> Result<DispatchOrder, ZapcastError> {
        if self.fail_create_order.load(Ordering::SeqCst) {
            return Err(unreachable_gateway());
        }

        self.created
            .lock()
            .await
            .push((campaign.id.clone(), template.clone()));

        let mut orders = self.orders.lock().await;
        // A new order supersedes the campaign's prior one.
        for order in orders.iter_mut().filter(|o| o.campaign_id == campaign.id) {
            order.status = OrderStatus::Close;
            order.updated_at = Utc::now();
        }
        let order = DispatchOrder {
            id: OrderId(uuid::Uuid::new_v4().to_string()),
            campaign_id: campaign.id.clone(),
            template_id: template.clone(),
            status: OrderStatus::Open,
            updated_at: Utc::now(),
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn close_order(&self, campaign: &CampaignRef) -> Result<(), ZapcastError> {
        if self.fail_close_order.load(Ordering::SeqCst) {
            return Err(unreachable_gateway());
        }

        self.closed.lock().await.push(campaign.id.clone());

        let mut orders = self.orders.lock().await;
        for order in orders
            .iter_mut()
            .filter(|o| o.campaign_id == campaign.id && o.status == OrderStatus::Open)
        {
            order.status = OrderStatus::Close;
            order.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn current_order(
        &self,
        campaign: &CampaignRef,
    ) -> Result<Option<DispatchOrder>, ZapcastError> {
        let orders = self.orders.lock().await;
        Ok(orders
            .iter()
            .filter(|o| o.campaign_id == campaign.id)
            .next_back()
            .cloned())
    }

    async fn list_orders(&self) -> Result<Vec<DispatchOrder>, ZapcastError> {
        self.list_order_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_orders.load(Ordering::SeqCst) {
            return Err(unreachable_gateway());
        }
        Ok(self.orders.lock().await.clone())
    }

    async fn dispatch_parameters(&self) -> Result<DispatchParameters, ZapcastError> {
        Ok(*self.parameters.lock().await)
    }

    async fn set_dispatch_parameters(
        &self,
        params: &DispatchParameters,
    ) -> Result<(), ZapcastError> {
        *self.parameters.lock().await = *params;
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<MessageTemplate>, ZapcastError> {
        Ok(self.templates.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(id: &str) -> CampaignRef {
        CampaignRef {
            id: CampaignId(id.to_string()),
            kind: zapcast_core::CampaignKind::List,
            name: "test".to_string(),
            audience_size: 10,
        }
    }

    #[tokio::test]
    async fn connection_script_repeats_last_snapshot() {
        let gw = MockGateway::new();
        gw.push_connection(MockGateway::connection_snapshot("c", LinkStatus::Connecting))
            .await;
        gw.push_connection(MockGateway::connection_snapshot("c", LinkStatus::Linked))
            .await;

        let id = ConnectionId("c".into());
        assert_eq!(gw.connection(&id).await.unwrap().status, LinkStatus::Connecting);
        assert_eq!(gw.connection(&id).await.unwrap().status, LinkStatus::Linked);
        // Script exhausted: last snapshot repeats.
        assert_eq!(gw.connection(&id).await.unwrap().status, LinkStatus::Linked);
        assert_eq!(gw.connection_calls(), 3);
    }

    #[tokio::test]
    async fn create_order_supersedes_prior_for_campaign() {
        let gw = MockGateway::new();
        let camp = campaign("a");
        gw.create_order(&camp, &TemplateId("t1".into())).await.unwrap();
        gw.create_order(&camp, &TemplateId("t2".into())).await.unwrap();

        let orders = gw.orders().await;
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].status, OrderStatus::Close);
        assert_eq!(orders[1].status, OrderStatus::Open);
        assert_eq!(gw.created_orders().await.len(), 2);
    }

    #[tokio::test]
    async fn close_order_flips_open_rows_only() {
        let gw = MockGateway::new();
        let camp = campaign("a");
        gw.insert_open_order("a", "t1").await;
        gw.close_order(&camp).await.unwrap();

        let current = gw.current_order(&camp).await.unwrap().unwrap();
        assert_eq!(current.status, OrderStatus::Close);
        assert_eq!(gw.closed_orders().await, vec![CampaignId("a".into())]);
    }

    #[tokio::test]
    async fn list_orders_failure_toggle() {
        let gw = MockGateway::new();
        gw.set_fail_list_orders(true);
        assert!(gw.list_orders().await.is_err());
        gw.set_fail_list_orders(false);
        assert!(gw.list_orders().await.is_ok());
    }
}
