// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote campaign gateway.
//!
//! Implements [`CampaignGateway`] over the gateway's REST surface.
//! There is no automatic retry here: poll-loop callers swallow transient
//! errors per tick, and dispatch actions are retried manually by the
//! operator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use tracing::debug;

use zapcast_config::model::GatewayConfig;
use zapcast_core::error::ZapcastError;
use zapcast_core::gateway::CampaignGateway;
use zapcast_core::types::{
    CampaignRef, Connection, ConnectionId, DispatchOrder, DispatchParameters, MessageTemplate,
    PairingCode, TemplateId,
};

use crate::wire::{CreateOrderRequest, ErrorBody, PairingCodeResponse};

/// HTTP client for campaign gateway communication.
///
/// Manages the API-token header, connection pooling, and status-code
/// mapping into [`ZapcastError::Gateway`].
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Creates a new gateway client from configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, ZapcastError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        if let Some(ref token) = config.api_token {
            headers.insert(
                "x-api-token",
                HeaderValue::from_str(token).map_err(|e| {
                    ZapcastError::Config(format!("invalid API token header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ZapcastError::Gateway {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn order_path(campaign: &CampaignRef, suffix: &str) -> String {
        format!(
            "/v1/campaigns/{}/{}/orders{suffix}",
            campaign.kind, campaign.id.0
        )
    }

    /// Maps a non-success response into a `ZapcastError::Gateway`,
    /// preferring the gateway's error envelope when the body parses.
    async fn error_from(response: reqwest::Response) -> ZapcastError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(envelope) => format!("gateway returned {status}: {}", envelope.error),
            Err(_) => format!("gateway returned {status}: {body}"),
        };
        ZapcastError::Gateway {
            message,
            source: None,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ZapcastError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(%status, path, "gateway GET");

        if !status.is_success() {
            return Err(Self::error_from(response).await);
        }

        response.json::<T>().await.map_err(decode_error)
    }
}

fn transport_error(e: reqwest::Error) -> ZapcastError {
    ZapcastError::Gateway {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

fn decode_error(e: reqwest::Error) -> ZapcastError {
    ZapcastError::Gateway {
        message: format!("failed to decode gateway response: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl CampaignGateway for GatewayClient {
    async fn connection(&self, id: &ConnectionId) -> Result<Connection, ZapcastError> {
        self.get_json(&format!("/v1/connections/{}", id.0)).await
    }

    async fn request_pairing_code(
        &self,
        id: &ConnectionId,
    ) -> Result<Option<PairingCode>, ZapcastError> {
        let response = self
            .client
            .post(self.url(&format!("/v1/connections/{}/pairing-code", id.0)))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(%status, connection = %id.0, "pairing code requested");

        if !status.is_success() {
            return Err(Self::error_from(response).await);
        }

        let body: PairingCodeResponse = response.json().await.map_err(decode_error)?;
        Ok(body.into_code())
    }

    async fn delete_connection(&self, id: &ConnectionId) -> Result<(), ZapcastError> {
        let response = self
            .client
            .delete(self.url(&format!("/v1/connections/{}", id.0)))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    async fn create_order(
        &self,
        campaign: &CampaignRef,
        template: &TemplateId,
    ) -> Result<DispatchOrder, ZapcastError> {
        let response = self
            .client
            .post(self.url(&Self::order_path(campaign, "")))
            .json(&CreateOrderRequest {
                template_id: template,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(%status, campaign = %campaign.id.0, "order create requested");

        if !status.is_success() {
            return Err(Self::error_from(response).await);
        }

        response.json::<DispatchOrder>().await.map_err(decode_error)
    }

    async fn close_order(&self, campaign: &CampaignRef) -> Result<(), ZapcastError> {
        let response = self
            .client
            .post(self.url(&Self::order_path(campaign, "/close")))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(%status, campaign = %campaign.id.0, "order close requested");

        if !status.is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    async fn current_order(
        &self,
        campaign: &CampaignRef,
    ) -> Result<Option<DispatchOrder>, ZapcastError> {
        let response = self
            .client
            .get(self.url(&Self::order_path(campaign, "/current")))
            .send()
            .await
            .map_err(transport_error)?;

        // 404 means "no order yet for this campaign", not a failure.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let order: DispatchOrder = response.json().await.map_err(decode_error)?;
        Ok(Some(order))
    }

    async fn list_orders(&self) -> Result<Vec<DispatchOrder>, ZapcastError> {
        self.get_json("/v1/orders").await
    }

    async fn dispatch_parameters(&self) -> Result<DispatchParameters, ZapcastError> {
        self.get_json("/v1/dispatch-parameters").await
    }

    async fn set_dispatch_parameters(
        &self,
        params: &DispatchParameters,
    ) -> Result<(), ZapcastError> {
        let response = self
            .client
            .put(self.url("/v1/dispatch-parameters"))
            .json(params)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<MessageTemplate>, ZapcastError> {
        self.get_json("/v1/templates").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zapcast_core::types::{CampaignId, CampaignKind, OrderStatus};

    fn client_for(server: &MockServer, token: Option<&str>) -> GatewayClient {
        let config = GatewayConfig {
            base_url: server.uri(),
            api_token: token.map(str::to_string),
            request_timeout_secs: 5,
        };
        GatewayClient::new(&config).unwrap()
    }

    fn campaign() -> CampaignRef {
        CampaignRef {
            id: CampaignId("camp-1".into()),
            kind: CampaignKind::Search,
            name: "August promo".into(),
            audience_size: 250,
        }
    }

    #[tokio::test]
    async fn connection_fetch_parses_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/connections/primary"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"id":"primary","name":"Main device","status":"linked","device_id":"5511999@c.us"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let conn = client_for(&server, None)
            .connection(&ConnectionId("primary".into()))
            .await
            .unwrap();
        assert_eq!(conn.status, zapcast_core::LinkStatus::Linked);
        assert_eq!(conn.device_id.as_deref(), Some("5511999@c.us"));
    }

    #[tokio::test]
    async fn api_token_header_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/orders"))
            .and(header("x-api-token", "tok-9"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let orders = client_for(&server, Some("tok-9")).list_orders().await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn null_pairing_code_maps_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/connections/primary/pairing-code"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"code":null}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let code = client_for(&server, None)
            .request_pairing_code(&ConnectionId("primary".into()))
            .await
            .unwrap();
        assert!(code.is_none());
    }

    #[tokio::test]
    async fn create_order_posts_template_and_parses_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/campaigns/search/camp-1/orders"))
            .and(body_json_string(r#"{"template_id":"tpl-1"}"#))
            .respond_with(ResponseTemplate::new(201).set_body_raw(
                r#"{"id":"ord-1","campaign_id":"camp-1","template_id":"tpl-1","status":"open","updated_at":"2026-08-01T10:00:00Z"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let order = client_for(&server, None)
            .create_order(&campaign(), &TemplateId("tpl-1".into()))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.id.0, "ord-1");
    }

    #[tokio::test]
    async fn current_order_404_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/campaigns/search/camp-1/orders/current"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let order = client_for(&server, None)
            .current_order(&campaign())
            .await
            .unwrap();
        assert!(order.is_none());
    }

    #[tokio::test]
    async fn error_envelope_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/campaigns/search/camp-1/orders/close"))
            .respond_with(ResponseTemplate::new(500).set_body_raw(
                r#"{"error":"worker unavailable"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .close_order(&campaign())
            .await
            .unwrap_err();
        match err {
            ZapcastError::Gateway { message, .. } => {
                assert!(message.contains("worker unavailable"), "{message}");
            }
            other => panic!("expected Gateway error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn set_parameters_puts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/dispatch-parameters"))
            .and(body_json_string(r#"{"max_per_run":500,"delay_seconds":12}"#))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server, None)
            .set_dispatch_parameters(&DispatchParameters {
                max_per_run: 500,
                delay_seconds: 12,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn templates_list_parses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/templates"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[{"id":"tpl-1","name":"Welcome"},{"id":"tpl-2","name":"Reminder"}]"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let templates = client_for(&server, None).list_templates().await.unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[1].name, "Reminder");
    }
}
