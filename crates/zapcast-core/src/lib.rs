// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Zapcast dispatch console.
//!
//! This crate provides the error types, domain types, and the
//! [`CampaignGateway`] trait implemented by the HTTP client in
//! `zapcast-gateway` and the mock in `zapcast-test-utils`.

pub mod error;
pub mod gateway;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{StartBlocked, ZapcastError};
pub use gateway::CampaignGateway;
pub use types::{
    CampaignId, CampaignKind, CampaignRef, Connection, ConnectionId, DispatchOrder,
    DispatchParameters, LinkStatus, MessageTemplate, OrderId, OrderStatus, PairingAttempt,
    PairingCode, TemplateId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_trait_is_object_safe() {
        // The orchestration layer holds the gateway as Arc<dyn CampaignGateway>;
        // this won't compile if the trait loses object safety.
        fn _assert(_: &dyn CampaignGateway) {}
    }

    #[test]
    fn blocked_error_converts_from_reason() {
        let err: ZapcastError = StartBlocked::NotLinked.into();
        assert!(matches!(err, ZapcastError::Blocked(StartBlocked::NotLinked)));
    }
}
