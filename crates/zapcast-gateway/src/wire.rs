// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the campaign gateway REST surface.
//!
//! Domain types from `zapcast-core` serialize directly where the wire
//! shape matches; the structs here cover the request/response envelopes
//! that differ from the domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zapcast_core::types::{PairingCode, TemplateId};

/// Response to a pairing-code request.
///
/// `code` is null when the gateway has no code to issue right now,
/// a soft condition, not an HTTP error.
#[derive(Debug, Clone, Deserialize)]
pub struct PairingCodeResponse {
    pub code: Option<String>,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
}

impl PairingCodeResponse {
    /// Converts the response into a domain `PairingCode`, if one was issued.
    pub fn into_code(self) -> Option<PairingCode> {
        let code = self.code?;
        Some(PairingCode {
            code,
            issued_at: self.issued_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Body for the create-order call.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest<'a> {
    pub template_id: &'a TemplateId,
}

/// Error envelope the gateway returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairing_response_with_code() {
        let resp: PairingCodeResponse =
            serde_json::from_str(r#"{"code":"2@abc123","issued_at":"2026-08-01T10:00:00Z"}"#)
                .unwrap();
        let code = resp.into_code().unwrap();
        assert_eq!(code.code, "2@abc123");
    }

    #[test]
    fn pairing_response_with_null_code() {
        let resp: PairingCodeResponse = serde_json::from_str(r#"{"code":null}"#).unwrap();
        assert!(resp.into_code().is_none());
    }

    #[test]
    fn pairing_response_without_issued_at_defaults_to_now() {
        let resp: PairingCodeResponse = serde_json::from_str(r#"{"code":"2@xyz"}"#).unwrap();
        assert!(resp.into_code().is_some());
    }
}
