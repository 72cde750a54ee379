// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Zapcast dispatch console.

use thiserror::Error;

/// Reason a Start/Restart action is currently blocked.
///
/// These are precondition vetoes resolved *before* any gateway call is
/// attempted. The `Display` text is the operator-facing message shown next
/// to the disabled action, so each blocked start names its specific cause
/// rather than a generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartBlocked {
    /// The messaging device is not paired.
    #[error("connect the device first")]
    NotLinked,

    /// Another dispatch order is open somewhere in the account.
    #[error("another dispatch is active")]
    AnotherDispatchActive,

    /// No message template has been selected for this campaign yet.
    #[error("select a message template first")]
    TemplateRequired,

    /// The campaign audience is too small to dispatch.
    #[error("audience too small ({size} contact)")]
    AudienceTooSmall { size: u64 },
}

/// The primary error type used across the Zapcast workspace.
#[derive(Debug, Error)]
pub enum ZapcastError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport or protocol failures talking to the campaign gateway.
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The gateway had no pairing code to issue. Soft and retryable:
    /// code issuance is a known-flaky external step, so callers should
    /// present "try again shortly" rather than treat this as fatal.
    #[error("no pairing code available, try again shortly")]
    NoCodeAvailable,

    /// The pairing deadline elapsed without the device linking.
    #[error("pairing timed out before the device linked")]
    PairingTimeout,

    /// A dispatch precondition vetoed the action before any gateway call.
    #[error("dispatch blocked: {0}")]
    Blocked(#[from] StartBlocked),

    /// The gateway rejected or failed a start/stop call. The dispatch
    /// state machine does not advance; the operator may retry.
    #[error("dispatch action failed: {message}")]
    DispatchActionFailed {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Dispatch parameters failed validation before the gateway write.
    #[error("invalid dispatch parameters: {0}")]
    ParametersInvalid(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ZapcastError {
    /// Returns the blocked-start reason if this error is a precondition veto.
    pub fn blocked_reason(&self) -> Option<StartBlocked> {
        match self {
            Self::Blocked(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_display_names_specific_reason() {
        assert_eq!(
            StartBlocked::NotLinked.to_string(),
            "connect the device first"
        );
        assert_eq!(
            StartBlocked::AnotherDispatchActive.to_string(),
            "another dispatch is active"
        );
        assert_eq!(
            StartBlocked::TemplateRequired.to_string(),
            "select a message template first"
        );
        assert_eq!(
            StartBlocked::AudienceTooSmall { size: 1 }.to_string(),
            "audience too small (1 contact)"
        );
    }

    #[test]
    fn blocked_reason_extraction() {
        let err = ZapcastError::from(StartBlocked::TemplateRequired);
        assert_eq!(err.blocked_reason(), Some(StartBlocked::TemplateRequired));

        let err = ZapcastError::NoCodeAvailable;
        assert_eq!(err.blocked_reason(), None);
    }

    #[test]
    fn error_variants_construct() {
        let _config = ZapcastError::Config("test".into());
        let _gateway = ZapcastError::Gateway {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _timeout = ZapcastError::PairingTimeout;
        let _failed = ZapcastError::DispatchActionFailed {
            message: "test".into(),
            source: None,
        };
        let _invalid = ZapcastError::ParametersInvalid("test".into());
        let _internal = ZapcastError::Internal("test".into());
    }
}
