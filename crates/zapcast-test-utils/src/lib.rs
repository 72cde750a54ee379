// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Zapcast workspace.
//!
//! Provides [`MockGateway`], a scriptable in-memory implementation of
//! `CampaignGateway` used by unit and integration tests across crates.

pub mod mock_gateway;

pub use mock_gateway::MockGateway;
