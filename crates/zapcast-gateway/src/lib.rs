// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote campaign gateway.
//!
//! Provides [`GatewayClient`], the production implementation of
//! [`zapcast_core::CampaignGateway`]. The gateway owns the record of truth
//! for connections, dispatch orders, parameters, and templates; this crate
//! only speaks its REST surface.

pub mod client;
pub mod wire;

pub use client::GatewayClient;
