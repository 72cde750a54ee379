// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zapcast start`, `stop`, and `restart` command implementations.
//!
//! Each run builds a fresh controller for the target campaign, seeded
//! from the gateway, then performs exactly one transition.

use clap::Args;

use zapcast_core::error::ZapcastError;
use zapcast_core::types::{CampaignId, CampaignKind, CampaignRef, TemplateId};
use zapcast_dispatch::DispatchState;

use crate::console::Console;

/// Flags identifying the campaign a dispatch command acts on.
#[derive(Args, Debug)]
pub struct CampaignTarget {
    /// Campaign identifier.
    #[arg(long)]
    pub campaign: String,

    /// Campaign flavor: `search` or `list`.
    #[arg(long)]
    pub kind: CampaignKind,

    /// Display name; defaults to the identifier.
    #[arg(long)]
    pub name: Option<String>,

    /// Audience size as reported by the contact subsystem. Required for
    /// start/restart; dispatching to fewer than two contacts is refused.
    #[arg(long, default_value_t = 0)]
    pub audience: u64,
}

impl CampaignTarget {
    pub fn to_campaign_ref(&self) -> CampaignRef {
        CampaignRef {
            id: CampaignId(self.campaign.clone()),
            kind: self.kind,
            name: self.name.clone().unwrap_or_else(|| self.campaign.clone()),
            audience_size: self.audience,
        }
    }
}

/// Run the `zapcast start` command.
pub async fn run_start(
    console: &Console,
    target: &CampaignTarget,
    template: Option<String>,
) -> Result<(), ZapcastError> {
    console.load_session().await?;
    let controller = console.controller(target.to_campaign_ref()).await?;

    let order = controller.start(template.map(TemplateId)).await?;
    println!(
        "Dispatch started for campaign `{}` (order {}, template {}).",
        target.campaign, order.id.0, order.template_id.0
    );
    Ok(())
}

/// Run the `zapcast restart` command.
pub async fn run_restart(
    console: &Console,
    target: &CampaignTarget,
    template: Option<String>,
) -> Result<(), ZapcastError> {
    console.load_session().await?;
    let controller = console.controller(target.to_campaign_ref()).await?;

    let order = controller.restart(template.map(TemplateId)).await?;
    println!(
        "Dispatch restarted for campaign `{}` (order {}, template {}).",
        target.campaign, order.id.0, order.template_id.0
    );
    Ok(())
}

/// Run the `zapcast stop` command.
pub async fn run_stop(console: &Console, target: &CampaignTarget) -> Result<(), ZapcastError> {
    let controller = console.controller(target.to_campaign_ref()).await?;

    let before = controller.state().await;
    let after = controller.stop().await?;

    if before == DispatchState::Open {
        println!("Dispatch stopped for campaign `{}`.", target.campaign);
    } else {
        println!(
            "No open dispatch for campaign `{}` (state: {after}); nothing to stop.",
            target.campaign
        );
    }
    Ok(())
}
