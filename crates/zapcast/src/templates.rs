// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zapcast templates` command implementation.

use zapcast_core::error::ZapcastError;
use zapcast_core::gateway::CampaignGateway;

use crate::console::Console;

/// Run the `zapcast templates` command: list the message templates the
/// gateway knows about, for use with `start --template`.
pub async fn run_templates(console: &Console) -> Result<(), ZapcastError> {
    let templates = console.gateway.list_templates().await?;

    if templates.is_empty() {
        println!("No message templates found. Create one in the template editor first.");
        return Ok(());
    }

    for template in templates {
        println!("{}\t{}", template.id.0, template.name);
    }
    Ok(())
}
