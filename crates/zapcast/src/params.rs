// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zapcast params` command implementation.

use zapcast_core::error::ZapcastError;

use crate::console::Console;

/// Run the `zapcast params` command. With no flags, shows the current
/// values; with both flags, validates and writes new ones.
pub async fn run_params(
    console: &Console,
    max_per_run: Option<u32>,
    delay_seconds: Option<u32>,
) -> Result<(), ZapcastError> {
    match (max_per_run, delay_seconds) {
        (None, None) => {
            let params = console.params.get().await?;
            println!("max_per_run   = {}", params.max_per_run);
            println!("delay_seconds = {}", params.delay_seconds);
            Ok(())
        }
        (Some(max), Some(delay)) => {
            console.params.set(max, delay).await?;
            println!("Dispatch parameters updated: max {max} per run, {delay}s between sends.");
            Ok(())
        }
        _ => Err(ZapcastError::ParametersInvalid(
            "set both --max-per-run and --delay-seconds together".into(),
        )),
    }
}
