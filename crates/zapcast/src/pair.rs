// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zapcast pair` and `zapcast unpair` command implementations.
//!
//! Pairing requests a scannable code, prints it, then watches the
//! connection until the device links, the deadline passes, or the
//! operator presses Ctrl-C. Cancelling only stops the watch; the code
//! stays valid on the device side until it expires.

use std::io::IsTerminal;

use zapcast_core::error::ZapcastError;
use zapcast_core::gateway::CampaignGateway;
use zapcast_pairing::PairingEvent;

use crate::console::Console;

/// Run the `zapcast pair` command.
pub async fn run_pair(console: &Console, plain: bool) -> Result<(), ZapcastError> {
    let attempt = console.pairing.request_pairing(&console.connection_id).await?;

    let use_color = !plain && std::io::stdout().is_terminal();
    print_code(&attempt.code.code, use_color);
    println!(
        "  Waiting for the device to link (up to {}s, checking every {}s)...",
        attempt.deadline.as_secs(),
        attempt.poll_interval.as_secs()
    );
    println!("  Press Ctrl-C to stop waiting.");
    println!();

    let mut events = console.pairing.start_polling(&attempt).await;

    tokio::select! {
        event = events.recv() => match event {
            Some(PairingEvent::Linked(conn)) => {
                console.session.set_connection(conn.clone()).await;
                if use_color {
                    use colored::Colorize;
                    println!("  {} Device linked ({})", "✓".green(), conn.name);
                } else {
                    println!("  [OK] Device linked ({})", conn.name);
                }
                Ok(())
            }
            Some(PairingEvent::TimedOut) | None => Err(ZapcastError::PairingTimeout),
        },
        _ = tokio::signal::ctrl_c() => {
            console.pairing.cancel_polling(&console.connection_id).await;
            println!("  Stopped waiting. The code may still be scanned until it expires;");
            println!("  run `zapcast status` to check, or `zapcast pair` for a fresh code.");
            Ok(())
        }
    }
}

/// Run the `zapcast unpair` command: delete the connection so a new
/// device can be linked.
pub async fn run_unpair(console: &Console) -> Result<(), ZapcastError> {
    console.gateway.delete_connection(&console.connection_id).await?;
    console.session.invalidate().await;
    println!("Connection `{}` removed.", console.connection_id.0);
    Ok(())
}

fn print_code(code: &str, use_color: bool) {
    println!();
    println!("  Scan this pairing code from the device:");
    println!();
    if use_color {
        use colored::Colorize;
        println!("    {}", code.bold().cyan());
    } else {
        println!("    {code}");
    }
    println!();
}
