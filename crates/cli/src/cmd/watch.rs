//! Interactive search-as-you-type session
//!
//! Every stdin line replaces the search text and activates the trigger.
//! When the trigger fires, the current text is searched in the background
//! and the result list is reprinted once the fetch completes. Fetch errors
//! are reported and the session carries on.

use anyhow::{Context, Result};
use catalog::{EventSource, SearchResults};
use cli_lib::render;
use cli_lib::session::{discard_queued_fires, parse_input, Input, SearchTicket, Session};
use cli_lib::system_config::SystemConfig;
use cli_lib::util;
use owo_colors::OwoColorize;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use trigger::CoalescingTrigger;

/// Completed fetch
struct Fetched {
    seq: u64,
    query: String,
    outcome: catalog::Result<SearchResults>,
}

pub async fn run(config: &SystemConfig, fixture: Option<&Path>, ephemeral: bool) -> Result<()> {
    let source = util::open_source(config, fixture)?;
    let favorites = util::open_favorites(config, ephemeral)?;

    let (fire_tx, mut fire_rx) = mpsc::unbounded_channel::<()>();
    let trigger = CoalescingTrigger::with_tokio(config.trigger_config()?, move || {
        // Receiver gone means the session is shutting down
        let _ = fire_tx.send(());
    })
    .context("Failed to create search trigger")?;

    let mut session = Session::new(trigger, favorites);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Fetched>();
    let mut in_flight = 0usize;

    print_help();
    info!(
        short_ms = config.search.short_delay_ms,
        long_ms = config.search.long_delay_ms,
        "watch session started"
    );

    let mut lines = spawn_stdin_reader();

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    break;
                };
                let line = line.context("Failed to read input")?;

                match parse_input(&line) {
                    Ok(Input::Edit(text)) => session.edit(text),
                    Ok(Input::Go) => {
                        discard_queued_fires(&mut fire_rx);
                        if let Some(ticket) = session.begin_search() {
                            spawn_search(source.clone(), ticket, done_tx.clone());
                            in_flight += 1;
                        }
                    }
                    Ok(Input::Clear) => {
                        session.clear();
                        discard_queued_fires(&mut fire_rx);
                        println!("{}", "Results cleared".dimmed());
                    }
                    Ok(Input::Favorite(row)) => match session.toggle_favorite(row) {
                        Ok((key, marked)) => {
                            let verb = if marked { "Marked" } else { "Unmarked" };
                            println!("{} {} {}", "✓".green(), verb, key.cyan());
                        }
                        Err(e) => println!("{} {:#}", "✗".red(), e),
                    },
                    Ok(Input::Show(row)) => match session.detail(row) {
                        Ok(detail) => render::print_detail(&detail),
                        Err(e) => println!("{} {:#}", "✗".red(), e),
                    },
                    Ok(Input::Help) => print_help(),
                    Ok(Input::Quit) => break,
                    Err(e) => println!("{} {:#}", "✗".red(), e),
                }
            }
            Some(()) = fire_rx.recv() => {
                if let Some(ticket) = session.begin_search() {
                    spawn_search(source.clone(), ticket, done_tx.clone());
                    in_flight += 1;
                }
            }
            Some(fetched) = done_rx.recv() => {
                in_flight = in_flight.saturating_sub(1);
                show_fetched(&mut session, fetched);
            }
        }
    }

    // No more edits: withdraw any pending burst, then let started searches land
    session.trigger().cancel();
    while in_flight > 0 {
        let Some(fetched) = done_rx.recv().await else {
            break;
        };
        in_flight -= 1;
        show_fetched(&mut session, fetched);
    }

    let stats = session.trigger().stats();
    info!(
        activations = stats.activations,
        fires = stats.fires,
        ceiling_fires = stats.ceiling_fires,
        "watch session ended"
    );
    Ok(())
}

/// Read stdin on a plain thread so a blocked read never holds up shutdown
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn spawn_search(source: Arc<dyn EventSource>, ticket: SearchTicket, done: mpsc::UnboundedSender<Fetched>) {
    tokio::spawn(async move {
        let outcome = source.search(&ticket.query).await;
        let _ = done.send(Fetched {
            seq: ticket.seq,
            query: ticket.query.text().to_string(),
            outcome,
        });
    });
}

fn show_fetched(session: &mut Session, fetched: Fetched) {
    match fetched.outcome {
        Ok(results) => {
            if session.apply_results(fetched.seq, results) {
                if let Some(results) = session.results() {
                    render::print_results(&fetched.query, results, session.favorites());
                }
            }
        }
        Err(e) => {
            warn!(query = %fetched.query, error = %e, "search failed");
            println!("{} Search for '{}' failed: {}", "✗".red(), fetched.query, e);
        }
    }
}

fn print_help() {
    println!("{}", "Type to search. Commands:".bold());
    println!("  {}       search now", ":go".cyan());
    println!("  {}    clear results", ":clear".cyan());
    println!("  {}    toggle favorite on row N", ":fav N".cyan());
    println!("  {}   show details of row N", ":show N".cyan());
    println!("  {}     quit", ":quit".cyan());
}
