//! Interactive search session
//!
//! Holds the search text, the latest result list and the trigger that turns
//! edits into searches. The event loop in `cmd::watch` feeds it stdin lines
//! and fetch results; everything here is synchronous so it can be driven by
//! a virtual clock in tests.

use anyhow::{Context, Result};
use catalog::{EventDetail, SearchQuery, SearchResults};
use favorites::FavoriteStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use trigger::CoalescingTrigger;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// New search text
    Edit(String),
    /// Search now (search button)
    Go,
    /// Drop results and any pending search (cancel button)
    Clear,
    /// Toggle the favorite flag of a 1-based row
    Favorite(usize),
    /// Open the detail view of a 1-based row
    Show(usize),
    Help,
    Quit,
}

/// Parse a stdin line; lines starting with `:` are commands
pub fn parse_input(line: &str) -> Result<Input> {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Ok(Input::Edit(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or("");
    let row = |arg: Option<&str>| -> Result<usize> {
        let arg = arg.context("Missing row number")?;
        let row: usize = arg
            .parse()
            .with_context(|| format!("Invalid row number: {}", arg))?;
        if row == 0 {
            anyhow::bail!("Rows are numbered from 1");
        }
        Ok(row)
    };

    match name {
        "go" | "g" => Ok(Input::Go),
        "clear" | "c" => Ok(Input::Clear),
        "fav" | "f" => Ok(Input::Favorite(row(parts.next())?)),
        "show" | "s" => Ok(Input::Show(row(parts.next())?)),
        "help" | "h" | "?" => Ok(Input::Help),
        "quit" | "q" => Ok(Input::Quit),
        other => anyhow::bail!("Unknown command ':{}' (try :help)", other),
    }
}

/// Drop trigger fires that were queued before an explicit search or clear
///
/// Returns how many were dropped.
pub fn discard_queued_fires(fires: &mut mpsc::UnboundedReceiver<()>) -> usize {
    let mut dropped = 0;
    while fires.try_recv().is_ok() {
        dropped += 1;
    }
    if dropped > 0 {
        debug!(dropped, "discarded queued trigger fires");
    }
    dropped
}

/// Search request handed to the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Increases with every request
    pub seq: u64,
    pub query: SearchQuery,
}

pub struct Session {
    text: String,
    results: Option<SearchResults>,
    trigger: CoalescingTrigger,
    favorites: Arc<dyn FavoriteStore>,
    next_seq: u64,
    /// Highest sequence number whose results were applied
    applied_seq: Option<u64>,
}

impl Session {
    pub fn new(trigger: CoalescingTrigger, favorites: Arc<dyn FavoriteStore>) -> Self {
        Self {
            text: String::new(),
            results: None,
            trigger,
            favorites,
            next_seq: 0,
            applied_seq: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn results(&self) -> Option<&SearchResults> {
        self.results.as_ref()
    }

    pub fn trigger(&self) -> &CoalescingTrigger {
        &self.trigger
    }

    pub fn favorites(&self) -> &dyn FavoriteStore {
        self.favorites.as_ref()
    }

    /// The search text changed
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.trigger.activate();
    }

    /// Start a search for the current text
    ///
    /// Called both when the trigger fires and for an explicit `:go`; any
    /// pending burst is withdrawn so it cannot search again right after.
    /// Blank text yields no ticket.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        self.trigger.cancel();

        let query = SearchQuery::new(&self.text);
        if query.is_empty() {
            debug!("blank search text, nothing to fetch");
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        Some(SearchTicket { seq, query })
    }

    /// Install fetched results unless a newer search already landed
    pub fn apply_results(&mut self, seq: u64, results: SearchResults) -> bool {
        if self.applied_seq.map_or(false, |applied| seq < applied) {
            debug!(seq, "dropping stale search results");
            return false;
        }
        self.applied_seq = Some(seq);
        self.results = Some(results);
        true
    }

    /// Drop results and any pending search
    pub fn clear(&mut self) {
        self.trigger.cancel();
        self.results = None;
    }

    /// Flip the favorite flag of a row; returns the event key and new state
    pub fn toggle_favorite(&self, row: usize) -> Result<(String, bool)> {
        let key = self.detail(row)?.key;
        let marked = self.favorites.toggle(&key)?;
        self.favorites.flush()?;
        Ok((key, marked))
    }

    /// Detail view data for a 1-based row
    pub fn detail(&self, row: usize) -> Result<EventDetail> {
        let results = self.results.as_ref().context("No results yet")?;
        let event = row
            .checked_sub(1)
            .and_then(|index| results.get(index))
            .with_context(|| format!("No row {} (results have {} rows)", row, results.len()))?;

        let key = event.key().context("Event has no id")?;
        let favorite = self.favorites.is_favorite(&key)?;
        EventDetail::from_event(event, favorite).context("Event has no id")
    }
}
