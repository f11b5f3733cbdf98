//! Result list and detail view rendering

use catalog::{Event, EventDetail, SearchResults};
use favorites::FavoriteStore;
use owo_colors::OwoColorize;

const STAR: &str = "★";
const NO_STAR: &str = "☆";

/// One line of the result list (rows are numbered from 1)
pub fn result_row(row: usize, event: &Event, favorite: bool) -> String {
    let mut line = format!(
        "{:>3}. {} {}",
        row,
        if favorite { STAR } else { " " },
        event.display_title()
    );

    if let Some(date) = event.display_date() {
        line.push_str(" | ");
        line.push_str(&date);
    }
    if let Some(location) = event.display_location() {
        line.push_str(" | ");
        line.push_str(location);
    }
    line
}

/// Lines of the detail view
pub fn detail_lines(detail: &EventDetail) -> Vec<String> {
    vec![
        format!("{} {}", if detail.favorite { STAR } else { NO_STAR }, detail.title),
        format!("  When:  {}", detail.date.as_deref().unwrap_or("unknown")),
        format!("  Where: {}", detail.location.as_deref().unwrap_or("unknown")),
        format!("  Image: {}", detail.location_image.as_deref().unwrap_or("none")),
        format!("  ID:    {}", detail.key),
    ]
}

/// Favorite flag for an event; unreadable flags show as unmarked
pub fn is_favorite(store: &dyn FavoriteStore, event: &Event) -> bool {
    event
        .key()
        .map(|key| store.is_favorite(&key).unwrap_or_else(|e| {
            tracing::warn!(key = %key, error = %e, "failed to read favorite flag");
            false
        }))
        .unwrap_or(false)
}

/// Print the result list
pub fn print_results(query: &str, results: &SearchResults, store: &dyn FavoriteStore) {
    if results.is_empty() {
        println!("{} {}", "No events match".dimmed(), query.cyan());
        return;
    }

    println!(
        "{} {} {}",
        results.len().to_string().bold(),
        "events for".dimmed(),
        query.cyan()
    );
    for (index, event) in results.events.iter().enumerate() {
        let favorite = is_favorite(store, event);
        let line = result_row(index + 1, event, favorite);
        if favorite {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }
}

/// Print the detail view
pub fn print_detail(detail: &EventDetail) {
    let mut lines = detail_lines(detail).into_iter();
    if let Some(title) = lines.next() {
        println!("{}", title.bold());
    }
    for line in lines {
        println!("{}", line.dimmed());
    }
}
