//! Event catalog for Marquee
//!
//! This crate provides:
//! - The event data model decoded from the search API
//! - Date parsing with the API's three timestamp shapes
//! - Query URL construction
//! - `EventSource` implementations (HTTP and local fixture file)

pub mod error;
pub mod model;
pub mod query;
pub mod source;

// Re-exports
pub use error::CatalogError;
pub use model::{decode_results, parse_event_datetime, Event, EventDetail, Performer, SearchResults, Venue};
pub use query::SearchQuery;
pub use source::{EventSource, FixtureEventSource, HttpEventSource, SourceConfig};

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
