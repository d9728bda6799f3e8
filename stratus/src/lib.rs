//! stratus: client for CloudSearch-style managed search domains.
//!
//! The interesting part is the query core: [`FilterExpression`] models a
//! boolean combination of field constraints and compiles into the service's
//! parenthesized structured-query grammar. [`SearchClient`] wraps the
//! search and batch-document HTTP endpoints around it.
//!
//! ```no_run
//! use stratus::{Config, FilterExpression, SearchClient, SearchOptions};
//!
//! # async fn run() -> stratus::Result<()> {
//! let client = SearchClient::new(Config::new("products-abc123"))?;
//! let filter = FilterExpression::new().and(
//!     FilterExpression::new()
//!         .field("type", "donut")
//!         .field("rating", 3i64..=5),
//! );
//! let results = client
//!     .search("fritters", &SearchOptions::new().filter(filter))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod documents;
pub mod error;
pub mod query;
pub mod results;

pub use client::{SearchClient, SearchOptions};
pub use config::Config;
pub use documents::{DocValue, Document};
pub use error::{Error, Result};
pub use query::{FieldConstraint, FieldValue, FilterExpression, Rank, SortDirection};
pub use results::SearchResults;
