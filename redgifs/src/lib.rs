//! # redgifs - Tag resolution for the RedGifs API
//!
//! This crate resolves what a user types into the canonical tag names the
//! RedGifs API understands, and builds the search requests that consume them.
//!
//! ## Overview
//!
//! - [`Tags`]: resolver owning a dictionary of lower-cased keys to canonical
//!   tags, loaded lazily from a bundled snapshot
//! - exact, case-insensitive lookup first; fuzzy matching on a title-cased
//!   query as fallback
//! - random sampling of known tags
//! - [`SharedTags`]: the same resolver for async hosts, loading the snapshot
//!   once on the blocking pool
//! - [`GifSearch`]: `GET /v2/gifs/search` URL built from the best match
//!
//! ## Module layout
//!
//! ```text
//! redgifs/
//! ├── src/
//! │   ├── lib.rs          # This file
//! │   ├── tags.rs         # Tag resolver
//! │   ├── fuzzy.rs        # Similarity ratio and title casing
//! │   ├── snapshot.rs     # Snapshot sources, refresh helpers
//! │   ├── shared.rs       # Async wrapper
//! │   ├── models.rs       # TagRecord, Order, MediaType
//! │   ├── routes.rs       # Search route
//! │   ├── urls.rs         # Media URL helpers
//! │   ├── config.rs       # YAML configuration
//! │   ├── error.rs        # Error handling
//! │   ├── tags.json       # Bundled snapshot
//! │   └── redgifs.yaml    # Default configuration
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use redgifs::{GifSearch, Order, Tags, API_BASE_URL};
//!
//! # fn main() -> redgifs::Result<()> {
//! let mut tags = Tags::new();
//!
//! // Exact keys are case-insensitive
//! assert_eq!(tags.search("ASS")?, vec!["Ass"]);
//!
//! // Misspellings fall back to the closest canonical tags
//! assert_eq!(tags.search("ava adams")?[0], "Ava Addams");
//!
//! let url = GifSearch::resolve(&mut tags, "hige tits")?
//!     .order(Order::Top)
//!     .to_url(API_BASE_URL)?;
//! println!("GET {}", url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! ```rust
//! use redgifs::{RedgifsError, Tags};
//!
//! let mut tags = Tags::new();
//! match tags.search("qwxzvbn") {
//!     Ok(found) => println!("{:?}", found),
//!     Err(RedgifsError::InvalidTag(tag)) => println!("nothing like {}", tag),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

pub mod config;
pub mod error;
pub mod fuzzy;
pub mod models;
pub mod routes;
pub mod shared;
pub mod snapshot;
pub mod tags;
pub mod urls;

pub use config::Config;
pub use error::{RedgifsError, Result};
pub use fuzzy::MatchOptions;
pub use models::{MediaType, Order, TagList, TagRecord};
pub use routes::{API_BASE_URL, GifSearch};
pub use shared::SharedTags;
pub use snapshot::{EmbeddedSnapshot, FileSnapshot, SnapshotSource, TagMapping};
pub use tags::Tags;
