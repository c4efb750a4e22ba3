//! LiteBooks Core Library
//!
//! This crate provides the core functionality for LiteBooks, a catalog of
//! markdown-authored articles backed by a hosted book store with
//! email/password auth. When the remote store is unconfigured or
//! unreachable, the catalog degrades to a built-in sample set.
//!
//! # Architecture
//!
//! The synchronizer owns the in-memory collection and keeps it consistent
//! with the remote store by re-fetching after every mutation. The
//! collection is always either the full remote result set or the static
//! sample set; the display layer derives its subset through the pure
//! filter.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load_or_default();
//! let mut catalog = Catalog::new(RestStore::from_config(&config));
//!
//! // Fetch (seeds an empty remote collection from the samples)
//! catalog.refresh().await;
//!
//! // Display subset for an anonymous viewer searching "rust"
//! let visible = filter_catalog(catalog.books(), "rust", false);
//! ```
//!
//! # Modules
//!
//! - `catalog`: collection synchronization (main entry point)
//! - `models`: the book record, categories, drafts and insert payloads
//! - `samples`: the built-in fallback catalog
//! - `remote`: remote store trait and REST implementation
//! - `filter`: visibility and search filtering
//! - `config`: application configuration

pub mod catalog;
pub mod config;
pub mod filter;
pub mod models;
pub mod remote;
pub mod samples;

pub use catalog::{Catalog, CatalogError};
pub use config::Config;
pub use filter::filter_catalog;
pub use models::{Book, BookDraft, Category, NewBook, SAMPLE_ID_PREFIX};
pub use remote::{RemoteError, RemoteResult, RemoteStore, RestStore, Session, User};
