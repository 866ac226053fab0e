//! wpreport - WordPress REST API snapshot extractor and report generator
//!
//! Pulls categories, tags, posts, pages, media, users and site info from a
//! WordPress site into JSON snapshots, and renders a plain-text summary
//! report from such a snapshot directory.
//!
//! # Architecture
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - HTTP session wrapper and snapshot crawler
//! - [`models`] - WordPress entity types as found in the snapshots
//! - [`storage`] - Snapshot directory loading and writing
//! - [`report`] - Category tree, aggregation and report rendering
//! - [`utils`] - Common utilities and domain error types
//!
//! # Example
//!
//! ```no_run
//! use wpreport::report;
//! use wpreport::storage::SnapshotStore;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = SnapshotStore::new("./output/example.com");
//!     let path = report::generate(&store)?;
//!     println!("wrote {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod models;
pub mod report;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::session::RequestSession;
    pub use crate::crawler::Crawler;
    pub use crate::utils::error::{ReportError, SessionError};
    pub use crate::models::{Category, Collection, Post, Snapshot, User};
    pub use crate::storage::SnapshotStore;
}

// Direct re-exports for convenience
pub use models::{Category, Collection, Snapshot};
