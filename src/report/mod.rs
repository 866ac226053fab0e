//! Summary report over a snapshot directory
//!
//! Loading, aggregation and rendering all run synchronously on data that is
//! already on disk; nothing here touches the network.
//!
//! - [`tree`] - indented category forest
//! - [`aggregate`] - posts per category and per author
//! - [`render`] - fixed-order text layout

pub mod aggregate;
pub mod render;
pub mod tree;

use std::path::PathBuf;

use crate::storage::SnapshotStore;
use crate::utils::error::ReportError;

pub use aggregate::{posts_per_author, posts_per_category, AuthorCount, PostsByCategory};
pub use render::render;
pub use tree::render_tree;

/// Load the snapshot in `store`, render it and write `report.txt`
pub fn generate(store: &SnapshotStore) -> Result<PathBuf, ReportError> {
    let snapshot = store.load_snapshot()?;

    tracing::info!(
        dir = %store.dir().display(),
        categories = snapshot.categories.len(),
        tags = snapshot.tags.len(),
        posts = snapshot.posts.len(),
        pages = snapshot.pages.len(),
        media = snapshot.media.len(),
        users = snapshot.users.len(),
        "Rendering report"
    );

    let text = render(&snapshot)?;
    store.write_report(&text)
}
