//! Text layout of the summary report

use crate::models::Snapshot;
use crate::utils::error::ReportError;

use super::aggregate::{posts_per_author, posts_per_category};
use super::tree::render_tree;

const BANNER: &str = "=========================";

/// Placeholder for info fields that are missing
pub const NOT_AVAILABLE: &str = "N/A";

/// Render the full report for a loaded snapshot
///
/// Lines are joined with `\n`; blocks that already end in a newline (the
/// category tree, the tag line) leave an empty line behind them.
pub fn render(snapshot: &Snapshot) -> Result<String, ReportError> {
    let mut lines: Vec<String> = Vec::new();

    lines.push(BANNER.to_string());
    lines.push("REPORT FROM EXTRACTED DATA".to_string());
    lines.push(format!("{BANNER}\n"));

    let info = snapshot.info.as_ref();
    let url = info
        .and_then(|i| i.url.as_deref())
        .unwrap_or(NOT_AVAILABLE);
    let name = info
        .and_then(|i| i.name.as_deref())
        .unwrap_or(NOT_AVAILABLE);
    lines.push("Target info (info.json):".to_string());
    lines.push(format!("🌐 url: {url}"));
    lines.push(format!("🏷️ name: {name}\n"));

    let by_category = posts_per_category(&snapshot.posts, &snapshot.categories);

    lines.push(format!(
        "📂 Number of Categories: {}",
        snapshot.categories.len()
    ));
    lines.push(format!("🏷️ Number of Tags: {}", snapshot.tags.len()));
    lines.push(format!(
        "📝 Number of posts (total): {}",
        snapshot.posts.len()
    ));
    lines.push("🗂️ Number of posts per category:".to_string());
    for (category, titles) in by_category.iter() {
        lines.push(format!("  - {category}: {}", titles.len()));
    }
    lines.push(format!("📄 Number of pages: {}\n", snapshot.pages.len()));

    lines.push("Categories:".to_string());
    lines.push(render_tree(&snapshot.categories)?);

    let tags: Vec<String> = snapshot
        .tags
        .iter()
        .map(|tag| format!("🏷️ {}", tag.name))
        .collect();
    lines.push("Tags:".to_string());
    lines.push(format!("  {}\n", tags.join(", ")));

    lines.push("Posts per category:".to_string());
    for (category, titles) in by_category.iter() {
        lines.push(format!("  📂 {category}:"));
        for title in titles {
            lines.push(format!("    - 📝 {title}"));
        }
    }
    lines.push(String::new());

    lines.push("Pages:".to_string());
    for page in &snapshot.pages {
        lines.push(format!("  📄 {}", page.title.text()));
    }
    lines.push(String::new());

    lines.push("Media:".to_string());
    for media in &snapshot.media {
        lines.push(format!("  🖼️ {} ({})", media.title.text(), media.url()));
    }
    lines.push(String::new());

    lines.push("Users list (users.json):".to_string());
    for author in posts_per_author(&snapshot.posts, &snapshot.users) {
        lines.push(format!("  👤 {} [{} posts]", author.name, author.posts));
    }
    lines.push(String::new());

    Ok(lines.join("\n"))
}
