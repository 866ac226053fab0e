//! Indented category tree

use std::collections::HashSet;

use crate::models::{Category, ROOT_CATEGORY};
use crate::utils::error::ReportError;

/// Indentation added per tree level
pub const INDENT: &str = "    ";

/// Render the category forest depth-first, one `📂 name` line per category
///
/// Children keep their input order. Categories whose parent never appears
/// as an id are not reachable from the root and are left out.
pub fn render_tree(categories: &[Category]) -> Result<String, ReportError> {
    let mut out = String::new();
    let mut path = HashSet::from([ROOT_CATEGORY]);
    render_level(categories, ROOT_CATEGORY, "", &mut path, &mut out)?;
    Ok(out)
}

fn render_level(
    categories: &[Category],
    parent: u64,
    prefix: &str,
    path: &mut HashSet<u64>,
    out: &mut String,
) -> Result<(), ReportError> {
    for cat in categories.iter().filter(|c| c.parent == parent) {
        out.push_str(prefix);
        out.push_str("📂 ");
        out.push_str(&cat.name);
        out.push('\n');

        // An id already on the path would expand the same children forever.
        if !path.insert(cat.id) {
            return Err(ReportError::CategoryCycleDetected { id: cat.id });
        }
        let child_prefix = format!("{prefix}{INDENT}");
        render_level(categories, cat.id, &child_prefix, path, out)?;
        path.remove(&cat.id);
    }
    Ok(())
}
