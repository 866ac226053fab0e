use anyhow::{Context, Result};
use std::path::PathBuf;

use wpreport::report;
use wpreport::storage::SnapshotStore;

pub fn report(output_dir: PathBuf) -> Result<()> {
    let store = SnapshotStore::new(output_dir);

    let path = report::generate(&store)
        .with_context(|| format!("Failed to build report in {}", store.dir().display()))?;

    println!("Report written to {}", path.display());
    Ok(())
}
