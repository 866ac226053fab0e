//! Common test utilities

use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

/// Write `value` as `<dir>/<name>`
pub fn write_json(dir: &Path, name: &str, value: &Value) {
    std::fs::write(dir.join(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Temporary snapshot directory populated with the given documents
pub fn snapshot_dir(files: &[(&str, Value)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, value) in files {
        write_json(dir.path(), name, value);
    }
    dir
}

/// Read back `report.txt`
#[allow(dead_code)]
pub fn read_report(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("report.txt")).unwrap()
}
