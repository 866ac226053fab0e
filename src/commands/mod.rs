pub mod extract;
pub mod report;

// Re-export command functions for convenience
pub use extract::{extract, ExtractParams};
pub use report::report;
