// Public modules
pub mod config;
pub mod error;
pub mod output;
pub mod rewrite;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{FileFailure, FileReport, RunSummary};
pub use rewrite::{rewrite, rewrite_file, rewrite_source, RewriteOptions, RewriteOutcome};
