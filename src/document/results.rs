//! Result types for async document operations.

use std::path::PathBuf;

use super::codec::ParsedDocument;

/// Result of an async save operation
pub struct SaveResult {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

/// Result of an async load operation: file read and parsed off the main
/// schedule, applied synchronously by the poll system.
pub struct LoadResult {
    pub path: PathBuf,
    pub document: Option<ParsedDocument>,
    pub error: Option<String>,
}
