//! Message types for document persistence operations.

use bevy::prelude::*;
use std::path::PathBuf;

#[derive(Message)]
pub struct SaveDocumentRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct LoadDocumentRequest {
    pub path: PathBuf,
}

/// Start over with an empty annotation set.
#[derive(Message)]
pub struct NewDocumentRequest;
