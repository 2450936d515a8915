//! Resource types for document persistence state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use super::results::{LoadResult, SaveResult};

/// Load failure shown to the user; cleared on the next successful load.
#[derive(Resource, Default)]
pub struct DocLoadError {
    pub message: Option<String>,
}

/// Save failure shown to the user.
#[derive(Resource, Default)]
pub struct DocSaveError {
    pub message: Option<String>,
}

/// Tracks in-flight file I/O so a second operation cannot start while one
/// is pending.
#[derive(Resource, Default)]
pub struct AsyncDocOperation {
    pub is_saving: bool,
    pub is_loading: bool,
    pub operation_description: Option<String>,
}

impl AsyncDocOperation {
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_loading
    }
}

/// Component for an in-flight save task
#[derive(Component)]
pub struct SaveDocumentTask(pub Task<SaveResult>);

/// Component for an in-flight load task
#[derive(Component)]
pub struct LoadDocumentTask(pub Task<LoadResult>);

/// The file path of the currently open document, if it has one.
#[derive(Resource, Default)]
pub struct CurrentDocumentFile {
    pub path: Option<PathBuf>,
}
