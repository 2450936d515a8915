//! Document load system, task polling, and "new document" handling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::render::MapSurface;
use crate::session::AnnotationSession;

use super::codec;
use super::messages::{LoadDocumentRequest, NewDocumentRequest};
use super::resources::{AsyncDocOperation, CurrentDocumentFile, DocLoadError, LoadDocumentTask};
use super::results::LoadResult;

/// Starts an async load operation: file read and parse off the main
/// schedule. A malformed document surfaces as an error result and leaves
/// the session untouched.
pub fn load_document_system(
    mut commands: Commands,
    mut events: MessageReader<LoadDocumentRequest>,
    mut async_op: ResMut<AsyncDocOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Load operation already in progress");
            continue;
        }

        let path = event.path.clone();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();

        async_op.is_loading = true;
        async_op.operation_description = Some(format!("Loading {}...", file_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let json = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    return LoadResult {
                        path,
                        document: None,
                        error: Some(format!("Failed to read file: {}", e)),
                    };
                }
            };

            match codec::decode(&json) {
                Ok(document) => LoadResult {
                    path,
                    document: Some(document),
                    error: None,
                },
                Err(e) => LoadResult {
                    path,
                    document: None,
                    error: Some(e.to_string()),
                },
            }
        });

        commands.spawn(LoadDocumentTask(task));
    }
}

/// Polls load tasks and applies completed documents to the session in one
/// synchronous step: clear, reset history, repopulate.
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadDocumentTask)>,
    mut async_op: ResMut<AsyncDocOperation>,
    mut load_error: ResMut<DocLoadError>,
    mut session: ResMut<AnnotationSession>,
    mut surface: ResMut<MapSurface>,
    mut current_file: ResMut<CurrentDocumentFile>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_loading = false;
            async_op.operation_description = None;

            if let Some(error) = result.error {
                // Abort: prior session state stays as it was
                error!("{}", error);
                load_error.message = Some(error);
                commands.entity(entity).despawn();
                continue;
            }

            let Some(document) = result.document else {
                commands.entity(entity).despawn();
                continue;
            };

            if document.skipped > 0 {
                warn!("Skipped {} unrecognized feature(s)", document.skipped);
            }

            codec::apply(&mut session, &mut *surface, document);
            load_error.message = None;
            current_file.path = Some(result.path.clone());
            info!("Document loaded from {:?}", result.path);

            commands.entity(entity).despawn();
        }
    }
}

/// Clears the session for a fresh, file-less document.
pub fn new_document_system(
    mut events: MessageReader<NewDocumentRequest>,
    mut session: ResMut<AnnotationSession>,
    mut surface: ResMut<MapSurface>,
    mut current_file: ResMut<CurrentDocumentFile>,
) {
    for _ in events.read() {
        codec::apply(&mut session, &mut *surface, codec::ParsedDocument::default());
        current_file.path = None;
        info!("Created new document");
    }
}
