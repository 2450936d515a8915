//! Document save system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::session::AnnotationSession;

use super::codec;
use super::messages::SaveDocumentRequest;
use super::resources::{AsyncDocOperation, CurrentDocumentFile, DocSaveError, SaveDocumentTask};
use super::results::SaveResult;

/// Starts an async save operation. The store is encoded synchronously (it
/// cannot change mid-encode on a single-threaded schedule); serialization
/// and the file write happen on the I/O task pool.
pub fn save_document_system(
    mut commands: Commands,
    mut events: MessageReader<SaveDocumentRequest>,
    session: Res<AnnotationSession>,
    mut async_op: ResMut<AsyncDocOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Save operation already in progress");
            continue;
        }

        let collection = codec::encode(&session.store, chrono::Utc::now().to_rfc3339());
        let path = event.path.clone();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();

        async_op.is_saving = true;
        async_op.operation_description = Some(format!("Saving {}...", file_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            match serde_json::to_string_pretty(&collection) {
                Ok(json) => {
                    if let Err(e) = std::fs::write(&path, json) {
                        SaveResult {
                            path,
                            success: false,
                            error: Some(format!("Failed to write file: {}", e)),
                        }
                    } else {
                        SaveResult {
                            path,
                            success: true,
                            error: None,
                        }
                    }
                }
                Err(e) => SaveResult {
                    path,
                    success: false,
                    error: Some(format!("Failed to serialize document: {}", e)),
                },
            }
        });

        commands.spawn(SaveDocumentTask(task));
    }
}

/// Polls save tasks and handles completion.
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveDocumentTask)>,
    mut async_op: ResMut<AsyncDocOperation>,
    mut current_file: ResMut<CurrentDocumentFile>,
    mut save_error: ResMut<DocSaveError>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_saving = false;
            async_op.operation_description = None;

            if result.success {
                info!("Document saved to {:?}", result.path);
                save_error.message = None;
                current_file.path = Some(result.path);
            } else if let Some(error) = result.error {
                error!("{}", error);
                save_error.message = Some(error);
            }

            commands.entity(entity).despawn();
        }
    }
}
