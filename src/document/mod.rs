//! Document persistence: the codec between the annotation store and the
//! GeoJSON-style document format, plus async save/load plumbing.
//!
//! ## Module Structure
//!
//! - [`format`] - serde types for the persisted feature collection
//! - [`codec`] - encode/decode/apply between store and document
//! - [`messages`] - save/load/new request messages
//! - [`resources`] - operation state, errors, current file
//! - [`save`] / [`load`] - async I/O systems and task polling

pub mod codec;
pub mod format;

mod load;
mod messages;
mod resources;
mod results;
mod save;


pub use codec::MalformedDocumentError;
pub use messages::{LoadDocumentRequest, NewDocumentRequest, SaveDocumentRequest};
pub use resources::{AsyncDocOperation, CurrentDocumentFile, DocLoadError, DocSaveError};

use bevy::prelude::*;

pub struct DocumentPlugin;

impl Plugin for DocumentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DocLoadError>()
            .init_resource::<DocSaveError>()
            .init_resource::<AsyncDocOperation>()
            .init_resource::<CurrentDocumentFile>()
            .add_message::<SaveDocumentRequest>()
            .add_message::<LoadDocumentRequest>()
            .add_message::<NewDocumentRequest>()
            .add_systems(
                Update,
                (
                    save::save_document_system.run_if(on_message::<SaveDocumentRequest>),
                    load::load_document_system.run_if(on_message::<LoadDocumentRequest>),
                    load::new_document_system.run_if(on_message::<NewDocumentRequest>),
                    save::poll_save_tasks,
                    load::poll_load_tasks,
                ),
            );
    }
}
