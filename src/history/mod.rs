//! Undo/Redo command log for annotation mutations.
//!
//! Every direct user mutation is recorded as an invertible [`MapCommand`];
//! undo applies the inverse against the store, redo re-applies it forward.
//! Replay never records, so the log can't feed on itself.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last action
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone action
//!
//! ## Module Structure
//!
//! - [`commands`] - MapCommand enum defining all reversible mutations
//! - [`command_history`] - CommandHistory stacks
//! - [`execute`] - forward/inverse application against the store
//! - [`systems`] - Bevy systems for the keyboard shortcuts

mod command_history;
mod commands;
mod execute;
mod systems;

#[cfg(test)]
mod tests;

pub use command_history::CommandHistory;
pub use commands::MapCommand;
pub use execute::{redo, undo};
pub use systems::handle_undo_redo_keys;

/// Maximum number of commands to keep in history
pub(crate) const MAX_HISTORY_SIZE: usize = 100;
