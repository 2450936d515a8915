//! Command history stacks for tracking undo/redo state.

use super::commands::MapCommand;
use super::MAX_HISTORY_SIZE;

/// The undo and redo stacks. Every recorded command lives on exactly one of
/// them; a new user-initiated mutation wipes the redo stack so history never
/// branches.
#[derive(Default)]
pub struct CommandHistory {
    /// Commands that can be undone (most recent last)
    undo_stack: Vec<MapCommand>,
    /// Commands that can be redone (most recent last)
    redo_stack: Vec<MapCommand>,
}

impl CommandHistory {
    /// Record a new user mutation. Never called during replay.
    pub fn record(&mut self, command: MapCommand) {
        // A new action invalidates everything that was undone
        self.redo_stack.clear();

        self.undo_stack.push(command);

        // Trim history if it exceeds max size
        while self.undo_stack.len() > MAX_HISTORY_SIZE {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the last command for undo
    pub fn pop_undo(&mut self) -> Option<MapCommand> {
        self.undo_stack.pop()
    }

    /// Pop the last undone command for redo
    pub fn pop_redo(&mut self) -> Option<MapCommand> {
        self.redo_stack.pop()
    }

    /// Park a just-undone command on the redo stack
    pub fn push_redo(&mut self, command: MapCommand) {
        self.redo_stack.push(command);
    }

    /// Return a just-redone command to the undo stack
    pub fn push_undo(&mut self, command: MapCommand) {
        self.undo_stack.push(command);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Empty both stacks. Called exactly when a document load occurs.
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
