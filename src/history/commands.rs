//! The reversible mutation commands.

use crate::session::{HexagonEntity, LineEntity, MarkerEntity};

/// A recorded, invertible description of one user mutation. Each variant
/// carries the full entity payload needed to apply and invert it, so undo
/// restores the original styling regardless of the current UI settings.
#[derive(Clone, Debug, PartialEq)]
pub enum MapCommand {
    /// A hexagon was placed on a previously empty cell
    AddHexagon { hexagon: HexagonEntity },
    /// A hexagon was toggled off its cell
    RemoveHexagon { hexagon: HexagonEntity },
    /// A named marker was confirmed
    AddMarker { marker: MarkerEntity },
    /// A marker was deleted
    RemoveMarker { marker: MarkerEntity },
    /// A freehand stroke was finalized.
    ///
    /// Its inverse pops the most recently appended line rather than this
    /// specific one. Under LIFO undo discipline the two coincide; if lines
    /// ever gain delete-by-click the command needs a stable line identity.
    DrawLine { line: LineEntity },
}
