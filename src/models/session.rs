//! Per-session UI state.

use super::{EntityId, LayoutMode, Location, ScopeMode, ViewMode};

/// UI state for one drive session.
///
/// Lives beside the entity store instead of inside it: the store is what gets
/// persisted, the session is discarded when the session ends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub view_mode: ViewMode,
    pub search_query: String,
    /// Folder new uploads and folders are placed in, `None` at the root
    pub current_folder: Option<EntityId>,
    pub layout: LayoutMode,
    pub scope_mode: ScopeMode,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of the current folder.
    pub fn location(&self) -> Location {
        Location::from(self.current_folder.clone())
    }
}
