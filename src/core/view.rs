//! View filter: projects the entity store onto the current view.
//!
//! Filters only borrow the collections, so they can never mutate the store.
//! Applied in order:
//! 1. search: case-insensitive substring match on `name`
//! 2. view mode predicate (`starred`, `shared`, `recent`, `trash`)
//! 3. folder scope, `myDrive` only and only when not [`FolderScope::Flat`]
//!
//! Output keeps collection (insertion) order except in `recent`.

use crate::config::{RECENT_LIMIT, SUGGESTED_FOLDER_COUNT};
use crate::models::{Entity, File, Folder, Location, ViewMode};

use super::store::StorageUsage;

/// Containment applied to the `myDrive` listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FolderScope {
    /// List everything regardless of containing folder (default)
    #[default]
    Flat,
    /// Only direct children of the location
    Within(Location),
}

/// Entities visible in a view, borrowed from the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewSelection<'a> {
    pub files: Vec<&'a File>,
    pub folders: Vec<&'a Folder>,
}

/// Select the files and folders visible for a view mode and search query.
pub fn select_view<'a>(
    files: &'a [File],
    folders: &'a [Folder],
    mode: ViewMode,
    search_query: &str,
    scope: &FolderScope,
) -> ViewSelection<'a> {
    let mut files = filter_search(files, search_query);
    let mut folders = filter_search(folders, search_query);

    match mode {
        ViewMode::MyDrive => {
            if let FolderScope::Within(location) = scope {
                files.retain(|f| &f.location == location);
                folders.retain(|f| &f.location() == location);
            }
        }
        ViewMode::Starred => {
            files.retain(|f| f.is_starred());
            folders.retain(|f| f.is_starred());
        }
        ViewMode::Shared => {
            // Folders carry no shared flag
            files.retain(|f| f.shared);
        }
        ViewMode::Recent => {
            files = most_recent(files, RECENT_LIMIT);
        }
        ViewMode::Trash => {
            files.clear();
            folders.clear();
        }
    }

    ViewSelection { files, folders }
}

/// Keep entities whose name contains the query, ignoring case.
///
/// An empty query matches everything.
fn filter_search<'a, T: Entity>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name().to_lowercase().contains(&query))
        .collect()
}

/// Newest first by `date_modified`, truncated to `limit`.
///
/// Stable: files with equal timestamps keep their relative order.
fn most_recent(mut files: Vec<&File>, limit: usize) -> Vec<&File> {
    files.sort_by(|a, b| b.date_modified.cmp(&a.date_modified));
    files.truncate(limit);
    files
}

// =============================================================================
// Presentation Snapshot
// =============================================================================

/// Everything the presentation layer needs to render one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DriveView {
    pub mode: ViewMode,
    pub visible_files: Vec<File>,
    pub visible_folders: Vec<Folder>,
    pub storage_used: u64,
}

impl DriveView {
    pub fn new(selection: ViewSelection<'_>, mode: ViewMode, storage_used: u64) -> Self {
        Self {
            mode,
            visible_files: selection.files.into_iter().cloned().collect(),
            visible_folders: selection.folders.into_iter().cloned().collect(),
            storage_used,
        }
    }

    /// Heading for the view.
    pub fn title(&self) -> &'static str {
        self.mode.title()
    }

    /// Label above the file listing.
    pub fn section_label(&self) -> &'static str {
        match self.mode {
            ViewMode::Recent => "Files",
            _ => "Suggested files",
        }
    }

    /// Folders for the "Suggested folders" strip (`myDrive` only).
    pub fn suggested_folders(&self) -> &[Folder] {
        match self.mode {
            ViewMode::MyDrive => {
                let count = self.visible_folders.len().min(SUGGESTED_FOLDER_COUNT);
                &self.visible_folders[..count]
            }
            _ => &[],
        }
    }

    pub fn usage(&self) -> StorageUsage {
        StorageUsage::new(self.storage_used)
    }

    /// Check if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.visible_files.is_empty() && self.visible_folders.is_empty()
    }
}
