//! View-related data types for the drive UI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Active filter lens over the drive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Everything (default)
    #[default]
    MyDrive,
    /// Starred files and folders
    Starred,
    /// Files flagged as shared
    Shared,
    /// Most recently modified files
    Recent,
    /// Deleted items (always empty, deletion is permanent)
    Trash,
}

impl ViewMode {
    /// All view modes in sidebar order.
    pub const ALL: [ViewMode; 5] = [
        ViewMode::MyDrive,
        ViewMode::Shared,
        ViewMode::Recent,
        ViewMode::Starred,
        ViewMode::Trash,
    ];

    /// Identifier used by the presentation layer.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::MyDrive => "myDrive",
            ViewMode::Starred => "starred",
            ViewMode::Shared => "shared",
            ViewMode::Recent => "recent",
            ViewMode::Trash => "trash",
        }
    }

    /// Heading shown above the listing.
    pub fn title(self) -> &'static str {
        match self {
            ViewMode::MyDrive => "My Drive",
            ViewMode::Starred => "Starred",
            ViewMode::Shared => "Shared with me",
            ViewMode::Recent => "Recent",
            ViewMode::Trash => "Trash",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown view mode.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown view mode '{0}'")]
pub struct UnknownViewMode(pub String);

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownViewMode(s.to_string()))
    }
}

/// Layout of the listing (list or grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// List view (default)
    #[default]
    List,
    /// Grid view
    Grid,
}

impl LayoutMode {
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::List => LayoutMode::Grid,
            LayoutMode::Grid => LayoutMode::List,
        }
    }
}

/// Whether `myDrive` lists everything or only the current folder's children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScopeMode {
    /// Every entity regardless of containment (default)
    #[default]
    Flat,
    /// Direct children of the current folder
    Hierarchical,
}
