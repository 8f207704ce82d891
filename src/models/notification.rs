//! User-facing notifications emitted by drive actions.

use std::fmt;

/// A message for the presentation layer to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// A file download was requested
    Downloading { name: String },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downloading { name } => write!(f, "Downloading: {}", name),
        }
    }
}
