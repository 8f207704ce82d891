//! File and folder records held by the drive.
//!
//! These are the exact shapes persisted under the `drive_files` and
//! `drive_folders` storage keys, so field names follow the stored JSON
//! (`camelCase`, MIME type under `type`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{DEFAULT_OWNER, ID_BYTES, ROOT_LABEL};
use crate::utils::{format_date, format_file_size};

// =============================================================================
// Entity Id
// =============================================================================

/// Unique identifier of a file or folder.
///
/// Generated ids are 128 random bits, hex-encoded. Ids read back from storage
/// are kept verbatim; legacy numeric ids are converted to their decimal text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh random id.
    pub fn generate() -> Result<Self, getrandom::Error> {
        let mut bytes = [0u8; ID_BYTES];
        getrandom::getrandom(&mut bytes)?;
        Ok(Self(hex::encode(bytes)))
    }

    /// Borrow the id as text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(u64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Integer(n) => Self(n.to_string()),
            RawId::Float(n) => Self(n.to_string()),
        })
    }
}

// =============================================================================
// Location
// =============================================================================

/// Containing folder of a file.
///
/// Serialized as the root label (`"My Drive"`) for the root, otherwise as the
/// folder id. The referenced folder is not required to exist.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Location {
    #[default]
    Root,
    Folder(EntityId),
}

impl Location {
    /// Check if this is the root location.
    pub fn is_root(&self) -> bool {
        matches!(self, Location::Root)
    }

    /// Get the containing folder id, `None` at the root.
    pub fn folder_id(&self) -> Option<&EntityId> {
        match self {
            Location::Root => None,
            Location::Folder(id) => Some(id),
        }
    }
}

impl From<Option<EntityId>> for Location {
    fn from(parent: Option<EntityId>) -> Self {
        match parent {
            Some(id) if id.as_str() != ROOT_LABEL => Location::Folder(id),
            _ => Location::Root,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Root => f.write_str(ROOT_LABEL),
            Location::Folder(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Location::Root => serializer.serialize_str(ROOT_LABEL),
            Location::Folder(id) => id.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<EntityId>::deserialize(deserializer).map(Location::from)
    }
}

// =============================================================================
// Entities
// =============================================================================

/// Which collection an entity lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    File,
    Folder,
}

impl EntityKind {
    /// Map the presentation layer's `isFolder` flag.
    pub fn from_is_folder(is_folder: bool) -> Self {
        if is_folder { Self::Folder } else { Self::File }
    }

    pub fn is_folder(self) -> bool {
        matches!(self, Self::Folder)
    }
}

/// Common accessors used by the view filter and listing rows.
pub trait Entity {
    fn id(&self) -> &EntityId;
    fn name(&self) -> &str;
    fn is_starred(&self) -> bool;

    /// Date shown in the listing: modified for files, created for folders.
    fn date(&self) -> &DateTime<Utc>;

    /// Listing date column (e.g., "2024-05-01").
    fn date_label(&self) -> String {
        format_date(self.date())
    }

    /// Listing size column; folders have no size.
    fn size_label(&self) -> String {
        "Folder".to_string()
    }
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

/// An uploaded file record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: EntityId,
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// MIME type reported by the browser, may be empty
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default)]
    pub location: Location,
    /// Set at upload, never touched afterwards
    pub date_modified: DateTime<Utc>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub shared: bool,
}

impl Entity for File {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_starred(&self) -> bool {
        self.starred
    }

    fn date(&self) -> &DateTime<Utc> {
        &self.date_modified
    }

    fn size_label(&self) -> String {
        format_file_size(self.size)
    }
}

/// A user-created folder record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: EntityId,
    pub name: String,
    /// Containing folder, `None` at the root
    #[serde(default)]
    pub parent: Option<EntityId>,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub starred: bool,
}

impl Folder {
    /// Containing location of this folder.
    pub fn location(&self) -> Location {
        Location::from(self.parent.clone())
    }
}

impl Entity for Folder {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_starred(&self) -> bool {
        self.starred
    }

    fn date(&self) -> &DateTime<Utc> {
        &self.date_created
    }
}

/// A file picked by the user for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_128_bit_hex() {
        let a = EntityId::generate().unwrap();
        let b = EntityId::generate().unwrap();
        assert_eq!(a.as_str().len(), ID_BYTES * 2);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_legacy_numeric_ids() {
        let id: EntityId = serde_json::from_str("1704067200000").unwrap();
        assert_eq!(id.as_str(), "1704067200000");

        let id: EntityId = serde_json::from_str("1704067200000.5").unwrap();
        assert_eq!(id.as_str(), "1704067200000.5");

        let id: EntityId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_location_serialization() {
        assert_eq!(serde_json::to_string(&Location::Root).unwrap(), "\"My Drive\"");
        assert_eq!(
            serde_json::to_string(&Location::Folder("f1".into())).unwrap(),
            "\"f1\""
        );

        let root: Location = serde_json::from_str("\"My Drive\"").unwrap();
        assert!(root.is_root());
        let root: Location = serde_json::from_str("null").unwrap();
        assert!(root.is_root());
        let folder: Location = serde_json::from_str("42").unwrap();
        assert_eq!(folder.folder_id().map(EntityId::as_str), Some("42"));
    }

    #[test]
    fn test_file_reads_legacy_blob() {
        let json = r#"{
            "id": 1714564800000.25,
            "name": "a.pdf",
            "size": 2048,
            "type": "application/pdf",
            "owner": "me",
            "location": "My Drive",
            "dateModified": "2024-05-01T12:00:00.000Z",
            "starred": false,
            "shared": true
        }"#;
        let file: File = serde_json::from_str(json).unwrap();
        assert_eq!(file.name, "a.pdf");
        assert_eq!(file.size, 2048);
        assert_eq!(file.mime_type, "application/pdf");
        assert!(file.location.is_root());
        assert!(file.shared);
        assert_eq!(file.date_modified.timestamp(), 1714564800);
    }

    #[test]
    fn test_file_defaults_for_missing_fields() {
        let json = r#"{"id":"x","name":"notes.txt","dateModified":"2024-05-01T12:00:00Z"}"#;
        let file: File = serde_json::from_str(json).unwrap();
        assert_eq!(file.owner, DEFAULT_OWNER);
        assert_eq!(file.size, 0);
        assert_eq!(file.mime_type, "");
        assert!(!file.starred);
        assert!(!file.shared);
        assert!(file.location.is_root());
    }

    #[test]
    fn test_folder_field_names() {
        let folder = Folder {
            id: "f1".into(),
            name: "Reports".to_string(),
            parent: None,
            date_created: DateTime::from_timestamp(0, 0).unwrap(),
            starred: false,
        };
        let value = serde_json::to_value(&folder).unwrap();
        assert!(value.get("dateCreated").is_some());
        assert!(value["parent"].is_null());
        assert!(folder.location().is_root());
    }

    #[test]
    fn test_listing_labels() {
        let json = r#"{"id":"x","name":"a.pdf","size":1536,"dateModified":"2024-05-01T12:00:00Z"}"#;
        let file: File = serde_json::from_str(json).unwrap();
        assert_eq!(file.date_label(), "2024-05-01");
        assert_eq!(file.size_label(), "1.5 KB");

        let folder = Folder {
            id: "f1".into(),
            name: "Reports".to_string(),
            parent: None,
            date_created: DateTime::from_timestamp(1704067200, 0).unwrap(),
            starred: false,
        };
        assert_eq!(folder.date_label(), "2024-01-01");
        assert_eq!(folder.size_label(), "Folder");
    }

    #[test]
    fn test_entity_kind_from_flag() {
        assert_eq!(EntityKind::from_is_folder(true), EntityKind::Folder);
        assert_eq!(EntityKind::from_is_folder(false), EntityKind::File);
        assert!(EntityKind::Folder.is_folder());
    }
}
