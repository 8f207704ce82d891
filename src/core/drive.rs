//! Drive: mutation engine and session state container.
//!
//! Every state-changing operation follows the same protocol:
//! compute the next collection from the current one, assign it to the
//! [`EntityStore`], then persist and return the persistence result.
//! Operations that change nothing (absent id, empty batch, cancelled
//! confirmation) skip persistence.
//!
//! # Example
//!
//! ```
//! use webdrive::{Drive, FileUpload, MemoryStorage, ViewMode};
//!
//! # tokio_test_block_on(async {
//! let mut drive = Drive::new(MemoryStorage::new());
//! drive.load().await;
//!
//! drive.create_folder("Reports").await?;
//! let ids = drive
//!     .upload_files([FileUpload::new("a.pdf", 2048, "application/pdf")])
//!     .await?;
//! drive.toggle_star(&ids[0], webdrive::EntityKind::File).await?;
//!
//! drive.set_view_mode(ViewMode::Starred);
//! let view = drive.view();
//! assert_eq!(view.visible_files.len(), 1);
//! assert!(view.visible_folders.is_empty());
//! assert_eq!(view.storage_used, 2048);
//! # Ok::<(), webdrive::DriveError>(())
//! # }).unwrap();
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use chrono::{DateTime, Utc};

use super::error::DriveError;
use super::storage::StorageAdapter;
use super::store::{EntityStore, LoadOutcome, StorageUsage};
use super::view::{DriveView, FolderScope, select_view};
use crate::config::DEFAULT_OWNER;
use crate::models::{
    EntityId, EntityKind, File, FileUpload, Folder, LayoutMode, Notification, ScopeMode,
    Session, ViewMode,
};

/// Source of "now" for new entities.
pub type Clock = fn() -> DateTime<Utc>;

/// Result of [`Drive::delete_item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The entity was removed.
    Deleted,
    /// No entity with that id; nothing changed.
    NotFound,
    /// The confirmation predicate declined; nothing changed.
    Cancelled,
}

/// A drive session: entity store plus UI state.
///
/// Initialize once per session with [`Drive::new`] and [`Drive::load`]; drop
/// it when the session ends.
pub struct Drive<S> {
    store: EntityStore<S>,
    session: Session,
    clock: Clock,
}

impl<S: StorageAdapter> Drive<S> {
    pub fn new(storage: S) -> Self {
        Self {
            store: EntityStore::new(storage),
            session: Session::new(),
            clock: Utc::now,
        }
    }

    /// Use `clock` for timestamps of new entities.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Restore persisted state. Never fails; see [`LoadOutcome`].
    pub async fn load(&mut self) -> LoadOutcome {
        let outcome = self.store.load().await;
        self.ensure_current_folder();
        outcome
    }

    pub fn store(&self) -> &EntityStore<S> {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn files(&self) -> &[File] {
        self.store.files()
    }

    pub fn folders(&self) -> &[Folder] {
        self.store.folders()
    }

    pub fn storage_used(&self) -> u64 {
        self.store.storage_used()
    }

    pub fn usage(&self) -> StorageUsage {
        self.store.usage()
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.session.view_mode = mode;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.session.search_query = query.into();
    }

    pub fn set_layout(&mut self, layout: LayoutMode) {
        self.session.layout = layout;
    }

    pub fn toggle_layout(&mut self) {
        self.session.layout = self.session.layout.toggled();
    }

    pub fn set_scope_mode(&mut self, scope_mode: ScopeMode) {
        self.session.scope_mode = scope_mode;
    }

    /// Make `id` the current folder.
    ///
    /// Returns `false` (and stays put) if no such folder exists.
    pub fn open_folder(&mut self, id: &EntityId) -> bool {
        if self.store.folder(id).is_none() {
            return false;
        }
        self.session.current_folder = Some(id.clone());
        true
    }

    pub fn go_to_root(&mut self) {
        self.session.current_folder = None;
    }

    /// Fall back to the root if the current folder no longer exists.
    fn ensure_current_folder(&mut self) {
        let stale = match &self.session.current_folder {
            Some(id) => self.store.folder(id).is_none(),
            None => false,
        };
        if stale {
            self.session.current_folder = None;
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one file per upload to the current folder.
    ///
    /// Existing files are never altered. Returns the new ids in input order.
    pub async fn upload_files<I>(&mut self, uploads: I) -> Result<Vec<EntityId>, DriveError>
    where
        I: IntoIterator<Item = FileUpload>,
    {
        let uploads: Vec<FileUpload> = uploads.into_iter().collect();
        if uploads.is_empty() {
            return Ok(Vec::new());
        }

        let now = (self.clock)();
        let location = self.session.location();
        let mut files = self.store.files().to_vec();
        let mut ids = Vec::with_capacity(uploads.len());

        for upload in uploads {
            let id = self.fresh_id(|id| ids.contains(id) || self.store.file(id).is_some())?;
            files.push(File {
                id: id.clone(),
                name: upload.name,
                size: upload.size,
                mime_type: upload.mime_type,
                owner: DEFAULT_OWNER.to_string(),
                location: location.clone(),
                date_modified: now,
                starred: false,
                shared: false,
            });
            ids.push(id);
        }

        self.store.set_files(files);
        self.store.persist().await?;
        Ok(ids)
    }

    /// Create a folder inside the current folder.
    ///
    /// An empty name (cancelled prompt) is a no-op and returns `None`. Any
    /// other name, whitespace included, is stored as given.
    pub async fn create_folder(&mut self, name: &str) -> Result<Option<EntityId>, DriveError> {
        if name.is_empty() {
            return Ok(None);
        }

        let id = self.fresh_id(|id| self.store.folder(id).is_some())?;
        let mut folders = self.store.folders().to_vec();
        folders.push(Folder {
            id: id.clone(),
            name: name.to_string(),
            parent: self.session.current_folder.clone(),
            date_created: (self.clock)(),
            starred: false,
        });

        self.store.set_folders(folders);
        self.store.persist().await?;
        Ok(Some(id))
    }

    /// Remove the entity `id` from the collection for `kind`.
    ///
    /// `confirm` is asked first; a `false` answer cancels the delete.
    /// Deleting the current folder moves the session back to the root.
    pub async fn delete_item<F>(
        &mut self,
        id: &EntityId,
        kind: EntityKind,
        confirm: F,
    ) -> Result<DeleteOutcome, DriveError>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return Ok(DeleteOutcome::Cancelled);
        }
        if !self.store.contains(id, kind) {
            return Ok(DeleteOutcome::NotFound);
        }

        match kind {
            EntityKind::File => {
                let files = self
                    .store
                    .files()
                    .iter()
                    .filter(|f| &f.id != id)
                    .cloned()
                    .collect();
                self.store.set_files(files);
            }
            EntityKind::Folder => {
                let folders = self
                    .store
                    .folders()
                    .iter()
                    .filter(|f| &f.id != id)
                    .cloned()
                    .collect();
                self.store.set_folders(folders);
                self.ensure_current_folder();
            }
        }

        self.store.persist().await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Flip the starred flag of entity `id`.
    ///
    /// Returns the new flag, or `None` if no such entity exists.
    pub async fn toggle_star(
        &mut self,
        id: &EntityId,
        kind: EntityKind,
    ) -> Result<Option<bool>, DriveError> {
        if !self.store.contains(id, kind) {
            return Ok(None);
        }

        let mut starred = false;
        match kind {
            EntityKind::File => {
                let files = self
                    .store
                    .files()
                    .iter()
                    .map(|f| {
                        if &f.id == id {
                            starred = !f.starred;
                            File {
                                starred,
                                ..f.clone()
                            }
                        } else {
                            f.clone()
                        }
                    })
                    .collect();
                self.store.set_files(files);
            }
            EntityKind::Folder => {
                let folders = self
                    .store
                    .folders()
                    .iter()
                    .map(|f| {
                        if &f.id == id {
                            starred = !f.starred;
                            Folder {
                                starred,
                                ..f.clone()
                            }
                        } else {
                            f.clone()
                        }
                    })
                    .collect();
                self.store.set_folders(folders);
            }
        }

        self.store.persist().await?;
        Ok(Some(starred))
    }

    /// Request a download. No transfer happens; only a notification is produced.
    pub fn download_file(&self, file: &File) -> Notification {
        Notification::Downloading {
            name: file.name.clone(),
        }
    }

    /// Write the current state again after a failed persist.
    pub async fn retry_persist(&mut self) -> Result<(), DriveError> {
        self.store.persist().await
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Folder scope for the current session.
    pub fn scope(&self) -> FolderScope {
        match self.session.scope_mode {
            ScopeMode::Flat => FolderScope::Flat,
            ScopeMode::Hierarchical => FolderScope::Within(self.session.location()),
        }
    }

    /// Render snapshot for the current view mode and search query.
    pub fn view(&self) -> DriveView {
        let selection = select_view(
            self.store.files(),
            self.store.folders(),
            self.session.view_mode,
            &self.session.search_query,
            &self.scope(),
        );
        DriveView::new(selection, self.session.view_mode, self.store.storage_used())
    }

    /// Generate an id not rejected by `taken`.
    fn fresh_id(&self, taken: impl Fn(&EntityId) -> bool) -> Result<EntityId, DriveError> {
        loop {
            let id = EntityId::generate()?;
            if !taken(&id) {
                return Ok(id);
            }
        }
    }
}
