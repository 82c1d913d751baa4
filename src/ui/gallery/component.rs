// SPDX-License-Identifier: MPL-2.0
//! Gallery component encapsulating state and update logic.
//!
//! Every background job (indexing, folder decode) is tagged with an id
//! drawn from a process-wide counter. A result whose id no longer matches
//! what the state is waiting for is dropped, including results that
//! belong to an earlier gallery.

use crate::archive::{tasks, ArchivePayload, ImageSet};
use crate::config::DEFAULT_ARCHIVE_FILE_NAME;
use crate::error::{DecodeError, Error};
use iced::Task;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

fn next_request_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A pending folder decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    pub id: u64,
    pub folder: String,
}

impl DecodeRequest {
    fn new(folder: String) -> Self {
        Self {
            id: next_request_id(),
            folder,
        }
    }
}

/// Top-level folders of the archive.
#[derive(Debug, Clone)]
pub enum FolderIndex {
    Indexing { request_id: u64 },
    Ready(Vec<String>),
    Failed(DecodeError),
}

/// What is shown for the selected folder.
#[derive(Debug, Clone)]
pub enum ImageView {
    Decoding,
    Ready(ImageSet),
    Failed(DecodeError),
}

#[derive(Debug)]
struct Selection {
    request: DecodeRequest,
    view: ImageView,
}

#[derive(Debug)]
pub struct State {
    payload: Option<ArchivePayload>,
    folders: FolderIndex,
    selection: Option<Selection>,
    thumbnail_size: u32,
    show_error_details: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    FoldersIndexed {
        request_id: u64,
        result: Result<Vec<String>, DecodeError>,
    },
    FolderSelected(String),
    ImagesDecoded {
        request_id: u64,
        result: Result<ImageSet, DecodeError>,
    },
    SaveArchiveRequested,
    SaveDialogResult(Option<PathBuf>),
    ArchiveSaved(Result<PathBuf, Error>),
    ToggleErrorDetails,
    BackToUpload,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    BackToUpload,
    ArchiveSaved(PathBuf),
    SaveFailed(Error),
}

impl State {
    /// Creates the gallery for `payload` and starts indexing it.
    ///
    /// Without a payload the gallery stays in its empty state and no task
    /// is started.
    pub fn new(payload: Option<ArchivePayload>, thumbnail_size: u32) -> (Self, Task<Message>) {
        let request_id = next_request_id();
        let task = match &payload {
            Some(payload) => {
                tracing::debug!(bytes = payload.len(), "indexing archive");
                Task::perform(tasks::index_archive(payload.clone()), move |result| {
                    Message::FoldersIndexed { request_id, result }
                })
            }
            None => {
                tracing::info!("gallery opened without an archive");
                Task::none()
            }
        };

        let state = Self {
            payload,
            folders: FolderIndex::Indexing { request_id },
            selection: None,
            thumbnail_size,
            show_error_details: false,
        };
        (state, task)
    }

    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    #[must_use]
    pub fn folders(&self) -> &FolderIndex {
        &self.folders
    }

    #[must_use]
    pub fn selected_folder(&self) -> Option<&str> {
        self.selection
            .as_ref()
            .map(|selection| selection.request.folder.as_str())
    }

    #[must_use]
    pub fn image_view(&self) -> Option<&ImageView> {
        self.selection.as_ref().map(|selection| &selection.view)
    }

    /// The request currently awaited for the selected folder.
    #[must_use]
    pub fn pending_request(&self) -> Option<&DecodeRequest> {
        self.selection
            .as_ref()
            .filter(|selection| matches!(selection.view, ImageView::Decoding))
            .map(|selection| &selection.request)
    }

    #[must_use]
    pub fn thumbnail_size(&self) -> u32 {
        self.thumbnail_size
    }

    #[must_use]
    pub fn show_error_details(&self) -> bool {
        self.show_error_details
    }

    pub fn handle_message(&mut self, message: Message) -> (Event, Task<Message>) {
        match message {
            Message::FoldersIndexed { request_id, result } => {
                self.apply_index(request_id, result);
                (Event::None, Task::none())
            }
            Message::FolderSelected(folder) => (Event::None, self.select_folder(folder)),
            Message::ImagesDecoded { request_id, result } => {
                self.apply_decode(request_id, result);
                (Event::None, Task::none())
            }
            Message::SaveArchiveRequested => (Event::None, self.save_dialog()),
            Message::SaveDialogResult(Some(path)) => (Event::None, self.write_archive(path)),
            Message::SaveDialogResult(None) => (Event::None, Task::none()),
            Message::ArchiveSaved(Ok(path)) => {
                tracing::info!(path = %path.display(), "archive saved");
                (Event::ArchiveSaved(path), Task::none())
            }
            Message::ArchiveSaved(Err(err)) => {
                tracing::error!(%err, "saving archive failed");
                (Event::SaveFailed(err), Task::none())
            }
            Message::ToggleErrorDetails => {
                self.show_error_details = !self.show_error_details;
                (Event::None, Task::none())
            }
            Message::BackToUpload => (Event::BackToUpload, Task::none()),
        }
    }

    fn apply_index(&mut self, request_id: u64, result: Result<Vec<String>, DecodeError>) {
        if !matches!(self.folders, FolderIndex::Indexing { request_id: pending } if pending == request_id)
        {
            tracing::warn!(request_id, "discarding stale folder index");
            return;
        }

        self.folders = match result {
            Ok(folders) => {
                tracing::info!(count = folders.len(), "folders ready");
                FolderIndex::Ready(folders)
            }
            Err(err) => {
                tracing::error!(%err, "cannot index archive");
                FolderIndex::Failed(err)
            }
        };
    }

    fn select_folder(&mut self, folder: String) -> Task<Message> {
        let Some(payload) = self.payload.clone() else {
            return Task::none();
        };
        let FolderIndex::Ready(folders) = &self.folders else {
            return Task::none();
        };
        if !folders.contains(&folder) {
            tracing::warn!(%folder, "selected folder is not in the index");
            return Task::none();
        }
        if let Some(current) = &self.selection {
            if current.request.folder == folder && !matches!(current.view, ImageView::Failed(_)) {
                return Task::none();
            }
        }

        let request = DecodeRequest::new(folder);
        let request_id = request.id;
        let decode = tasks::load_folder(payload, request.folder.clone());
        tracing::debug!(request_id, folder = %request.folder, "decoding folder");

        // Replacing the selection drops the previous image handles.
        self.selection = Some(Selection {
            request,
            view: ImageView::Decoding,
        });
        self.show_error_details = false;

        Task::perform(decode, move |result| Message::ImagesDecoded { request_id, result })
    }

    fn apply_decode(&mut self, request_id: u64, result: Result<ImageSet, DecodeError>) {
        let Some(selection) = self
            .selection
            .as_mut()
            .filter(|selection| selection.request.id == request_id)
        else {
            tracing::warn!(request_id, "discarding stale folder decode");
            return;
        };

        selection.view = match result {
            Ok(images) => {
                tracing::info!(folder = %images.folder, count = images.len(), "folder decoded");
                ImageView::Ready(images)
            }
            Err(err) => {
                tracing::error!(folder = %selection.request.folder, %err, "folder decode failed");
                ImageView::Failed(err)
            }
        };
    }

    fn save_dialog(&self) -> Task<Message> {
        if self.payload.is_none() {
            return Task::none();
        }
        Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .set_file_name(DEFAULT_ARCHIVE_FILE_NAME)
                    .add_filter("ZIP archive", &["zip"])
                    .save_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::SaveDialogResult,
        )
    }

    fn write_archive(&self, path: PathBuf) -> Task<Message> {
        let Some(payload) = self.payload.clone() else {
            return Task::none();
        };
        Task::perform(
            async move {
                let target = path.clone();
                tokio::task::spawn_blocking(move || payload.write_to(&target))
                    .await
                    .map_err(|e| Error::Io(e.to_string()))?
                    .map(|()| path)
            },
            Message::ArchiveSaved,
        )
    }
}
