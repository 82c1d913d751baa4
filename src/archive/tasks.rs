// SPDX-License-Identifier: MPL-2.0
//! Async entry points used by the gallery.
//!
//! ZIP parsing and image decoding are CPU-bound, so both run on the blocking
//! pool. Entries of one folder are decoded in parallel and only handed back
//! once every one of them has finished.

use super::inspector;
use super::resource::{decode_image, ImageResource, ImageSet};
use super::ArchivePayload;
use crate::error::DecodeError;
use futures_util::future::join_all;
use tokio::task::JoinError;

fn interrupted(err: JoinError) -> DecodeError {
    DecodeError::Interrupted(err.to_string())
}

/// Builds the folder index of `payload` off the UI thread.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidArchive`] for a malformed payload and
/// [`DecodeError::Interrupted`] if the worker dies.
pub async fn index_archive(payload: ArchivePayload) -> Result<Vec<String>, DecodeError> {
    let folders = tokio::task::spawn_blocking(move || inspector::list_folders(payload.as_bytes()))
        .await
        .map_err(interrupted)??;

    tracing::debug!(count = folders.len(), "archive indexed");
    Ok(folders)
}

/// Extracts and decodes every image of `folder`.
///
/// All-or-nothing: the first failing entry (in archive order) fails the set.
///
/// # Errors
///
/// Returns the [`DecodeError`] of the first entry that could not be
/// extracted or decoded.
pub async fn load_folder(payload: ArchivePayload, folder: String) -> Result<ImageSet, DecodeError> {
    let extract_folder = folder.clone();
    let entries = tokio::task::spawn_blocking(move || {
        inspector::extract_folder(payload.as_bytes(), &extract_folder)
    })
    .await
    .map_err(interrupted)??;

    tracing::debug!(%folder, entries = entries.len(), "decoding folder");

    let decodes = entries.into_iter().map(|(name, bytes)| async move {
        tokio::task::spawn_blocking(move || decode_image(name, &bytes))
            .await
            .map_err(interrupted)?
    });

    let images = join_all(decodes)
        .await
        .into_iter()
        .collect::<Result<Vec<ImageResource>, DecodeError>>()?;

    Ok(ImageSet::new(folder, images))
}
