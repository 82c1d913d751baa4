// SPDX-License-Identifier: MPL-2.0
//! Folder index and entry filtering over a ZIP payload.
//!
//! Entry order is whatever the central directory gives; nothing here sorts.

use super::resource::{decode_image, ImageResource};
use crate::error::DecodeError;
use std::collections::HashSet;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Path separator used by ZIP entry names.
pub const SEPARATOR: char = '/';

/// Finder metadata file that macOS drops into archives.
pub const HIDDEN_ENTRY_NAME: &str = ".DS_Store";

/// Prefix of AppleDouble resource-fork companions (`._photo.jpg`).
const APPLE_DOUBLE_PREFIX: &str = "._";

fn open(payload: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>, DecodeError> {
    Ok(ZipArchive::new(Cursor::new(payload))?)
}

/// Returns every entry name in central-directory order.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidArchive`] if the payload is not a ZIP archive.
pub fn entry_names(payload: &[u8]) -> Result<Vec<String>, DecodeError> {
    ordered_names(&mut open(payload)?)
}

fn ordered_names(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<Vec<String>, DecodeError> {
    let mut names = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        names.push(entry.name().to_string());
    }
    Ok(names)
}

/// Whether an entry name denotes a directory marker.
#[must_use]
pub fn is_directory(name: &str) -> bool {
    name.ends_with(SEPARATOR)
}

/// First path segment of an entry name (`"A/1.png"` -> `"A"`).
#[must_use]
pub fn top_level_segment(name: &str) -> &str {
    name.split(SEPARATOR).next().unwrap_or_default()
}

fn is_hidden_file(file_name: &str) -> bool {
    file_name == HIDDEN_ENTRY_NAME || file_name.starts_with(APPLE_DOUBLE_PREFIX)
}

/// Builds the folder index from entry names: unique top-level segments in
/// order of first appearance, without the `.DS_Store` artifact.
pub fn folders_from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut folders = Vec::new();
    for name in names {
        let segment = top_level_segment(name);
        if segment.is_empty() || segment == HIDDEN_ENTRY_NAME {
            continue;
        }
        if seen.insert(segment) {
            folders.push(segment.to_string());
        }
    }
    folders
}

/// Selects the entries shown for `folder`: files directly under `folder/`,
/// skipping directory markers, nested subfolders and hidden system files.
pub fn image_entries_in<'a>(
    names: impl IntoIterator<Item = &'a str>,
    folder: &str,
) -> Vec<&'a str> {
    let prefix = folder_prefix(folder);
    names
        .into_iter()
        .filter(|name| is_image_entry(name, &prefix))
        .collect()
}

fn folder_prefix(folder: &str) -> String {
    format!("{folder}{SEPARATOR}")
}

fn is_image_entry(name: &str, prefix: &str) -> bool {
    let Some(file_name) = name.strip_prefix(prefix) else {
        return false;
    };
    !file_name.is_empty()
        && !is_directory(name)
        && !file_name.contains(SEPARATOR)
        && !is_hidden_file(file_name)
}

/// Lists the top-level folders of the archive.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidArchive`] if the payload is not a ZIP archive.
pub fn list_folders(payload: &[u8]) -> Result<Vec<String>, DecodeError> {
    let names = entry_names(payload)?;
    Ok(folders_from_names(names.iter().map(String::as_str)))
}

/// Extracts the raw bytes of every image entry under `folder`, in archive order.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidArchive`] for an unreadable payload and
/// [`DecodeError::CorruptEntry`] when an entry fails to decompress.
pub fn extract_folder(payload: &[u8], folder: &str) -> Result<Vec<(String, Vec<u8>)>, DecodeError> {
    let mut archive = open(payload)?;
    let names = ordered_names(&mut archive)?;

    let prefix = folder_prefix(folder);
    let mut extracted = Vec::new();
    for (index, name) in names.into_iter().enumerate() {
        if !is_image_entry(&name, &prefix) {
            continue;
        }
        let corrupt = |reason: String| DecodeError::CorruptEntry {
            name: name.clone(),
            reason,
        };
        // The declared size comes from the archive and is not trusted for allocation.
        let mut bytes = Vec::new();
        archive
            .by_index(index)
            .map_err(|e| corrupt(e.to_string()))?
            .read_to_end(&mut bytes)
            .map_err(|e| corrupt(e.to_string()))?;
        extracted.push((name, bytes));
    }
    Ok(extracted)
}

/// Decodes every image directly under `folder`, in archive order.
///
/// A folder without matching files yields an empty vector.
///
/// # Errors
///
/// Returns a [`DecodeError`] for an unreadable archive, a corrupt entry or an
/// entry that is not a decodable image.
pub fn list_images(payload: &[u8], folder: &str) -> Result<Vec<ImageResource>, DecodeError> {
    extract_folder(payload, folder)?
        .into_iter()
        .map(|(name, bytes)| decode_image(name, &bytes))
        .collect()
}
