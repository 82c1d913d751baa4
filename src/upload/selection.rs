// SPDX-License-Identifier: MPL-2.0
//! The pair of archives the user picked, plus the inline validation message.

use crate::error::ValidationError;
use std::path::{Path, PathBuf};

/// Extension required on both archives. The comparison is case-sensitive.
pub const ZIP_EXTENSION: &str = ".zip";

/// Which of the two inputs a file is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Portrait,
    Candid,
}

impl Slot {
    /// Label key shown on the picker before a file is chosen.
    #[must_use]
    pub fn prompt_key(self) -> &'static str {
        match self {
            Slot::Portrait => "upload-portrait-prompt",
            Slot::Candid => "upload-candid-prompt",
        }
    }

    /// Label key shown once a valid file is held.
    #[must_use]
    pub fn selected_key(self) -> &'static str {
        match self {
            Slot::Portrait => "upload-portrait-selected",
            Slot::Candid => "upload-candid-selected",
        }
    }
}

/// A chosen archive on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
    file_name: String,
}

impl SelectedFile {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Whether `file_name` ends with exactly `.zip`.
#[must_use]
pub fn has_zip_extension(file_name: &str) -> bool {
    file_name.ends_with(ZIP_EXTENSION)
}

/// Both file slots and the current validation message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSelection {
    portrait: Option<SelectedFile>,
    candid: Option<SelectedFile>,
    error: Option<ValidationError>,
}

impl UploadSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `path` into `slot`.
    ///
    /// A file without the `.zip` suffix is rejected: the slot keeps its
    /// previous content and the validation error is set. A valid file
    /// clears any previous error.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAZip`] for a rejected file.
    pub fn select(&mut self, slot: Slot, path: PathBuf) -> Result<(), ValidationError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !has_zip_extension(&file_name) {
            let err = ValidationError::NotAZip { file_name };
            self.error = Some(err.clone());
            return Err(err);
        }

        self.error = None;
        let file = Some(SelectedFile { path, file_name });
        match slot {
            Slot::Portrait => self.portrait = file,
            Slot::Candid => self.candid = file,
        }
        Ok(())
    }

    /// Places a dropped file into the first empty slot (portrait, then
    /// candid). When both are filled the candid slot is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAZip`] for a rejected file.
    pub fn assign_dropped(&mut self, path: PathBuf) -> Result<Slot, ValidationError> {
        let slot = if self.portrait.is_none() {
            Slot::Portrait
        } else {
            Slot::Candid
        };
        self.select(slot, path).map(|()| slot)
    }

    /// Checks that both archives are present, recording the error otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFiles`] if either slot is empty.
    pub fn validate(&mut self) -> Result<(&SelectedFile, &SelectedFile), ValidationError> {
        match (&self.portrait, &self.candid) {
            (Some(portrait), Some(candid)) => {
                self.error = None;
                Ok((portrait, candid))
            }
            _ => {
                self.error = Some(ValidationError::MissingFiles);
                Err(ValidationError::MissingFiles)
            }
        }
    }

    #[must_use]
    pub fn file(&self, slot: Slot) -> Option<&SelectedFile> {
        match slot {
            Slot::Portrait => self.portrait.as_ref(),
            Slot::Candid => self.candid.as_ref(),
        }
    }

    /// The i18n key of the status label for `slot`.
    #[must_use]
    pub fn label_key(&self, slot: Slot) -> &'static str {
        if self.file(slot).is_some() {
            slot.selected_key()
        } else {
            slot.prompt_key()
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.portrait.is_some() && self.candid.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_extension_is_case_sensitive() {
        assert!(has_zip_extension("portraits.zip"));
        assert!(!has_zip_extension("portraits.ZIP"));
        assert!(!has_zip_extension("portraits.zip.txt"));
        assert!(!has_zip_extension(""));
    }

    #[test]
    fn valid_selection_updates_label_and_clears_error() {
        let mut selection = UploadSelection::new();
        let _ = selection.select(Slot::Portrait, PathBuf::from("photos.rar"));
        assert!(selection.error().is_some());

        selection
            .select(Slot::Portrait, PathBuf::from("/tmp/portraits.zip"))
            .unwrap();

        assert!(selection.error().is_none());
        assert_eq!(selection.label_key(Slot::Portrait), "upload-portrait-selected");
        assert_eq!(selection.label_key(Slot::Candid), "upload-candid-prompt");
        assert_eq!(
            selection.file(Slot::Portrait).map(SelectedFile::file_name),
            Some("portraits.zip")
        );
    }

    #[test]
    fn rejected_file_keeps_previous_selection() {
        let mut selection = UploadSelection::new();
        selection
            .select(Slot::Candid, PathBuf::from("candids.zip"))
            .unwrap();

        let err = selection
            .select(Slot::Candid, PathBuf::from("candids.tar.gz"))
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::NotAZip {
                file_name: "candids.tar.gz".into()
            }
        );
        assert_eq!(selection.error(), Some(&err));
        assert_eq!(
            selection.file(Slot::Candid).map(SelectedFile::file_name),
            Some("candids.zip")
        );
    }

    #[test]
    fn validate_requires_both_files() {
        let mut selection = UploadSelection::new();
        selection
            .select(Slot::Portrait, PathBuf::from("p.zip"))
            .unwrap();

        assert_eq!(selection.validate().unwrap_err(), ValidationError::MissingFiles);
        assert_eq!(selection.error(), Some(&ValidationError::MissingFiles));
        assert!(!selection.is_complete());

        selection.select(Slot::Candid, PathBuf::from("c.zip")).unwrap();
        let (portrait, candid) = selection.validate().unwrap();
        assert_eq!(portrait.file_name(), "p.zip");
        assert_eq!(candid.file_name(), "c.zip");
        assert!(selection.error().is_none());
    }

    #[test]
    fn dropped_files_fill_portrait_then_candid() {
        let mut selection = UploadSelection::new();
        assert_eq!(
            selection.assign_dropped(PathBuf::from("a.zip")),
            Ok(Slot::Portrait)
        );
        assert_eq!(
            selection.assign_dropped(PathBuf::from("b.zip")),
            Ok(Slot::Candid)
        );
        assert_eq!(
            selection.assign_dropped(PathBuf::from("c.zip")),
            Ok(Slot::Candid)
        );
        assert_eq!(
            selection.file(Slot::Candid).map(SelectedFile::file_name),
            Some("c.zip")
        );
    }

    #[test]
    fn dropped_non_zip_sets_error() {
        let mut selection = UploadSelection::new();
        assert!(selection.assign_dropped(PathBuf::from("notes.txt")).is_err());
        assert!(selection.file(Slot::Portrait).is_none());
        assert!(matches!(
            selection.error(),
            Some(ValidationError::NotAZip { .. })
        ));
    }
}
