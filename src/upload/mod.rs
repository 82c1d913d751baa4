// SPDX-License-Identifier: MPL-2.0
//! Selection, validation and submission of the portrait and candid archives.

pub mod client;
pub mod selection;

pub use client::{submit, FieldNames, UploadRequest};
pub use selection::{has_zip_extension, SelectedFile, Slot, UploadSelection};
