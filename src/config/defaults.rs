// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Upload**: backend endpoint, request timeout and multipart part names
//! - **Gallery**: thumbnail sizing

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Backend endpoint receiving the two archives.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/upload";

/// Default request timeout in seconds. Processing runs face matching on the
/// whole upload, so this is generous.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 600;

/// Minimum request timeout in seconds.
pub const MIN_UPLOAD_TIMEOUT_SECS: u64 = 5;

/// Maximum request timeout in seconds.
pub const MAX_UPLOAD_TIMEOUT_SECS: u64 = 3600;

/// Multipart part carrying the portrait archive.
pub const DEFAULT_PORTRAIT_FIELD: &str = "portrait_zip";

/// Multipart part carrying the candid archive.
pub const DEFAULT_CANDIDS_FIELD: &str = "candids_zip";

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Default edge length of a gallery thumbnail (in logical pixels).
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 200;

/// Minimum thumbnail size.
pub const MIN_THUMBNAIL_SIZE: u32 = 64;

/// Maximum thumbnail size.
pub const MAX_THUMBNAIL_SIZE: u32 = 1024;

/// File name suggested when saving the processed archive.
pub const DEFAULT_ARCHIVE_FILE_NAME: &str = "processed_images.zip";
