// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Validation(ValidationError),
    Upload(UploadError),
    Decode(DecodeError),
}

/// Problems with the user's file selection, detected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or both of the portrait/candid archives has not been chosen.
    MissingFiles,
    /// The chosen file does not carry a `.zip` suffix.
    NotAZip { file_name: String },
}

impl ValidationError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ValidationError::MissingFiles => "error-validation-missing-files",
            ValidationError::NotAZip { .. } => "error-validation-not-zip",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFiles => {
                write!(f, "Both portrait and candid archives are required")
            }
            ValidationError::NotAZip { file_name } => {
                write!(f, "Not a .zip file: {}", file_name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failures of the upload round-trip. All of them surface to the user as the
/// same generic message; the variants exist for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// A selected archive could not be read from disk.
    ReadFile { path: String, reason: String },
    /// The request could not be built or the connection failed.
    Transport(String),
    /// The backend answered with a non-success status code.
    Status(u16),
    /// The response body was interrupted while streaming.
    Body(String),
    /// The background task driving the request went away.
    Cancelled,
}

impl UploadError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        "error-upload-failed"
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::ReadFile { path, reason } => {
                write!(f, "Failed to read {}: {}", path, reason)
            }
            UploadError::Transport(msg) => write!(f, "Request failed: {}", msg),
            UploadError::Status(code) => write!(f, "HTTP status: {}", code),
            UploadError::Body(msg) => write!(f, "Response body failed: {}", msg),
            UploadError::Cancelled => write!(f, "Upload task cancelled"),
        }
    }
}

impl std::error::Error for UploadError {}

/// Failures while reading the processed archive or one of its images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload is not a readable ZIP archive.
    InvalidArchive(String),
    /// An entry exists but its bytes could not be extracted.
    CorruptEntry { name: String, reason: String },
    /// An entry was extracted but is not a decodable image.
    UnsupportedImage { name: String, reason: String },
    /// A background decode worker panicked or was dropped.
    Interrupted(String),
}

impl DecodeError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            DecodeError::InvalidArchive(_) | DecodeError::Interrupted(_) => {
                "error-decode-archive"
            }
            DecodeError::CorruptEntry { .. } => "error-decode-entry",
            DecodeError::UnsupportedImage { .. } => "error-decode-image",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidArchive(msg) => write!(f, "Invalid archive: {}", msg),
            DecodeError::CorruptEntry { name, reason } => {
                write!(f, "Corrupt entry {}: {}", name, reason)
            }
            DecodeError::UnsupportedImage { name, reason } => {
                write!(f, "Cannot decode image {}: {}", name, reason)
            }
            DecodeError::Interrupted(msg) => write!(f, "Decode interrupted: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Validation(e) => write!(f, "Validation Error: {}", e),
            Error::Upload(e) => write!(f, "Upload Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<UploadError> for Error {
    fn from(err: UploadError) -> Self {
        Error::Upload(err)
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<zip::result::ZipError> for DecodeError {
    fn from(err: zip::result::ZipError) -> Self {
        DecodeError::InvalidArchive(err.to_string())
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            UploadError::Status(status.as_u16())
        } else {
            UploadError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn every_upload_failure_shares_the_generic_message() {
        let errors = [
            UploadError::Status(500),
            UploadError::Transport("connection refused".into()),
            UploadError::Body("reset".into()),
            UploadError::Cancelled,
        ];
        for err in errors {
            assert_eq!(err.i18n_key(), "error-upload-failed");
        }
    }

    #[test]
    fn upload_status_display_includes_code() {
        let err = UploadError::Status(502);
        assert_eq!(format!("{}", err), "HTTP status: 502");
    }

    #[test]
    fn validation_error_i18n_keys() {
        assert_eq!(
            ValidationError::MissingFiles.i18n_key(),
            "error-validation-missing-files"
        );
        assert_eq!(
            ValidationError::NotAZip {
                file_name: "photos.rar".into()
            }
            .i18n_key(),
            "error-validation-not-zip"
        );
    }

    #[test]
    fn decode_error_i18n_keys() {
        assert_eq!(
            DecodeError::InvalidArchive("eocd".into()).i18n_key(),
            "error-decode-archive"
        );
        assert_eq!(
            DecodeError::CorruptEntry {
                name: "A/1.png".into(),
                reason: "crc".into()
            }
            .i18n_key(),
            "error-decode-entry"
        );
        assert_eq!(
            DecodeError::UnsupportedImage {
                name: "A/notes.txt".into(),
                reason: "format".into()
            }
            .i18n_key(),
            "error-decode-image"
        );
    }

    #[test]
    fn zip_error_converts_to_invalid_archive() {
        let err: DecodeError = zip::result::ZipError::InvalidArchive("bad".into()).into();
        assert!(matches!(err, DecodeError::InvalidArchive(_)));
    }

    #[test]
    fn domain_errors_wrap_into_crate_error() {
        let err: Error = DecodeError::Interrupted("join".into()).into();
        assert!(format!("{}", err).starts_with("Decode Error:"));
    }
}
