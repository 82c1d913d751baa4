// SPDX-License-Identifier: MPL-2.0
//! Decoded images ready for display.

use crate::error::DecodeError;
use iced::widget::image;

/// One decoded archive entry.
#[derive(Debug, Clone)]
pub struct ImageResource {
    /// Full entry name inside the archive (`"A/1.png"`).
    pub name: String,
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageResource {
    /// Entry name without the folder prefix, used as caption.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.name
            .rsplit_once(super::SEPARATOR)
            .map_or(self.name.as_str(), |(_, file)| file)
    }
}

/// The decoded images of one folder.
///
/// Dropping the set releases every pixel buffer it holds.
#[derive(Debug, Clone)]
pub struct ImageSet {
    pub folder: String,
    pub images: Vec<ImageResource>,
}

impl ImageSet {
    #[must_use]
    pub fn new(folder: String, images: Vec<ImageResource>) -> Self {
        Self { folder, images }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Decodes encoded image bytes (PNG, JPEG, ...) into an RGBA handle.
///
/// # Errors
///
/// Returns [`DecodeError::UnsupportedImage`] if the format is unknown or the
/// data is malformed.
pub fn decode_image(name: String, data: &[u8]) -> Result<ImageResource, DecodeError> {
    let decoded = match image_rs::load_from_memory(data) {
        Ok(decoded) => decoded,
        Err(err) => {
            return Err(DecodeError::UnsupportedImage {
                name,
                reason: err.to_string(),
            })
        }
    };

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let handle = image::Handle::from_rgba(width, height, rgba.into_raw());

    Ok(ImageResource {
        name,
        handle,
        width,
        height,
    })
}
