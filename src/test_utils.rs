// SPDX-License-Identifier: MPL-2.0
//! Fixture builders shared by unit tests: in-memory ZIP archives and PNGs.

use image_rs::{ImageFormat, Rgba, RgbaImage};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Encodes a solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 90, 255]));
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("encoding a PNG in memory should succeed");
    cursor.into_inner()
}

/// Builds a ZIP archive entry by entry, preserving insertion order.
pub struct TestArchive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl TestArchive {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    /// Stores entries uncompressed from now on.
    pub fn stored(mut self) -> Self {
        self.options = self.options.compression_method(CompressionMethod::Stored);
        self
    }

    pub fn file(mut self, name: &str, contents: impl AsRef<[u8]>) -> Self {
        self.writer
            .start_file(name, self.options)
            .expect("start_file should succeed");
        self.writer
            .write_all(contents.as_ref())
            .expect("writing entry should succeed");
        self
    }

    pub fn directory(mut self, name: &str) -> Self {
        self.writer
            .add_directory(name, self.options)
            .expect("add_directory should succeed");
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.writer
            .finish()
            .expect("finishing archive should succeed")
            .into_inner()
    }
}

impl Default for TestArchive {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand-assembled archive of stored entries, for layouts `ZipWriter` refuses
/// to produce: repeated names and forged size fields.
#[derive(Default)]
pub struct RawArchive {
    entries: Vec<RawEntry>,
}

struct RawEntry {
    name: String,
    data: Vec<u8>,
    crc: u32,
    declared_size: Option<u64>,
}

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;
const ZIP64_EXTRA_ID: u16 = 0x0001;
const VERSION_NEEDED: u16 = 45;
// 2024-01-01, MS-DOS encoding.
const DOS_DATE: u16 = (44 << 9) | (1 << 5) | 1;

impl RawArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(self, name: &str, contents: impl AsRef<[u8]>) -> Self {
        self.push(name, contents.as_ref(), None)
    }

    /// Adds an entry whose central directory claims `declared_size`
    /// uncompressed bytes through a zip64 extra field.
    pub fn file_declaring(self, name: &str, contents: impl AsRef<[u8]>, declared_size: u64) -> Self {
        self.push(name, contents.as_ref(), Some(declared_size))
    }

    fn push(mut self, name: &str, data: &[u8], declared_size: Option<u64>) -> Self {
        self.entries.push(RawEntry {
            name: name.to_string(),
            data: data.to_vec(),
            crc: crc32_of(data),
            declared_size,
        });
        self
    }

    pub fn finish(self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut offsets = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            offsets.push(out.len() as u32);
            let size = entry.data.len() as u32;
            put_u32(&mut out, LOCAL_HEADER_SIGNATURE);
            put_u16(&mut out, VERSION_NEEDED);
            put_u16(&mut out, 0); // flags
            put_u16(&mut out, 0); // stored
            put_u16(&mut out, 0); // time
            put_u16(&mut out, DOS_DATE);
            put_u32(&mut out, entry.crc);
            put_u32(&mut out, size);
            put_u32(&mut out, size);
            put_u16(&mut out, entry.name.len() as u16);
            put_u16(&mut out, 0); // extra length
            out.extend_from_slice(entry.name.as_bytes());
            out.extend_from_slice(&entry.data);
        }

        let directory_start = out.len() as u32;
        for (entry, offset) in self.entries.iter().zip(offsets) {
            let size = entry.data.len() as u32;
            let mut extra = Vec::new();
            let uncompressed = match entry.declared_size {
                Some(declared) => {
                    put_u16(&mut extra, ZIP64_EXTRA_ID);
                    put_u16(&mut extra, 8);
                    extra.extend_from_slice(&declared.to_le_bytes());
                    u32::MAX
                }
                None => size,
            };
            put_u32(&mut out, CENTRAL_HEADER_SIGNATURE);
            put_u16(&mut out, VERSION_NEEDED); // made by
            put_u16(&mut out, VERSION_NEEDED);
            put_u16(&mut out, 0); // flags
            put_u16(&mut out, 0); // stored
            put_u16(&mut out, 0); // time
            put_u16(&mut out, DOS_DATE);
            put_u32(&mut out, entry.crc);
            put_u32(&mut out, size);
            put_u32(&mut out, uncompressed);
            put_u16(&mut out, entry.name.len() as u16);
            put_u16(&mut out, extra.len() as u16);
            put_u16(&mut out, 0); // comment length
            put_u16(&mut out, 0); // disk
            put_u16(&mut out, 0); // internal attributes
            put_u32(&mut out, 0); // external attributes
            put_u32(&mut out, offset);
            out.extend_from_slice(entry.name.as_bytes());
            out.extend_from_slice(&extra);
        }
        let directory_size = out.len() as u32 - directory_start;

        let count = self.entries.len() as u16;
        put_u32(&mut out, END_OF_CENTRAL_DIRECTORY_SIGNATURE);
        put_u16(&mut out, 0);
        put_u16(&mut out, 0);
        put_u16(&mut out, count);
        put_u16(&mut out, count);
        put_u32(&mut out, directory_size);
        put_u32(&mut out, directory_start);
        put_u16(&mut out, 0);
        out
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Lets the zip crate compute the checksum by storing `data` once.
fn crc32_of(data: &[u8]) -> u32 {
    let bytes = TestArchive::new().stored().file("crc", data).finish();
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).expect("fresh archive should open");
    let crc = zip.by_index_raw(0).expect("entry should exist").crc32();
    crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn stored_and_deflated_archives_are_readable() {
        let png = png_bytes(3, 3);
        for archive in [TestArchive::new(), TestArchive::new().stored()] {
            let bytes = archive.file("A/1.png", &png).finish();
            let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
            assert_eq!(zip.len(), 1);
            assert_eq!(zip.by_index(0).unwrap().size(), png.len() as u64);
        }
    }

    #[test]
    fn raw_archive_is_readable_and_keeps_contents() {
        let png = png_bytes(2, 2);
        let bytes = RawArchive::new().file("A/1.png", &png).file("B/x.png", b"x").finish();

        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 2);
        let mut contents = Vec::new();
        zip.by_index(0).unwrap().read_to_end(&mut contents).unwrap();
        assert_eq!(contents, png);
    }
}
