// SPDX-License-Identifier: MPL-2.0
use image_rs::{ImageFormat, Rgb, RgbImage};
use std::io::{Cursor, Write};
use tempfile::tempdir;
use yearbook_gallery::archive::{list_folders, list_images, tasks, ArchivePayload};
use yearbook_gallery::error::DecodeError;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([30, 120, 200]));
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format).expect("encode fixture");
    cursor.into_inner()
}

fn archive(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, SimpleFileOptions::default())
                .unwrap();
        } else {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(bytes).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

fn yearbook_archive() -> Vec<u8> {
    archive(&[
        ("A/", Vec::new()),
        ("A/1.png", encoded(4, 3, ImageFormat::Png)),
        ("A/2.png", encoded(2, 5, ImageFormat::Png)),
        ("B/x.jpg", encoded(8, 8, ImageFormat::Jpeg)),
        (".DS_Store", b"\0\0\0\x01Bud1".to_vec()),
    ])
}

#[test]
fn folders_and_images_of_a_processed_archive() {
    let bytes = yearbook_archive();

    assert_eq!(list_folders(&bytes).unwrap(), vec!["A", "B"]);

    let images = list_images(&bytes, "A").unwrap();
    let names: Vec<&str> = images.iter().map(|image| image.name.as_str()).collect();
    assert_eq!(names, vec!["A/1.png", "A/2.png"]);
    assert_eq!((images[0].width, images[0].height), (4, 3));
    assert_eq!(images[1].file_name(), "2.png");

    let jpegs = list_images(&bytes, "B").unwrap();
    assert_eq!(jpegs.len(), 1);
    assert_eq!((jpegs[0].width, jpegs[0].height), (8, 8));
}

#[test]
fn folder_listing_is_idempotent() {
    let bytes = yearbook_archive();
    assert_eq!(list_folders(&bytes).unwrap(), list_folders(&bytes).unwrap());
}

#[test]
fn empty_archive_has_nothing_to_show() {
    let bytes = archive(&[]);
    assert!(list_folders(&bytes).unwrap().is_empty());
    assert!(list_images(&bytes, "A").unwrap().is_empty());
}

#[test]
fn garbage_payload_is_a_decode_error() {
    let err = list_folders(b"<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, DecodeError::InvalidArchive(_)));
}

#[test]
fn saved_archive_reopens_identically() {
    let payload = ArchivePayload::from_bytes(yearbook_archive());
    let dir = tempdir().unwrap();
    let path = dir.path().join("processed_images.zip");

    payload.write_to(&path).unwrap();
    let reopened = ArchivePayload::read_from(&path).unwrap();

    assert_eq!(reopened, payload);
    assert_eq!(list_folders(reopened.as_bytes()).unwrap(), vec!["A", "B"]);
}

#[tokio::test]
async fn background_tasks_index_and_decode() {
    let payload = ArchivePayload::from_bytes(yearbook_archive());

    let folders = tasks::index_archive(payload.clone()).await.unwrap();
    assert_eq!(folders, vec!["A", "B"]);

    let set = tasks::load_folder(payload, "A".to_string()).await.unwrap();
    assert_eq!(set.folder, "A");
    assert_eq!(set.len(), 2);
}

#[tokio::test]
async fn one_bad_image_fails_the_whole_folder() {
    let payload = ArchivePayload::from_bytes(archive(&[
        ("A/1.png", encoded(2, 2, ImageFormat::Png)),
        ("A/notes.txt", b"not an image".to_vec()),
    ]));

    let err = tasks::load_folder(payload, "A".to_string()).await.unwrap_err();
    assert!(matches!(err, DecodeError::UnsupportedImage { .. }));
}
