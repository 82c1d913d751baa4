// SPDX-License-Identifier: MPL-2.0
//! `yearbook_gallery` uploads portrait and candid archives to a processing
//! backend and browses the returned ZIP folder by folder.
//!
//! The processed archive only ever lives in memory: it is indexed and its
//! images decoded straight from the response bytes.

pub mod app;
pub mod archive;
pub mod config;
pub mod error;
pub mod i18n;
pub mod ui;
pub mod upload;

#[cfg(test)]
mod test_utils;
