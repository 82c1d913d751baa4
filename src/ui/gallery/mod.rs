// SPDX-License-Identifier: MPL-2.0
//! Gallery screen: folder index of the processed archive and the images of
//! the selected folder.

pub mod component;
pub mod empty_state;
pub mod view;

pub use component::{DecodeRequest, Event, FolderIndex, ImageView, Message, State};
pub use view::{view, ViewContext};
