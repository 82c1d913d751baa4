// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Component messages are forwarded to the owning screen; the events they
//! return drive navigation and notifications.

use super::{Message, Screen};
use crate::archive::ArchivePayload;
use crate::config::Config;
use crate::ui::gallery::{self, Event as GalleryEvent};
use crate::ui::notifications::{self, Notification};
use crate::ui::upload::{self, Event as UploadEvent, UploadSettings};
use iced::Task;
use std::path::PathBuf;

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub screen: &'a mut Screen,
    pub config: &'a Config,
    pub upload: &'a mut upload::State,
    pub gallery: &'a mut Option<gallery::State>,
    pub notifications: &'a mut notifications::Manager,
}

/// Backend settings for a new upload screen.
pub fn upload_settings(config: &Config) -> UploadSettings {
    UploadSettings {
        endpoint: config.upload.endpoint().to_string(),
        fields: config.upload.field_names(),
        timeout: config.upload.timeout(),
    }
}

/// Replaces any previous gallery with one built around `payload` and
/// switches to it.
pub fn open_gallery(ctx: &mut UpdateContext<'_>, payload: Option<ArchivePayload>) -> Task<Message> {
    let (state, task) = gallery::State::new(payload, ctx.config.gallery.thumbnail_size());
    *ctx.gallery = Some(state);
    *ctx.screen = Screen::Gallery;
    tracing::info!(route = Screen::Gallery.route(), "navigated");
    task.map(Message::Gallery)
}

/// Drops the gallery with its archive and image handles and shows a fresh
/// upload screen.
fn return_to_upload(ctx: &mut UpdateContext<'_>) {
    *ctx.gallery = None;
    *ctx.upload = upload::State::new(upload_settings(ctx.config));
    *ctx.screen = Screen::Upload;
    tracing::info!(route = Screen::Upload.route(), "navigated");
}

/// Handles upload screen messages.
pub fn handle_upload_message(ctx: &mut UpdateContext<'_>, message: upload::Message) -> Task<Message> {
    let (event, task) = ctx.upload.handle_message(message);
    let task = task.map(Message::Upload);

    match event {
        UploadEvent::None => task,
        UploadEvent::UploadSucceeded => match ctx.upload.take_payload() {
            Some(payload) => {
                ctx.notifications
                    .push(Notification::success("notification-upload-complete"));
                Task::batch([task, open_gallery(ctx, Some(payload))])
            }
            None => {
                tracing::warn!("upload reported success without an archive");
                task
            }
        },
    }
}

/// Handles gallery messages. Messages arriving after the gallery was torn
/// down are dropped.
pub fn handle_gallery_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery::Message,
) -> Task<Message> {
    let Some(state) = ctx.gallery.as_mut() else {
        tracing::debug!(?message, "gallery message without a gallery");
        return Task::none();
    };

    let (event, task) = state.handle_message(message);
    let task = task.map(Message::Gallery);

    match event {
        GalleryEvent::None => {}
        GalleryEvent::BackToUpload => return_to_upload(ctx),
        GalleryEvent::ArchiveSaved(path) => ctx.notifications.push(
            Notification::success("notification-archive-saved")
                .with_arg("path", path.display().to_string()),
        ),
        GalleryEvent::SaveFailed(_) => ctx
            .notifications
            .push(Notification::error("notification-archive-save-failed")),
    }

    task
}

/// Routes a dropped file to the upload screen; drops elsewhere are ignored.
pub fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    if *ctx.screen != Screen::Upload {
        tracing::debug!(path = %path.display(), "ignoring drop outside the upload screen");
        return Task::none();
    }
    handle_upload_message(ctx, upload::Message::FileDropped(path))
}
