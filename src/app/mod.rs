// SPDX-License-Identifier: MPL-2.0
//! Application root state and routing between the upload and gallery screens.
//!
//! The `App` owns every piece of mutable state. The processed archive moves
//! from the upload screen into a freshly built gallery on success and is
//! dropped together with the gallery when the user starts over.

mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::archive::ArchivePayload;
use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::ui::gallery;
use crate::ui::notifications;
use crate::ui::upload;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state.
pub struct App {
    i18n: I18n,
    screen: Screen,
    config: Config,
    theme: Theme,
    upload: upload::State,
    /// Present only while the gallery screen is in use.
    gallery: Option<gallery::State>,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("uploading", &self.upload.is_uploading())
            .field(
                "gallery_has_archive",
                &self.gallery.as_ref().is_some_and(gallery::State::has_payload),
            )
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 520;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced calls boot through `Fn`; the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the settings file and builds the initial state from `flags`.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        Self::boot(flags, config, config_warning)
    }

    /// Builds the initial state from already loaded settings.
    ///
    /// `--archive` wins over `--route`: a readable archive always opens the
    /// gallery.
    fn boot(flags: Flags, mut config: Config, config_warning: Option<String>) -> (Self, Task<Message>) {
        if let Some(endpoint) = flags.endpoint {
            tracing::info!(%endpoint, "endpoint overridden for this session");
            config.upload.endpoint = Some(endpoint);
        }

        let i18n = I18n::new(flags.lang, &config);
        let mut app = App {
            i18n,
            screen: Screen::Upload,
            theme: config.general.theme_mode.iced_theme(),
            upload: upload::State::new(update::upload_settings(&config)),
            gallery: None,
            notifications: notifications::Manager::new(),
            config,
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }

        let task = if let Some(path) = flags.archive_path {
            match ArchivePayload::read_from(&path) {
                Ok(payload) => {
                    tracing::info!(path = %path.display(), bytes = payload.len(), "opening local archive");
                    app.open_gallery(Some(payload))
                }
                Err(err) => {
                    tracing::error!(path = %path.display(), %err, "cannot read archive");
                    app.notifications.push(
                        notifications::Notification::error("notification-archive-open-failed")
                            .with_arg("path", path.display().to_string()),
                    );
                    Task::none()
                }
            }
        } else {
            match flags.route.as_deref().map(|route| (route, Screen::from_route(route))) {
                Some((_, Some(Screen::Gallery))) => app.open_gallery(None),
                Some((route, None)) => {
                    tracing::warn!(route, "unknown start route, showing upload screen");
                    Task::none()
                }
                Some((_, Some(Screen::Upload))) | None => Task::none(),
            }
        };

        (app, task)
    }

    fn open_gallery(&mut self, payload: Option<ArchivePayload>) -> Task<Message> {
        let mut ctx = self.update_context();
        update::open_gallery(&mut ctx, payload)
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            screen: &mut self.screen,
            config: &self.config,
            upload: &mut self.upload,
            gallery: &mut self.gallery,
            notifications: &mut self.notifications,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        let folder = self
            .gallery
            .as_ref()
            .filter(|_| self.screen == Screen::Gallery)
            .and_then(gallery::State::selected_folder);

        match folder {
            Some(folder) => format!("{folder} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.screen);
        let tick_sub =
            subscription::create_tick_subscription(self.notifications.has_notifications());

        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.update_context();

        match message {
            Message::Upload(upload_message) => {
                update::handle_upload_message(&mut ctx, upload_message)
            }
            Message::Gallery(gallery_message) => {
                update::handle_gallery_message(&mut ctx, gallery_message)
            }
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(_) => {
                ctx.notifications.tick();
                Task::none()
            }
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            upload: &self.upload,
            gallery: self.gallery.as_ref(),
            notifications: &self.notifications,
        })
    }
}
