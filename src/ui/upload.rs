// SPDX-License-Identifier: MPL-2.0
//! Upload screen: pick the portrait and candid archives and send them off.
//!
//! The screen owns the processed archive from the moment the response
//! arrives until the application moves it into the gallery.

use crate::archive::ArchivePayload;
use crate::error::UploadError;
use crate::i18n::fluent::I18n;
use crate::ui::components::error_display::{ErrorDisplay, ErrorSeverity};
use crate::ui::components::modal::modal;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::upload::{self, FieldNames, Slot, UploadRequest, UploadSelection};
use iced::widget::{button, progress_bar, Column, Container, Text};
use iced::{alignment, Element, Length, Task};
use std::path::PathBuf;
use std::time::Duration;

/// Backend settings captured when the screen is created.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub endpoint: String,
    pub fields: FieldNames,
    pub timeout: Duration,
}

#[derive(Debug)]
pub struct State {
    settings: UploadSettings,
    selection: UploadSelection,
    in_flight: bool,
    /// Fraction of the response body received, once the size is known.
    progress: Option<f32>,
    /// Failure shown in the blocking alert.
    alert: Option<UploadError>,
    received: Option<ArchivePayload>,
}

#[derive(Debug, Clone)]
pub enum Message {
    PickRequested(Slot),
    Picked(Slot, Option<PathBuf>),
    FileDropped(PathBuf),
    SubmitPressed,
    Progress(f32),
    Finished(Result<ArchivePayload, UploadError>),
    DismissAlert,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// A processed archive is waiting in [`State::take_payload`].
    UploadSucceeded,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

impl State {
    #[must_use]
    pub fn new(settings: UploadSettings) -> Self {
        Self {
            settings,
            selection: UploadSelection::new(),
            in_flight: false,
            progress: None,
            alert: None,
            received: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    #[must_use]
    pub fn selection(&self) -> &UploadSelection {
        &self.selection
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn alert(&self) -> Option<&UploadError> {
        self.alert.as_ref()
    }

    /// Hands over the received archive. Returns `None` on a second call.
    pub fn take_payload(&mut self) -> Option<ArchivePayload> {
        self.received.take()
    }

    pub fn handle_message(&mut self, message: Message) -> (Event, Task<Message>) {
        match message {
            Message::PickRequested(slot) => {
                if self.in_flight {
                    return (Event::None, Task::none());
                }
                (Event::None, pick_archive(slot))
            }
            Message::Picked(slot, Some(path)) => {
                if let Err(err) = self.selection.select(slot, path) {
                    tracing::warn!(?slot, %err, "rejected selection");
                }
                (Event::None, Task::none())
            }
            Message::Picked(_, None) => (Event::None, Task::none()),
            Message::FileDropped(path) => {
                if self.in_flight {
                    return (Event::None, Task::none());
                }
                match self.selection.assign_dropped(path) {
                    Ok(slot) => tracing::debug!(?slot, "dropped archive assigned"),
                    Err(err) => tracing::warn!(%err, "rejected dropped file"),
                }
                (Event::None, Task::none())
            }
            Message::SubmitPressed => self.submit(),
            Message::Progress(progress) => {
                if self.in_flight {
                    self.progress = Some(progress.clamp(0.0, 1.0));
                }
                (Event::None, Task::none())
            }
            Message::Finished(result) => {
                self.in_flight = false;
                self.progress = None;
                match result {
                    Ok(payload) => {
                        tracing::info!(bytes = payload.len(), "upload finished");
                        self.received = Some(payload);
                        (Event::UploadSucceeded, Task::none())
                    }
                    Err(err) => {
                        tracing::error!(%err, "upload failed");
                        self.alert = Some(err);
                        (Event::None, Task::none())
                    }
                }
            }
            Message::DismissAlert => {
                self.alert = None;
                (Event::None, Task::none())
            }
        }
    }

    fn submit(&mut self) -> (Event, Task<Message>) {
        if self.in_flight {
            return (Event::None, Task::none());
        }

        let (portrait, candid) = match self.selection.validate() {
            Ok((portrait, candid)) => (portrait.path().to_path_buf(), candid.path().to_path_buf()),
            Err(err) => {
                tracing::warn!(%err, "upload blocked");
                return (Event::None, Task::none());
            }
        };

        let request = UploadRequest {
            endpoint: self.settings.endpoint.clone(),
            portrait,
            candid,
            fields: self.settings.fields.clone(),
            timeout: self.settings.timeout,
        };

        self.in_flight = true;
        self.progress = None;
        self.alert = None;
        (Event::None, submit_task(request))
    }
}

fn pick_archive(slot: Slot) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter("ZIP archive", &["zip"])
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        move |path| Message::Picked(slot, path),
    )
}

/// Runs the upload on the runtime and streams progress back as messages,
/// ending with exactly one [`Message::Finished`].
fn submit_task(request: UploadRequest) -> Task<Message> {
    use iced::futures::channel::{mpsc, oneshot};
    use iced::futures::stream;
    use iced::futures::StreamExt;

    type Outcome = Result<ArchivePayload, UploadError>;

    enum Phase {
        ReceivingProgress {
            progress_rx: mpsc::Receiver<f32>,
            result_rx: oneshot::Receiver<Outcome>,
        },
        WaitingForResult {
            result_rx: oneshot::Receiver<Outcome>,
        },
        Completed,
    }

    let (progress_tx, progress_rx) = mpsc::channel::<f32>(100);
    let (result_tx, result_rx) = oneshot::channel::<Outcome>();

    tokio::spawn(async move {
        let mut progress_tx = progress_tx;
        let result = upload::submit(request, |progress| {
            let _ = progress_tx.try_send(progress);
        })
        .await;
        let _ = result_tx.send(result);
    });

    let updates = stream::unfold(
        Phase::ReceivingProgress {
            progress_rx,
            result_rx,
        },
        |phase| async move {
            match phase {
                Phase::ReceivingProgress {
                    mut progress_rx,
                    result_rx,
                } => match progress_rx.next().await {
                    Some(progress) => Some((
                        Message::Progress(progress),
                        Phase::ReceivingProgress {
                            progress_rx,
                            result_rx,
                        },
                    )),
                    None => Some((Message::Progress(1.0), Phase::WaitingForResult { result_rx })),
                },
                Phase::WaitingForResult { result_rx } => {
                    let outcome = result_rx.await.unwrap_or(Err(UploadError::Cancelled));
                    Some((Message::Finished(outcome), Phase::Completed))
                }
                Phase::Completed => None,
            }
        },
    );

    Task::stream(updates)
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;

    let mut card = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(i18n.tr("upload-title")).size(typography::TITLE_LG))
        .push(
            Text::new(i18n.tr("upload-subtitle"))
                .size(typography::BODY_LG)
                .color(palette::GRAY_400),
        );

    if let Some(err) = state.selection.error() {
        card = card.push(
            Text::new(i18n.tr(err.i18n_key()))
                .size(typography::BODY)
                .color(palette::ERROR_500),
        );
    }

    for slot in [Slot::Portrait, Slot::Candid] {
        card = card.push(picker(i18n, state, slot));
    }

    if state.in_flight {
        let mut status = Column::new()
            .spacing(spacing::XS)
            .width(Length::Fill)
            .push(Text::new(i18n.tr("upload-in-progress")).size(typography::BODY));
        if let Some(progress) = state.progress {
            status = status.push(progress_bar(0.0..=1.0, progress));
        }
        card = card.push(status);
    }

    let submit = button(
        Container::new(Text::new(i18n.tr("upload-submit")))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .on_press_maybe((!state.in_flight).then_some(Message::SubmitPressed))
    .style(styles::button::primary);

    card = card.push(submit).push(
        Text::new(i18n.tr("upload-drop-hint"))
            .size(typography::CAPTION)
            .color(palette::GRAY_400),
    );

    let screen = Container::new(
        Container::new(card)
            .width(Length::Fixed(sizing::UPLOAD_CARD_WIDTH))
            .padding(spacing::XL)
            .style(styles::container::panel),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center);

    match &state.alert {
        Some(err) => {
            let dialog = ErrorDisplay::new(ErrorSeverity::Error)
                .title(i18n.tr("upload-alert-title"))
                .message(i18n.tr(err.i18n_key()))
                .action(i18n.tr("upload-alert-dismiss"), Message::DismissAlert)
                .view();
            modal(screen, dialog)
        }
        None => screen.into(),
    }
}

fn picker<'a>(i18n: &I18n, state: &'a State, slot: Slot) -> Element<'a, Message> {
    let selected = state.selection.file(slot);

    let mut label = Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(i18n.tr(state.selection.label_key(slot))).size(typography::BODY_LG));
    if let Some(file) = selected {
        label = label.push(
            Text::new(file.file_name())
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );
    }

    button(
        Container::new(label)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sizing::PICKER_HEIGHT))
    .on_press_maybe((!state.in_flight).then_some(Message::PickRequested(slot)))
    .style(styles::button::picker(selected.is_some()))
    .into()
}
