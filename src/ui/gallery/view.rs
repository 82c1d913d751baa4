// SPDX-License-Identifier: MPL-2.0
//! Layout of the gallery: a header, the folder sidebar and the thumbnails
//! of the selected folder.

use super::component::{FolderIndex, ImageView, Message, State};
use super::empty_state;
use crate::archive::{ImageResource, ImageSet};
use crate::error::DecodeError;
use crate::i18n::fluent::I18n;
use crate::ui::components::error_display::{ErrorDisplay, ErrorSeverity};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, image, rule, scrollable, Column, Container, Row, Text};
use iced::{alignment, ContentFit, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let ViewContext { i18n, state } = ctx;

    if !state.has_payload() {
        return empty_state::view(i18n);
    }

    let body: Element<'a, Message> = match state.folders() {
        FolderIndex::Indexing { .. } => centered_text(i18n.tr("gallery-indexing")),
        FolderIndex::Failed(err) => error_panel(i18n, state, err),
        FolderIndex::Ready(folders) => Row::new()
            .spacing(spacing::MD)
            .height(Length::Fill)
            .push(sidebar(i18n, state, folders))
            .push(rule::vertical(1))
            .push(content(i18n, state))
            .into(),
    };

    Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(header(i18n))
        .push(rule::horizontal(1))
        .push(body)
        .into()
}

fn header(i18n: &I18n) -> Element<'_, Message> {
    let save = button(Text::new(i18n.tr("gallery-save-button")))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::secondary)
        .on_press(Message::SaveArchiveRequested);
    let back = button(Text::new(i18n.tr("gallery-back-button")))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary)
        .on_press(Message::BackToUpload);

    Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(
            Text::new(i18n.tr("gallery-select-folder"))
                .size(typography::TITLE_MD)
                .width(Length::Fill),
        )
        .push(save)
        .push(back)
        .into()
}

fn sidebar<'a>(i18n: &I18n, state: &'a State, folders: &'a [String]) -> Element<'a, Message> {
    let list: Element<'a, Message> = if folders.is_empty() {
        Text::new(i18n.tr("gallery-no-folders"))
            .size(typography::BODY)
            .color(palette::GRAY_400)
            .into()
    } else {
        folders
            .iter()
            .fold(Column::new().spacing(spacing::XXS), |column, folder| {
                let selected = state.selected_folder() == Some(folder.as_str());
                column.push(
                    button(Text::new(folder.as_str()).size(typography::BODY))
                        .width(Length::Fill)
                        .padding([spacing::XS, spacing::SM])
                        .style(styles::button::folder(selected))
                        .on_press(Message::FolderSelected(folder.clone())),
                )
            })
            .into()
    };

    Container::new(scrollable(list))
        .width(Length::Fixed(sizing::FOLDER_SIDEBAR_WIDTH))
        .height(Length::Fill)
        .padding(spacing::XS)
        .style(styles::container::panel)
        .into()
}

fn content<'a>(i18n: &I18n, state: &'a State) -> Element<'a, Message> {
    let (Some(folder), Some(view)) = (state.selected_folder(), state.image_view()) else {
        return centered_text(i18n.tr("gallery-no-selection"));
    };

    let heading = Text::new(i18n.tr_with_args("gallery-images-heading", &[("folder", folder)]))
        .size(typography::TITLE_MD);

    let body: Element<'a, Message> = match view {
        ImageView::Decoding => centered_text(i18n.tr("gallery-decoding")),
        ImageView::Failed(err) => error_panel(i18n, state, err),
        ImageView::Ready(set) if set.is_empty() => centered_text(i18n.tr("gallery-empty-folder")),
        ImageView::Ready(set) => thumbnails(set, state.thumbnail_size()),
    };

    Column::new()
        .spacing(spacing::MD)
        .width(Length::Fill)
        .height(Length::Fill)
        .push(heading)
        .push(body)
        .into()
}

fn thumbnails(set: &ImageSet, size: u32) -> Element<'_, Message> {
    let grid = set
        .images
        .iter()
        .fold(Row::new().spacing(spacing::MD), |row, resource| {
            row.push(thumbnail(resource, size))
        })
        .wrap()
        .vertical_spacing(spacing::MD);

    scrollable(grid)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn thumbnail(resource: &ImageResource, size: u32) -> Element<'_, Message> {
    let edge = size as f32;
    let picture = image(resource.handle.clone())
        .width(Length::Fixed(edge))
        .height(Length::Fixed(edge))
        .content_fit(ContentFit::Contain);

    let caption = Column::new()
        .width(Length::Fixed(edge))
        .push(Text::new(resource.file_name()).size(typography::CAPTION))
        .push(
            Text::new(format!("{}\u{d7}{}", resource.width, resource.height))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );

    Container::new(
        Column::new()
            .spacing(spacing::XS)
            .push(picture)
            .push(caption),
    )
    .padding(spacing::XS)
    .style(styles::container::thumbnail)
    .into()
}

fn error_panel<'a>(i18n: &I18n, state: &State, err: &DecodeError) -> Element<'a, Message> {
    let display = ErrorDisplay::new(ErrorSeverity::Error)
        .title(i18n.tr("gallery-error-title"))
        .message(i18n.tr(err.i18n_key()))
        .details(err.to_string())
        .details_visible(state.show_error_details())
        .on_toggle_details(Message::ToggleErrorDetails)
        .details_labels(
            i18n.tr("gallery-error-show-details"),
            i18n.tr("gallery-error-hide-details"),
        )
        .action(i18n.tr("gallery-back-button"), Message::BackToUpload);

    crate::ui::components::error_display::centered_error_view(display)
}

fn centered_text<'a>(label: String) -> Element<'a, Message> {
    Container::new(
        Text::new(label)
            .size(typography::BODY_LG)
            .color(palette::GRAY_400),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .into()
}
