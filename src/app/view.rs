// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{Message, Screen};
use crate::i18n::fluent::I18n;
use crate::ui::gallery;
use crate::ui::notifications::{self, Toast};
use crate::ui::upload;
use iced::widget::{stack, Container};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub upload: &'a upload::State,
    pub gallery: Option<&'a gallery::State>,
    pub notifications: &'a notifications::Manager,
}

/// Renders the current screen with the toast overlay on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;

    let current_view: Element<'_, Message> = match (ctx.screen, ctx.gallery) {
        (Screen::Upload, _) => upload::view(upload::ViewContext {
            i18n,
            state: ctx.upload,
        })
        .map(Message::Upload),
        (Screen::Gallery, Some(state)) => {
            gallery::view(gallery::ViewContext { i18n, state }).map(Message::Gallery)
        }
        (Screen::Gallery, None) => {
            gallery::empty_state::view(i18n).map(Message::Gallery)
        }
    };

    let screen = Container::new(current_view)
        .width(Length::Fill)
        .height(Length::Fill);

    let overlay = Toast::view_overlay(ctx.notifications, i18n).map(Message::Notification);

    stack![screen, overlay].into()
}
