// SPDX-License-Identifier: MPL-2.0
//! Blocking dialog drawn above a screen.
//!
//! The backdrop dims the screen and swallows every click, so the only way
//! out is an action inside the dialog card.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing};
use iced::widget::{center, container, mouse_area, opaque, stack, Container};
use iced::{Background, Color, Element, Length, Theme};

/// Layers `dialog` over `base` behind a dimmed, click-blocking backdrop.
pub fn modal<'a, Message: Clone + 'a>(
    base: impl Into<Element<'a, Message>>,
    dialog: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let card = Container::new(dialog)
        .width(Length::Fixed(sizing::MODAL_WIDTH))
        .padding(spacing::LG)
        .style(card_style);

    let backdrop = center(opaque(card)).style(backdrop_style);

    stack![base.into(), opaque(mouse_area(backdrop))].into()
}

fn backdrop_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

fn card_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: iced::Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::LG,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}
