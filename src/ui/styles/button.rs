// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn is_light(theme: &Theme) -> bool {
    !theme.extended_palette().is_dark
}

/// Main call to action ("Upload Files", dialog confirmations).
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color, shadow) = match status {
        button::Status::Active | button::Status::Pressed => {
            (palette::PRIMARY_500, palette::PRIMARY_600, shadow::SM)
        }
        button::Status::Hovered => (palette::PRIMARY_400, palette::PRIMARY_500, shadow::MD),
        button::Status::Disabled => {
            let bg = if is_light(theme) {
                palette::GRAY_200
            } else {
                palette::GRAY_700
            };
            return button::Style {
                background: Some(Background::Color(bg)),
                text_color: palette::GRAY_400,
                border: Border {
                    color: palette::GRAY_400,
                    width: border::WIDTH_SM,
                    radius: radius::SM.into(),
                },
                shadow: shadow::NONE,
                snap: true,
            };
        }
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: border_color,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

/// Secondary actions and unselected entries of a list.
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let light = is_light(theme);

    let (bg_color, text_color) = if light {
        (palette::GRAY_100, palette::GRAY_900)
    } else {
        (palette::GRAY_700, WHITE)
    };

    let (background, text_color, border_color) = match status {
        button::Status::Active | button::Status::Pressed => {
            (bg_color, text_color, palette::GRAY_400)
        }
        button::Status::Hovered => {
            let hover_bg = if light {
                palette::GRAY_200
            } else {
                Color::from_rgb(0.35, 0.35, 0.35)
            };
            (hover_bg, text_color, palette::PRIMARY_500)
        }
        button::Status::Disabled => (bg_color, palette::GRAY_400, palette::GRAY_400),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: border_color,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Folder entry in the gallery sidebar.
pub fn folder(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        if selected {
            primary(theme, status)
        } else {
            secondary(theme, status)
        }
    }
}

/// File picker slot on the upload card. A filled slot gets a green outline.
pub fn picker(filled: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let mut style = secondary(theme, status);
        if filled {
            style.border.color = palette::SUCCESS_500;
            style.border.width = border::WIDTH_MD;
        }
        if matches!(status, button::Status::Hovered) {
            style.background = Some(Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::PRIMARY_400
            }));
        }
        style.border.radius = radius::MD.into();
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_button_uses_brand_colors() {
        let style = primary(&Theme::Dark, button::Status::Active);
        assert_eq!(style.background, Some(Background::Color(palette::PRIMARY_500)));
    }

    #[test]
    fn disabled_primary_is_grayed_out() {
        let style = primary(&Theme::Light, button::Status::Disabled);
        assert_eq!(style.text_color, palette::GRAY_400);
        assert_eq!(style.shadow, shadow::NONE);
    }

    #[test]
    fn selected_folder_looks_primary() {
        let selected = folder(true)(&Theme::Light, button::Status::Active);
        let other = folder(false)(&Theme::Light, button::Status::Active);
        assert_eq!(selected.background, Some(Background::Color(palette::PRIMARY_500)));
        assert_ne!(selected.background, other.background);
    }

    #[test]
    fn filled_picker_has_success_outline() {
        let filled = picker(true)(&Theme::Dark, button::Status::Active);
        let empty = picker(false)(&Theme::Dark, button::Status::Active);
        assert_eq!(filled.border.color, palette::SUCCESS_500);
        assert_ne!(empty.border.color, palette::SUCCESS_500);
    }
}
