// SPDX-License-Identifier: MPL-2.0
//! Error panel with consistent styling.
//!
//! Shows a severity-colored title, a user-facing message, an optional
//! action button and optional collapsible technical details.
//!
//! ```ignore
//! ErrorDisplay::new(ErrorSeverity::Error)
//!     .title(i18n.tr("gallery-error-title"))
//!     .message(i18n.tr(err.i18n_key()))
//!     .details(err.to_string())
//!     .action(i18n.tr("gallery-back-button"), Message::BackToUpload)
//!     .view()
//! ```

use crate::ui::design_tokens::{border, palette, radius, spacing, typography};
use crate::ui::styles::button as button_styles;
use iced::widget::{button, container, rule, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

const MAX_WIDTH: f32 = 500.0;

/// Severity level determines the accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorSeverity {
    /// Operation failed (red)
    #[default]
    Error,
}

impl ErrorSeverity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            ErrorSeverity::Error => palette::ERROR_500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorDisplay<Message> {
    severity: ErrorSeverity,
    title: Option<String>,
    message: Option<String>,
    details: Option<String>,
    show_details: bool,
    action_label: Option<String>,
    action_message: Option<Message>,
    toggle_details_message: Option<Message>,
    show_details_label: String,
    hide_details_label: String,
}

impl<Message> Default for ErrorDisplay<Message> {
    fn default() -> Self {
        Self {
            severity: ErrorSeverity::default(),
            title: None,
            message: None,
            details: None,
            show_details: false,
            action_label: None,
            action_message: None,
            toggle_details_message: None,
            show_details_label: "Show details".to_string(),
            hide_details_label: "Hide details".to_string(),
        }
    }
}

impl<Message: Clone + 'static> ErrorDisplay<Message> {
    #[must_use]
    pub fn new(severity: ErrorSeverity) -> Self {
        Self {
            severity,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Technical details, hidden behind a toggle.
    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn details_visible(mut self, visible: bool) -> Self {
        self.show_details = visible;
        self
    }

    #[must_use]
    pub fn action(mut self, label: impl Into<String>, message: Message) -> Self {
        self.action_label = Some(label.into());
        self.action_message = Some(message);
        self
    }

    #[must_use]
    pub fn on_toggle_details(mut self, message: Message) -> Self {
        self.toggle_details_message = Some(message);
        self
    }

    /// Sets the localized labels for the details toggle.
    #[must_use]
    pub fn details_labels(
        mut self,
        show_label: impl Into<String>,
        hide_label: impl Into<String>,
    ) -> Self {
        self.show_details_label = show_label.into();
        self.hide_details_label = hide_label.into();
        self
    }

    pub fn view(self) -> Element<'static, Message> {
        let accent_color = self.severity.color();

        let marker = Text::new("!")
            .size(typography::TITLE_LG)
            .style(move |_theme: &Theme| text::Style {
                color: Some(accent_color),
            });

        let mut content = Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .width(Length::Fill);

        if let Some(title_text) = self.title {
            content = content.push(Text::new(title_text).size(typography::TITLE_MD).style(
                move |_theme: &Theme| text::Style {
                    color: Some(accent_color),
                },
            ));
        }

        if let Some(message_text) = self.message {
            content = content.push(
                Container::new(Text::new(message_text).size(typography::BODY))
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
            );
        }

        if let (Some(label), Some(msg)) = (self.action_label, self.action_message) {
            let action_btn = button(Text::new(label))
                .on_press(msg)
                .padding([spacing::XS, spacing::LG])
                .style(button_styles::primary);
            content = content.push(
                Container::new(action_btn)
                    .padding(spacing::SM)
                    .align_x(alignment::Horizontal::Center),
            );
        }

        if let Some(details_text) = self.details {
            if let Some(toggle_msg) = self.toggle_details_message {
                let toggle_label = if self.show_details {
                    self.hide_details_label
                } else {
                    self.show_details_label
                };
                content = content.push(
                    button(Text::new(toggle_label).size(typography::CAPTION))
                        .on_press(toggle_msg)
                        .style(button_styles::secondary),
                );
            }

            if self.show_details {
                let details_body = Text::new(details_text)
                    .size(typography::CAPTION)
                    .style(|theme: &Theme| text::Style {
                        color: Some(theme.extended_palette().secondary.base.text),
                    });
                content = content.push(
                    Column::new()
                        .spacing(spacing::XS)
                        .width(Length::Fill)
                        .push(rule::horizontal(1))
                        .push(details_body),
                );
            }
        }

        let main_row = Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Top)
            .push(marker)
            .push(content);

        Container::new(main_row)
            .width(Length::Fill)
            .max_width(MAX_WIDTH)
            .padding(spacing::LG)
            .style(panel_style)
            .into()
    }
}

fn panel_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(iced::Background::Color(palette.background.weak.color)),
        border: iced::Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

/// Centers an error panel in the available space.
pub fn centered_error_view<Message: Clone + 'static>(
    error_display: ErrorDisplay<Message>,
) -> Element<'static, Message> {
    Container::new(error_display.view())
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::LG)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    enum TestMessage {
        Back,
        ToggleDetails,
    }

    #[test]
    fn default_severity_uses_error_color() {
        assert_eq!(ErrorSeverity::default().color(), palette::ERROR_500);
    }

    #[test]
    fn error_display_builder_works() {
        let display: ErrorDisplay<TestMessage> = ErrorDisplay::new(ErrorSeverity::Error)
            .title("Cannot open archive")
            .message("The processed archive is damaged.")
            .details("Invalid archive: no end of central directory")
            .details_visible(true)
            .action("Upload new files", TestMessage::Back)
            .on_toggle_details(TestMessage::ToggleDetails);

        assert_eq!(display.severity, ErrorSeverity::Error);
        assert_eq!(display.title.as_deref(), Some("Cannot open archive"));
        assert!(display.details.is_some());
        assert!(display.show_details);
        assert!(display.action_message.is_some());
    }

    #[test]
    fn details_labels_can_be_customized() {
        let display: ErrorDisplay<TestMessage> =
            ErrorDisplay::new(ErrorSeverity::Error).details_labels("Afficher", "Masquer");

        assert_eq!(display.show_details_label, "Afficher");
        assert_eq!(display.hide_details_label, "Masquer");
    }

    #[test]
    fn view_builds_without_panicking() {
        let _element: Element<'static, TestMessage> = ErrorDisplay::new(ErrorSeverity::Error)
            .title("t")
            .details("d")
            .details_visible(true)
            .on_toggle_details(TestMessage::ToggleDetails)
            .view();
    }
}
