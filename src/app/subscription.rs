// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::{Message, Screen};
use iced::{event, time, Subscription};
use std::time::Duration;

const NOTIFICATION_TICK: Duration = Duration::from_millis(250);

/// File drops are only listened to on the upload screen.
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Upload => event::listen_with(|event, _status, _window_id| {
            if let event::Event::Window(iced::window::Event::FileDropped(path)) = &event {
                return Some(Message::FileDropped(path.clone()));
            }
            None
        }),
        Screen::Gallery => Subscription::none(),
    }
}

/// Periodic tick for notification auto-dismiss, active only while toasts
/// are shown.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(NOTIFICATION_TICK).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
