// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for non-blocking feedback.
//!
//! Used for the "archive saved" and "upload complete" confirmations and
//! for settings that could not be read. Blocking failures (a rejected
//! upload) use the modal alert instead.
//!
//! - [`notification`] - `Notification` with its severity
//! - [`manager`] - queue and auto-dismiss lifecycle
//! - [`toast`] - rendering in the bottom-right corner
//!
//! ```ignore
//! ctx.notifications.push(Notification::success("notification-archive-saved"));
//! let overlay = Toast::view_overlay(&notifications, &i18n).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
