// SPDX-License-Identifier: MPL-2.0
//! UI pieces shared by both screens.
//!
//! - [`error_display`] - error panel with expandable technical details,
//!   used for gallery decode failures and inside the upload alert
//! - [`modal`] - blocking dialog layered over a screen

pub mod error_display;
pub mod modal;
