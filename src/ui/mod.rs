// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! screen owns a `State`, turns its `Message`s into an `Event` for the
//! application, and renders from a `ViewContext`.
//!
//! # Screens
//!
//! - [`upload`] - Pick the portrait and candid archives and submit them
//! - [`gallery`] - Browse the processed archive folder by folder
//!
//! # Shared Infrastructure
//!
//! - [`components`] - Error panel and modal dialog
//! - [`styles`] - Button and container styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode
//! - [`notifications`] - Toast notifications for non-blocking feedback

pub mod components;
pub mod design_tokens;
pub mod gallery;
pub mod notifications;
pub mod styles;
pub mod theming;
pub mod upload;
