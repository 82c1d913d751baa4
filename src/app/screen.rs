// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Upload,
    Gallery,
}

impl Screen {
    /// Route path of the screen, as accepted by `--route`.
    #[must_use]
    pub fn route(self) -> &'static str {
        match self {
            Screen::Upload => "/",
            Screen::Gallery => "/gallery",
        }
    }

    /// Parses a route path. A trailing slash is tolerated.
    #[must_use]
    pub fn from_route(route: &str) -> Option<Self> {
        let trimmed = route.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        [Screen::Upload, Screen::Gallery]
            .into_iter()
            .find(|screen| screen.route() == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_round_trip() {
        for screen in [Screen::Upload, Screen::Gallery] {
            assert_eq!(Screen::from_route(screen.route()), Some(screen));
        }
    }

    #[test]
    fn trailing_slash_is_accepted() {
        assert_eq!(Screen::from_route("/gallery/"), Some(Screen::Gallery));
        assert_eq!(Screen::from_route(""), Some(Screen::Upload));
    }

    #[test]
    fn unknown_route_is_rejected() {
        assert_eq!(Screen::from_route("/settings"), None);
    }
}
