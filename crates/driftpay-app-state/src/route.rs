use serde::{Deserialize, Serialize};

/// Navigable surfaces of the web shell. Unrecognized paths resolve to the
/// streams overview so a stale deep link never strands the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRoute {
    MyStreams,
    Send,
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let without_query = trimmed.split('?').next().unwrap_or(trimmed);
        let without_hash = without_query.split('#').next().unwrap_or(without_query);
        let normalized = without_hash.trim_end_matches('/');
        match normalized {
            "/send" => AppRoute::Send,
            _ => AppRoute::MyStreams,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            AppRoute::MyStreams => "/streams".to_string(),
            AppRoute::Send => "/send".to_string(),
        }
    }
}

impl Default for AppRoute {
    fn default() -> Self {
        AppRoute::MyStreams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/streams"), AppRoute::MyStreams);
        assert_eq!(AppRoute::from_path("/send"), AppRoute::Send);
    }

    #[test]
    fn strips_query_hash_and_trailing_slash() {
        assert_eq!(AppRoute::from_path("/send/"), AppRoute::Send);
        assert_eq!(AppRoute::from_path("/send?from=header"), AppRoute::Send);
        assert_eq!(AppRoute::from_path("/send#form"), AppRoute::Send);
    }

    #[test]
    fn unknown_paths_fall_back_to_streams() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::MyStreams);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::MyStreams);
        assert_eq!(AppRoute::from_path(""), AppRoute::MyStreams);
    }

    #[test]
    fn path_round_trips() {
        for route in [AppRoute::MyStreams, AppRoute::Send] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }
}
