use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Social platform a community was collected from.
///
/// Variant order is the canonical output order: Reddit rows first, then
/// Discord, Instagram and Facebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    Reddit,
    Discord,
    Instagram,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Reddit,
        Platform::Discord,
        Platform::Instagram,
        Platform::Facebook,
    ];

    /// Lowercase tag used as the `community_id` prefix.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Discord => "discord",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Reddit => write!(f, "Reddit"),
            Platform::Discord => write!(f, "Discord"),
            Platform::Instagram => write!(f, "Instagram"),
            Platform::Facebook => write!(f, "Facebook"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reddit" => Ok(Platform::Reddit),
            "discord" => Ok(Platform::Discord),
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            other => Err(ConfigError::Validation(format!("unknown platform '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Reddit".parse::<Platform>().unwrap(), Platform::Reddit);
        assert_eq!(" discord ".parse::<Platform>().unwrap(), Platform::Discord);
        assert_eq!("INSTAGRAM".parse::<Platform>().unwrap(), Platform::Instagram);
    }

    #[test]
    fn parse_unknown_platform_fails() {
        let err = "myspace".parse::<Platform>().unwrap_err();
        assert!(err.to_string().contains("myspace"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for platform in Platform::ALL {
            assert_eq!(platform.to_string().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn all_is_in_canonical_order() {
        let mut sorted = Platform::ALL;
        sorted.sort();
        assert_eq!(sorted, Platform::ALL);
    }
}
