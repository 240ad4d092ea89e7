use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The color theme preference. Stored as `""` for dark and `"light"` for light.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Interprets the stored preference. Anything other than `light` is the default.
    pub fn from_stored(s: &str) -> Self {
        match s.trim() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    /// The value written to storage.
    pub fn as_stored(&self) -> &'static str {
        match self {
            Theme::Dark => "",
            Theme::Light => "light",
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => f.write_str("dark"),
            Theme::Light => f.write_str("light"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_values() {
        assert_eq!(Theme::from_stored(""), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("solarized"), Theme::Dark);
        assert_eq!(Theme::Light.as_stored(), "light");
        assert_eq!(Theme::Dark.as_stored(), "");
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::from_stored(Theme::Light.toggled().as_stored()), Theme::Dark);
    }
}
