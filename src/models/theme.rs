use serde::{Deserialize, Serialize};
use std::fmt;

/// Light/dark display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored value. Anything other than the two literals is unset.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Terminal background hint from `COLORFGBG` ("fg;bg"); light when unknown
    pub fn system_default() -> Self {
        std::env::var("COLORFGBG")
            .ok()
            .map(|value| Self::from_colorfgbg(&value))
            .unwrap_or(Theme::Light)
    }

    fn from_colorfgbg(value: &str) -> Self {
        // ANSI colors 0-6 and 8 are dark backgrounds
        match value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()) {
            Some(0..=6) | Some(8) => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
