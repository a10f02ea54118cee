//! Application theme names.

use serde::{Deserialize, Serialize};

/// Known application themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
    /// Warm sand theme.
    Sand,
    /// Green forest theme.
    Forest,
}

impl ThemeName {
    /// All known themes.
    pub const ALL: [Self; 4] = [Self::Light, Self::Dark, Self::Sand, Self::Forest];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Sand => "sand",
            Self::Forest => "forest",
        }
    }

    /// Parses a theme name, falling back to the default for unknown names.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
