//! Display modes.
//!
//! Every theme belongs to one of two display families. Image variants are
//! published per family, not per theme, so the mode is what ends up in the
//! rewritten image path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The display family a theme belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light background, dark text.
    Light,
    /// Dark background, light text. Also the fallback for unknown themes.
    #[default]
    Dark,
}

impl ColorMode {
    /// The string substituted for the placeholder in image templates.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        assert_eq!(ColorMode::default(), ColorMode::Dark);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ColorMode::Light.to_string(), "light");
        assert_eq!(ColorMode::Dark.to_string(), "dark");
    }

    #[test]
    fn test_from_str_accepts_lowercase() {
        assert_eq!("light".parse::<ColorMode>().unwrap(), ColorMode::Light);
        assert_eq!("dark".parse::<ColorMode>().unwrap(), ColorMode::Dark);
    }

    #[test]
    fn test_from_str_is_case_sensitive_like_serde() {
        assert!(matches!(
            "Light".parse::<ColorMode>(),
            Err(ConfigError::UnknownMode(_))
        ));
        assert!(serde_yaml::from_str::<ColorMode>("Light").is_err());
        assert_eq!(
            serde_yaml::from_str::<ColorMode>("light").unwrap(),
            "light".parse::<ColorMode>().unwrap()
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "sepia".parse::<ColorMode>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode(ref m) if m == "sepia"));
    }
}
