//! Theme name → display mode table.
//!
//! The registry answers one question: given whatever token the page put on
//! its root element, which image variant should be shown? It is total:
//! names it does not know (including the empty string) resolve to
//! [`FALLBACK_MODE`].
//!
//! Rows can only be added. A theme that is already registered can be added
//! again with the same mode, but never moved to the other mode.
//!
//! ```rust
//! use themeswap::{ColorMode, ThemeRegistry};
//!
//! let registry = ThemeRegistry::builtin().clone()
//!     .add("solarized", ColorMode::Light)
//!     .unwrap();
//!
//! assert_eq!(registry.resolve_mode("solarized"), ColorMode::Light);
//! assert_eq!(registry.resolve_mode("mocha"), ColorMode::Dark);
//! assert_eq!(registry.resolve_mode("not-a-theme"), ColorMode::Dark);
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::error::ConfigError;
use crate::mode::ColorMode;

/// Mode used for any theme name the registry does not know.
pub const FALLBACK_MODE: ColorMode = ColorMode::Dark;

const BUILTIN_THEMES: &[(&str, ColorMode)] = &[
    ("light", ColorMode::Light),
    ("rust", ColorMode::Light),
    ("coal", ColorMode::Dark),
    ("navy", ColorMode::Dark),
    ("ayu", ColorMode::Dark),
    ("latte", ColorMode::Light),
    ("frappe", ColorMode::Dark),
    ("macchiato", ColorMode::Dark),
    ("mocha", ColorMode::Dark),
];

static BUILTIN: Lazy<ThemeRegistry> = Lazy::new(|| ThemeRegistry {
    themes: BUILTIN_THEMES
        .iter()
        .map(|(name, mode)| (name.to_string(), *mode))
        .collect(),
});

/// Immutable mapping from theme name to [`ColorMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, ColorMode>,
}

impl ThemeRegistry {
    /// The stock themes: mdBook's five plus the four Catppuccin flavours.
    pub fn builtin() -> &'static ThemeRegistry {
        &BUILTIN
    }

    /// A registry with no rows. Every name resolves to the fallback.
    pub fn empty() -> Self {
        Self {
            themes: BTreeMap::new(),
        }
    }

    /// Parses a `name: mode` YAML mapping and adds it on top of the builtin
    /// themes.
    ///
    /// # Errors
    ///
    /// Fails if the YAML is malformed, a name is invalid, or a row would
    /// change the mode of an existing theme.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::builtin().clone().extend_from_yaml(yaml)
    }

    /// Parses a `name: mode` YAML mapping and adds its rows to this registry.
    pub fn extend_from_yaml(self, yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(self);
        }
        let rows: BTreeMap<String, ColorMode> = serde_yaml::from_str(yaml)?;
        self.extend(rows)
    }

    /// Adds every row, stopping at the first invalid one.
    pub fn extend<I>(self, rows: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, ColorMode)>,
    {
        rows.into_iter()
            .try_fold(self, |registry, (name, mode)| registry.add(name, mode))
    }

    /// Adds a theme row.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidThemeName`] for empty names, names containing
    ///   whitespace or upper-case characters.
    /// - [`ConfigError::ConflictingTheme`] if `name` is already registered
    ///   with the other mode.
    pub fn add(mut self, name: impl Into<String>, mode: ColorMode) -> Result<Self, ConfigError> {
        let name = name.into();
        if !is_valid_theme_name(&name) {
            return Err(ConfigError::InvalidThemeName(name));
        }
        match self.themes.get(&name) {
            Some(&existing) if existing != mode => Err(ConfigError::ConflictingTheme {
                name,
                existing,
                requested: mode,
            }),
            Some(_) => Ok(self),
            None => {
                self.themes.insert(name, mode);
                Ok(self)
            }
        }
    }

    /// Looks up the mode for `theme`. Lookups are exact and case-sensitive.
    pub fn get(&self, theme: &str) -> Option<ColorMode> {
        self.themes.get(theme).copied()
    }

    pub fn contains(&self, theme: &str) -> bool {
        self.themes.contains_key(theme)
    }

    /// Resolves any string to a mode, falling back to [`FALLBACK_MODE`].
    pub fn resolve_mode(&self, theme: &str) -> ColorMode {
        self.get(theme).unwrap_or(FALLBACK_MODE)
    }

    /// Iterates over all rows, sorted by name.
    pub fn themes(&self) -> impl Iterator<Item = (&str, ColorMode)> {
        self.themes.iter().map(|(name, mode)| (name.as_str(), *mode))
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn is_valid_theme_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.len(), 9);
        for (name, mode) in BUILTIN_THEMES {
            assert_eq!(registry.resolve_mode(name), *mode, "theme {}", name);
        }
    }

    #[test]
    fn test_unknown_names_fall_back_to_dark() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.resolve_mode(""), ColorMode::Dark);
        assert_eq!(registry.resolve_mode("solarized"), ColorMode::Dark);
        assert_eq!(registry.resolve_mode("light "), ColorMode::Dark);
        assert_eq!(registry.resolve_mode("🌙"), ColorMode::Dark);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.get("Rust"), None);
        assert_eq!(registry.resolve_mode("Rust"), ColorMode::Dark);
        assert_eq!(registry.resolve_mode("rust"), ColorMode::Light);
    }

    #[test]
    fn test_empty_registry_resolves_everything_to_fallback() {
        let registry = ThemeRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.resolve_mode("light"), FALLBACK_MODE);
    }

    #[test]
    fn test_add_new_theme() {
        let registry = ThemeRegistry::default()
            .add("gruvbox-light", ColorMode::Light)
            .unwrap();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.resolve_mode("gruvbox-light"), ColorMode::Light);
    }

    #[test]
    fn test_add_same_row_is_noop() {
        let registry = ThemeRegistry::default().add("coal", ColorMode::Dark).unwrap();
        assert_eq!(registry, *ThemeRegistry::builtin());
    }

    #[test]
    fn test_add_conflicting_row_fails() {
        let err = ThemeRegistry::default()
            .add("coal", ColorMode::Light)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ConflictingTheme {
                existing: ColorMode::Dark,
                requested: ColorMode::Light,
                ..
            }
        ));
    }

    #[test]
    fn test_add_rejects_invalid_names() {
        for name in ["", "Nord", "two words", "tab\t"] {
            let err = ThemeRegistry::empty().add(name, ColorMode::Dark).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidThemeName(_)), "{:?}", name);
        }
    }

    #[test]
    fn test_from_yaml_extends_builtin() {
        let registry = ThemeRegistry::from_yaml(
            r#"
solarized: light
dracula: dark
"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 11);
        assert_eq!(registry.resolve_mode("solarized"), ColorMode::Light);
        assert_eq!(registry.resolve_mode("dracula"), ColorMode::Dark);
        assert_eq!(registry.resolve_mode("latte"), ColorMode::Light);
    }

    #[test]
    fn test_from_yaml_empty_is_builtin() {
        assert_eq!(ThemeRegistry::from_yaml("  \n").unwrap(), *ThemeRegistry::builtin());
    }

    #[test]
    fn test_from_yaml_rejects_bad_mode() {
        let err = ThemeRegistry::from_yaml("solarized: sepia").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_themes_are_sorted() {
        let names: Vec<_> = ThemeRegistry::builtin().themes().map(|(n, _)| n).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
