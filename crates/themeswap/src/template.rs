//! Placeholder substitution for image paths.

use crate::mode::ColorMode;

/// Marker replaced by the current mode in image templates.
pub const PLACEHOLDER: &str = "$theme";

/// An image path that may contain [`PLACEHOLDER`].
///
/// ```rust
/// use themeswap::{ColorMode, SourceTemplate};
///
/// let template = SourceTemplate::new("assets/diagram-$theme.svg");
/// assert_eq!(
///     template.resolve(ColorMode::Light).as_deref(),
///     Some("assets/diagram-light.svg"),
/// );
/// assert_eq!(SourceTemplate::new("logo.svg").resolve(ColorMode::Dark), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceTemplate(String);

impl SourceTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the template contains the placeholder.
    pub fn is_themed(&self) -> bool {
        self.0.contains(PLACEHOLDER)
    }

    /// Replaces every placeholder with `mode`.
    ///
    /// Returns `None` for templates without a placeholder; those are left
    /// alone by the synchronizer.
    pub fn resolve(&self, mode: ColorMode) -> Option<String> {
        self.is_themed()
            .then(|| self.0.replace(PLACEHOLDER, mode.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_both_modes() {
        let template = SourceTemplate::new("a/b-$theme.svg");
        assert_eq!(template.resolve(ColorMode::Light).unwrap(), "a/b-light.svg");
        assert_eq!(template.resolve(ColorMode::Dark).unwrap(), "a/b-dark.svg");
        assert_eq!(template.as_str(), "a/b-$theme.svg");
    }

    #[test]
    fn test_resolve_replaces_every_occurrence() {
        let template = SourceTemplate::new("$theme/icons/arrow-$theme.png");
        assert_eq!(
            template.resolve(ColorMode::Dark).unwrap(),
            "dark/icons/arrow-dark.png"
        );
    }

    #[test]
    fn test_plain_path_is_not_themed() {
        let template = SourceTemplate::new("a/static.png");
        assert!(!template.is_themed());
        assert_eq!(template.resolve(ColorMode::Light), None);
    }

    #[test]
    fn test_partial_placeholder_is_not_themed() {
        assert!(!SourceTemplate::new("img/$them.png").is_themed());
        assert!(!SourceTemplate::new("img/theme.png").is_themed());
    }
}
