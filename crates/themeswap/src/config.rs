//! Synchronizer configuration.
//!
//! Every field has a default matching what mdBook pages use, so an empty
//! document is a valid configuration:
//!
//! ```yaml
//! theme_attribute: class        # root attribute holding the theme token
//! template_attribute: data-rsrc # image attribute storing the template
//! source_attribute: src         # image attribute that gets rewritten
//! token_match: whole            # or: class_list
//! themes:                       # rows added to the builtin registry
//!   solarized: light
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mode::ColorMode;
use crate::registry::ThemeRegistry;

/// How the theme token is read out of the root attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenMatch {
    /// The whole attribute value is the token.
    #[default]
    Whole,
    /// The attribute is a class list; the token is the first class the
    /// registry knows. No known class yields the empty token.
    ClassList,
}

impl TokenMatch {
    /// Extracts the theme token from a raw attribute value.
    pub fn extract<'a>(self, raw: &'a str, registry: &ThemeRegistry) -> &'a str {
        match self {
            TokenMatch::Whole => raw,
            TokenMatch::ClassList => raw
                .split_whitespace()
                .find(|class| registry.contains(class))
                .unwrap_or(""),
        }
    }
}

/// Attribute names and registry extensions for a synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub theme_attribute: String,
    pub template_attribute: String,
    pub source_attribute: String,
    pub token_match: TokenMatch,
    pub themes: BTreeMap<String, ColorMode>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            theme_attribute: "class".to_string(),
            template_attribute: "data-rsrc".to_string(),
            source_attribute: "src".to_string(),
            token_match: TokenMatch::Whole,
            themes: BTreeMap::new(),
        }
    }
}

impl SyncConfig {
    /// Parses a YAML configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML or unknown fields,
    /// [`ConfigError::InvalidAttribute`] for unusable attribute names, and the
    /// registry errors of [`ThemeRegistry::add`] for bad `themes` rows.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SyncConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.registry()?;
        Ok(config)
    }

    /// Checks the attribute names.
    ///
    /// Names must be non-empty, and the template must live in its own
    /// attribute: if it shared one with the rewritten source, the first
    /// rewrite would overwrite the placeholder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, name) in [
            ("theme_attribute", &self.theme_attribute),
            ("template_attribute", &self.template_attribute),
            ("source_attribute", &self.source_attribute),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidAttribute {
                    field,
                    message: "attribute name is empty".to_string(),
                });
            }
        }
        if self.template_attribute == self.source_attribute {
            return Err(ConfigError::InvalidAttribute {
                field: "template_attribute",
                message: format!(
                    "'{}' is also the source attribute",
                    self.template_attribute
                ),
            });
        }
        Ok(())
    }

    /// Builds the registry: builtin themes plus the configured rows.
    pub fn registry(&self) -> Result<ThemeRegistry, ConfigError> {
        ThemeRegistry::builtin().clone().extend(
            self.themes
                .iter()
                .map(|(name, mode)| (name.clone(), *mode)),
        )
    }
}
