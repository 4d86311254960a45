//! Keeps image sources in step with the active theme.
//!
//! The synchronizer works in two phases:
//!
//! 1. [`start`](ThemeImageSynchronizer::start) reads the root theme token,
//!    records each image's original source as its template, and rewrites
//!    every templated image for the current mode.
//! 2. A [`ThemeWatcher`] observer is left on the root element. Each
//!    delivered batch re-reads the token and, if it differs from the last
//!    one seen, rewrites the images again.
//!
//! Templates are captured once. Images added after `start` are not picked
//! up by later theme switches.

use themeswap_dom::{
    Document, MutationObserver, MutationRecord, ObservableDocument, ObserveOptions, ObserverId,
};
use tracing::{debug, trace};

use crate::config::SyncConfig;
use crate::error::ConfigError;
use crate::mode::ColorMode;
use crate::registry::ThemeRegistry;
use crate::template::SourceTemplate;

/// Rewrites themed images and watches for theme changes.
///
/// # Example
///
/// ```rust
/// use themeswap::ThemeImageSynchronizer;
/// use themeswap::dom::{Document, MemoryDocument};
///
/// let mut doc = MemoryDocument::new().with_root_attribute("class", "navy");
/// let hero = doc.add_image([("src", "img/hero-$theme.png")]);
///
/// ThemeImageSynchronizer::default().start(&mut doc);
/// assert_eq!(doc.image_attribute(hero, "src"), Some("img/hero-dark.png"));
///
/// doc.set_root_attribute("class", "rust");
/// doc.deliver_mutations();
/// assert_eq!(doc.image_attribute(hero, "src"), Some("img/hero-light.png"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThemeImageSynchronizer {
    registry: ThemeRegistry,
    config: SyncConfig,
}

/// Result of [`ThemeImageSynchronizer::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartedSync {
    /// The installed root observer.
    pub observer: ObserverId,
    /// Mode applied by the initial pass.
    pub mode: ColorMode,
}

impl ThemeImageSynchronizer {
    pub fn new(registry: ThemeRegistry, config: SyncConfig) -> Self {
        Self { registry, config }
    }

    /// The builtin registry with the default mdBook attribute names.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Builds a synchronizer whose registry comes from the config's `themes`.
    ///
    /// # Errors
    ///
    /// Fails if the config's attribute names or theme rows are invalid.
    pub fn from_config(config: SyncConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = config.registry()?;
        Ok(Self::new(registry, config))
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Maps a theme token to a mode. Unknown tokens resolve to dark.
    pub fn resolve_mode(&self, theme: &str) -> ColorMode {
        self.registry.resolve_mode(theme)
    }

    /// Reads the current theme token from the root element.
    ///
    /// A missing attribute reads as the empty string.
    pub fn theme_token(&self, document: &dyn Document) -> String {
        let raw = document
            .root_attribute(&self.config.theme_attribute)
            .unwrap_or("");
        self.config
            .token_match
            .extract(raw, &self.registry)
            .to_string()
    }

    /// Records each image's source as its template, unless it already has one.
    ///
    /// Returns how many templates were newly recorded.
    pub fn capture_templates(&self, document: &mut dyn Document) -> usize {
        let mut captured = 0;
        for image in document.images() {
            if document
                .image_attribute(image, &self.config.template_attribute)
                .is_some()
            {
                continue;
            }
            let Some(source) = document
                .image_attribute(image, &self.config.source_attribute)
                .map(str::to_string)
            else {
                continue;
            };
            document.set_image_attribute(image, &self.config.template_attribute, &source);
            captured += 1;
        }
        captured
    }

    /// Rewrites every templated image for `mode`.
    ///
    /// Images without a template, or whose template lacks the placeholder,
    /// are untouched. Images already showing the right source are not
    /// written again. Returns how many sources changed.
    pub fn apply_mode(&self, document: &mut dyn Document, mode: ColorMode) -> usize {
        let mut rewritten = 0;
        for image in document.images() {
            let Some(template) = document
                .image_attribute(image, &self.config.template_attribute)
                .map(SourceTemplate::new)
            else {
                continue;
            };
            let Some(resolved) = template.resolve(mode) else {
                continue;
            };
            if document.image_attribute(image, &self.config.source_attribute)
                == Some(resolved.as_str())
            {
                continue;
            }
            trace!(image = image.index(), src = %resolved, "rewriting image source");
            document.set_image_attribute(image, &self.config.source_attribute, &resolved);
            rewritten += 1;
        }
        rewritten
    }

    /// Runs the initial pass and installs the theme watcher.
    ///
    /// The synchronizer moves into the observer, which lives as long as the
    /// document does.
    pub fn start<D: ObservableDocument>(self, document: &mut D) -> StartedSync {
        let baseline = self.theme_token(&*document);
        let captured = self.capture_templates(document);
        let mode = self.resolve_mode(&baseline);
        let rewritten = self.apply_mode(document, mode);
        debug!(
            theme = %baseline,
            %mode,
            captured,
            rewritten,
            "theme images initialized"
        );

        let options = ObserveOptions::attribute(self.config.theme_attribute.clone());
        let watcher = ThemeWatcher {
            sync: self,
            last_seen: baseline,
        };
        let observer = document.observe_root(options, Box::new(watcher));
        StartedSync { observer, mode }
    }
}

/// Root observer installed by [`ThemeImageSynchronizer::start`].
///
/// Batches may hold several records, or records that did not change the
/// value, so the watcher re-reads the token once per batch and compares it
/// with the last token it acted on.
#[derive(Debug)]
pub struct ThemeWatcher {
    sync: ThemeImageSynchronizer,
    last_seen: String,
}

impl ThemeWatcher {
    /// The last theme token this watcher saw.
    pub fn last_seen(&self) -> &str {
        &self.last_seen
    }
}

impl MutationObserver for ThemeWatcher {
    fn on_mutations(&mut self, records: &[MutationRecord], document: &mut dyn Document) {
        let token = self.sync.theme_token(document);
        if token == self.last_seen {
            trace!(records = records.len(), theme = %token, "theme unchanged");
            return;
        }

        let mode = self.sync.resolve_mode(&token);
        let rewritten = self.sync.apply_mode(document, mode);
        debug!(
            from = %self.last_seen,
            to = %token,
            %mode,
            rewritten,
            "theme changed"
        );
        self.last_seen = token;
    }
}
