//! # Themeswap - Theme-Aware Images
//!
//! `themeswap` keeps the images of a themeable page in step with the page's
//! active theme. Pages such as mdBook books can switch between many named
//! themes (`rust`, `coal`, `mocha`, ...), but image variants are usually
//! published for just two display families: light and dark.
//!
//! ## Core Concepts
//!
//! - [`ColorMode`]: light or dark
//! - [`ThemeRegistry`]: theme name → mode, falling back to dark
//! - [`SourceTemplate`]: an image path containing the `$theme` placeholder
//! - [`SyncConfig`]: attribute names, token matching and extra themes
//! - [`ThemeImageSynchronizer`]: the initial rewrite plus a live watcher
//!
//! ## Authoring Contract
//!
//! Themed images are authored with `$theme` in their source:
//!
//! ```html
//! <img src="assets/diagram-$theme.svg">
//! ```
//!
//! On start the original source is saved to `data-rsrc` and `src` becomes
//! `assets/diagram-light.svg` or `assets/diagram-dark.svg`. Images without
//! the placeholder are never touched.
//!
//! ## Quick Start
//!
//! ```rust
//! use themeswap::{SyncConfig, ThemeImageSynchronizer};
//! use themeswap::dom::{Document, MemoryDocument};
//!
//! let config = SyncConfig::from_yaml("themes: { solarized: light }").unwrap();
//! let sync = ThemeImageSynchronizer::from_config(config).unwrap();
//!
//! let mut doc = MemoryDocument::new().with_root_attribute("class", "coal");
//! let chart = doc.add_image([("src", "chart-$theme.svg")]);
//! sync.start(&mut doc);
//! assert_eq!(doc.image_attribute(chart, "src"), Some("chart-dark.svg"));
//!
//! doc.set_root_attribute("class", "solarized");
//! doc.deliver_mutations();
//! assert_eq!(doc.image_attribute(chart, "src"), Some("chart-light.svg"));
//! ```

mod config;
mod error;
mod mode;
mod registry;
mod synchronizer;
mod template;

pub use themeswap_dom as dom;

pub use config::{SyncConfig, TokenMatch};
pub use error::ConfigError;
pub use mode::ColorMode;
pub use registry::{ThemeRegistry, FALLBACK_MODE};
pub use synchronizer::{StartedSync, ThemeImageSynchronizer, ThemeWatcher};
pub use template::{SourceTemplate, PLACEHOLDER};
