//! # Themeswap DOM - Observable Document Model
//!
//! `themeswap-dom` is the small slice of a browser document that theme-aware
//! page scripts need: a root element whose attributes can be observed, and a
//! list of image elements whose attributes can be read and rewritten.
//!
//! ## Core Concepts
//!
//! - [`Document`]: read/write access to root and image attributes
//! - [`ObservableDocument`]: subscribe to root attribute changes
//! - [`MutationObserver`]: receives batched [`MutationRecord`]s
//! - [`MemoryDocument`]: in-memory page with queued, batched delivery
//!
//! ## Delivery Model
//!
//! Mutations are never delivered synchronously. Setting a root attribute
//! queues a record; the host later calls
//! [`MemoryDocument::deliver_mutations`], which hands each observer all of its
//! pending records in one call.
//!
//! ```rust
//! use themeswap_dom::{Document, MemoryDocument, MutationRecord, ObserveOptions,
//!     ObservableDocument};
//!
//! let mut doc = MemoryDocument::new().with_root_attribute("class", "rust");
//! let img = doc.add_image([("src", "a.png")]);
//!
//! doc.observe_root(
//!     ObserveOptions::attribute("class"),
//!     Box::new(move |_: &[MutationRecord], doc: &mut dyn Document| {
//!         doc.set_image_attribute(img, "src", "b.png");
//!     }),
//! );
//!
//! doc.set_root_attribute("class", "coal");
//! assert_eq!(doc.image_attribute(img, "src"), Some("a.png"));
//!
//! doc.deliver_mutations();
//! assert_eq!(doc.image_attribute(img, "src"), Some("b.png"));
//! ```

mod document;
mod error;
mod mutation;

pub use document::{
    Attributes, Document, ImageId, MemoryDocument, ObservableDocument, PageFixture,
};
pub use error::DocumentError;
pub use mutation::{MutationKind, MutationObserver, MutationRecord, ObserveOptions, ObserverId};
