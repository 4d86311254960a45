//! The document abstraction and its in-memory implementation.
//!
//! [`Document`] is the read/write surface a page script needs: attributes on
//! the root element and on image elements. [`ObservableDocument`] adds the
//! ability to subscribe to root attribute changes.
//!
//! [`MemoryDocument`] models a rendered page. External actors mutate its root
//! element through [`MemoryDocument::set_root_attribute`]; the resulting
//! records sit in a queue until the host runs its event-queue checkpoint with
//! [`MemoryDocument::deliver_mutations`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::DocumentError;
use crate::mutation::{MutationObserver, MutationRecord, ObserveOptions, ObserverId};

/// Attribute name → value map for a single element.
pub type Attributes = BTreeMap<String, String>;

/// Handle for an image element inside one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(usize);

impl ImageId {
    /// Position of the image in document order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A live document with a root element and image elements.
pub trait Document {
    /// Reads an attribute from the root element.
    fn root_attribute(&self, name: &str) -> Option<&str>;

    /// Returns every image element, in document order.
    ///
    /// This is a snapshot: images added afterwards are not included.
    fn images(&self) -> Vec<ImageId>;

    fn image_attribute(&self, image: ImageId, name: &str) -> Option<&str>;

    fn set_image_attribute(&mut self, image: ImageId, name: &str, value: &str);
}

/// A document whose root element can be observed.
pub trait ObservableDocument: Document {
    /// Installs `observer` on the root element.
    ///
    /// The subscription lives as long as the document.
    fn observe_root(
        &mut self,
        options: ObserveOptions,
        observer: Box<dyn MutationObserver>,
    ) -> ObserverId;
}

/// Serializable description of a page: root attributes plus images.
///
/// ```yaml
/// root:
///   class: navy
/// images:
///   - { id: hero, src: "img/hero-$theme.png" }
///   - { id: logo, src: img/logo.svg }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub root: Attributes,
    #[serde(default)]
    pub images: Vec<Attributes>,
}

struct Registration {
    id: ObserverId,
    options: ObserveOptions,
    // Taken out while the observer runs.
    observer: Option<Box<dyn MutationObserver>>,
    pending: Vec<MutationRecord>,
}

/// In-memory document with queued, batched mutation delivery.
///
/// # Example
///
/// ```rust
/// use themeswap_dom::{Document, MemoryDocument, MutationRecord, ObserveOptions,
///     ObservableDocument};
///
/// let mut doc = MemoryDocument::new().with_root_attribute("class", "light");
/// doc.observe_root(
///     ObserveOptions::attribute("class"),
///     Box::new(|records: &[MutationRecord], _doc: &mut dyn Document| {
///         assert_eq!(records.len(), 2);
///     }),
/// );
///
/// doc.set_root_attribute("class", "coal");
/// doc.set_root_attribute("class", "navy");
/// assert_eq!(doc.deliver_mutations(), 1);
/// ```
#[derive(Default)]
pub struct MemoryDocument {
    root: Attributes,
    images: Vec<Attributes>,
    registrations: Vec<Registration>,
    next_observer: usize,
}

impl MemoryDocument {
    /// Creates an empty document with no root attributes and no images.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from a [`PageFixture`].
    pub fn from_fixture(fixture: PageFixture) -> Self {
        Self {
            root: fixture.root,
            images: fixture.images,
            ..Self::default()
        }
    }

    /// Parses a YAML page fixture.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if the text is not a valid fixture.
    pub fn from_yaml(yaml: &str) -> Result<Self, DocumentError> {
        let fixture: PageFixture = serde_yaml::from_str(yaml)?;
        Ok(Self::from_fixture(fixture))
    }

    /// Sets a root attribute before anything observes the document.
    pub fn with_root_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.root.insert(name.into(), value.into());
        self
    }

    /// Appends an image element with the given attributes.
    pub fn add_image<I, K, V>(&mut self, attributes: I) -> ImageId
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.images.push(attributes);
        ImageId(self.images.len() - 1)
    }

    /// Finds the first image whose `id` attribute equals `id`.
    pub fn find_image(&self, id: &str) -> Option<ImageId> {
        self.images
            .iter()
            .position(|attrs| attrs.get("id").map(String::as_str) == Some(id))
            .map(ImageId)
    }

    /// Sets a root attribute as an external actor would.
    ///
    /// A record is queued for every matching observer, even if the value did
    /// not change. Nothing is delivered until [`deliver_mutations`](Self::deliver_mutations).
    pub fn set_root_attribute(&mut self, name: &str, value: impl Into<String>) {
        let old = self.root.insert(name.to_string(), value.into());
        self.queue_root_mutation(name, old);
    }

    /// Removes a root attribute. Removing a missing attribute queues nothing.
    pub fn remove_root_attribute(&mut self, name: &str) {
        if let Some(old) = self.root.remove(name) {
            self.queue_root_mutation(name, Some(old));
        }
    }

    /// Returns true if any observer has undelivered records.
    pub fn has_pending_mutations(&self) -> bool {
        self.registrations.iter().any(|r| !r.pending.is_empty())
    }

    /// Delivers every queued batch.
    ///
    /// Each observer with pending records is invoked once with all of them,
    /// in registration order. Records queued while observers run are
    /// delivered before this returns. Returns the number of callbacks made.
    pub fn deliver_mutations(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(index) = self
            .registrations
            .iter()
            .position(|r| !r.pending.is_empty() && r.observer.is_some())
        {
            let registration = &mut self.registrations[index];
            let id = registration.id;
            let records = std::mem::take(&mut registration.pending);
            if let Some(mut observer) = registration.observer.take() {
                trace!(observer = id.0, records = records.len(), "delivering mutations");
                observer.on_mutations(&records, self);
                self.registrations[index].observer = Some(observer);
                delivered += 1;
            }
        }
        delivered
    }

    /// Captures the current root and image attributes.
    pub fn snapshot(&self) -> PageFixture {
        PageFixture {
            root: self.root.clone(),
            images: self.images.clone(),
        }
    }

    fn queue_root_mutation(&mut self, name: &str, old: Option<String>) {
        for registration in &mut self.registrations {
            if registration.options.matches(name) {
                let old_value = if registration.options.attribute_old_value {
                    old.clone()
                } else {
                    None
                };
                registration
                    .pending
                    .push(MutationRecord::attribute(name, old_value));
            }
        }
    }
}

impl Document for MemoryDocument {
    fn root_attribute(&self, name: &str) -> Option<&str> {
        self.root.get(name).map(String::as_str)
    }

    fn images(&self) -> Vec<ImageId> {
        (0..self.images.len()).map(ImageId).collect()
    }

    fn image_attribute(&self, image: ImageId, name: &str) -> Option<&str> {
        self.images
            .get(image.0)
            .and_then(|attrs| attrs.get(name))
            .map(String::as_str)
    }

    fn set_image_attribute(&mut self, image: ImageId, name: &str, value: &str) {
        if let Some(attrs) = self.images.get_mut(image.0) {
            attrs.insert(name.to_string(), value.to_string());
        }
    }
}

impl ObservableDocument for MemoryDocument {
    fn observe_root(
        &mut self,
        options: ObserveOptions,
        observer: Box<dyn MutationObserver>,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.registrations.push(Registration {
            id,
            options,
            observer: Some(observer),
            pending: Vec::new(),
        });
        id
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("root", &self.root)
            .field("images", &self.images)
            .field("observers", &self.registrations.len())
            .finish()
    }
}
