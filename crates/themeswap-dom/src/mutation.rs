//! Mutation records and the observer contract.
//!
//! Observation follows the shape of the DOM's `MutationObserver`: an observer
//! registers interest through [`ObserveOptions`], mutations are queued as
//! [`MutationRecord`]s, and the host delivers them later in batches. A batch
//! may contain records that changed nothing, so observers must compare
//! against their own last-seen state instead of trusting each record.

use crate::document::Document;

/// Handle for a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(pub(crate) usize);

/// What kind of change a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// An attribute on the observed element was set or removed.
    Attributes,
}

/// One queued change on an observed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub kind: MutationKind,
    /// Name of the attribute that was touched.
    pub attribute_name: Option<String>,
    /// Value before the mutation, when the observer asked for it.
    pub old_value: Option<String>,
}

impl MutationRecord {
    pub fn attribute(name: impl Into<String>, old_value: Option<String>) -> Self {
        Self {
            kind: MutationKind::Attributes,
            attribute_name: Some(name.into()),
            old_value,
        }
    }

    /// Returns true if this record touched the attribute `name`.
    pub fn is_attribute(&self, name: &str) -> bool {
        self.kind == MutationKind::Attributes && self.attribute_name.as_deref() == Some(name)
    }
}

/// Which mutations an observer wants to hear about.
///
/// # Example
///
/// ```rust
/// use themeswap_dom::ObserveOptions;
///
/// let options = ObserveOptions::attribute("class").with_old_value();
/// assert!(options.matches("class"));
/// assert!(!options.matches("style"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObserveOptions {
    /// Queue records for attribute changes.
    pub attributes: bool,
    /// Restrict attribute records to these names. `None` means every attribute.
    pub attribute_filter: Option<Vec<String>>,
    /// Record the previous value in [`MutationRecord::old_value`].
    pub attribute_old_value: bool,
}

impl ObserveOptions {
    /// Observe every attribute on the element.
    pub fn all_attributes() -> Self {
        Self {
            attributes: true,
            ..Self::default()
        }
    }

    /// Observe a single attribute.
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            attributes: true,
            attribute_filter: Some(vec![name.into()]),
            attribute_old_value: false,
        }
    }

    pub fn with_old_value(mut self) -> Self {
        self.attribute_old_value = true;
        self
    }

    /// Returns true if a change to attribute `name` should be queued.
    pub fn matches(&self, name: &str) -> bool {
        if !self.attributes {
            return false;
        }
        match &self.attribute_filter {
            Some(filter) => filter.iter().any(|f| f == name),
            None => true,
        }
    }
}

/// Receives batches of mutation records.
///
/// The document is handed back mutably so the observer can react by
/// rewriting other elements.
pub trait MutationObserver {
    fn on_mutations(&mut self, records: &[MutationRecord], document: &mut dyn Document);
}

impl<F> MutationObserver for F
where
    F: FnMut(&[MutationRecord], &mut dyn Document),
{
    fn on_mutations(&mut self, records: &[MutationRecord], document: &mut dyn Document) {
        self(records, document)
    }
}
