//! Document-level types.

use super::{ObjectId, Page, PdfObject};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An assembled PDF object graph, ready for serialization.
///
/// Objects are kept in identifier order, which is also emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    objects: BTreeMap<ObjectId, PdfObject>,

    /// Logical pages in rendering order
    pub pages: Vec<Page>,

    /// Catalog identifier, written as the trailer's `/Root`
    pub root: ObjectId,

    /// Information dictionary identifier, if metadata was supplied
    pub info: Option<ObjectId>,
}

impl Document {
    /// Create an empty document whose catalog will live at `root`.
    pub fn new(root: ObjectId) -> Self {
        Self {
            objects: BTreeMap::new(),
            pages: Vec::new(),
            root,
            info: None,
        }
    }

    /// Insert an object body under `id`.
    pub fn insert(&mut self, id: ObjectId, object: PdfObject) -> Result<()> {
        if self.objects.contains_key(&id) {
            return Err(Error::Corrupted(format!("object {} defined twice", id.get())));
        }
        self.objects.insert(id, object);
        Ok(())
    }

    /// Get an object by identifier.
    pub fn get(&self, id: ObjectId) -> Option<&PdfObject> {
        self.objects.get(&id)
    }

    /// Iterate objects in ascending identifier order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &PdfObject)> {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    /// Number of indirect objects (excluding the xref free entry).
    pub fn object_count(&self) -> u32 {
        self.objects.len() as u32
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check the structural invariants the serializer depends on.
    ///
    /// Identifiers must run 1..=N without gaps, the root must be a catalog,
    /// and every reference must resolve.
    pub fn validate(&self) -> Result<()> {
        for (expected, id) in (1..).zip(self.objects.keys()) {
            if id.get() != expected {
                return Err(Error::Corrupted(format!(
                    "object numbering gap: expected {}, found {}",
                    expected,
                    id.get()
                )));
            }
        }

        match self.objects.get(&self.root) {
            Some(PdfObject::Catalog { .. }) => {}
            Some(other) => {
                return Err(Error::Corrupted(format!(
                    "root {} is a {}, not a catalog",
                    self.root.get(),
                    other.kind()
                )))
            }
            None => return Err(Error::MissingObject(format!("catalog {}", self.root.get()))),
        }

        if let Some(info) = self.info {
            if !matches!(self.objects.get(&info), Some(PdfObject::Info(_))) {
                return Err(Error::MissingObject(format!("info {}", info.get())));
            }
        }

        for (id, object) in &self.objects {
            for target in object.references() {
                if !self.objects.contains_key(&target) {
                    return Err(Error::MissingObject(format!(
                        "{} {} references {}",
                        object.kind(),
                        id.get(),
                        target
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Document metadata written to the information dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata with just a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// True when no field is set, in which case no info dictionary is written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
            && self.created.is_none()
            && self.modified.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaBox;

    fn minimal() -> Document {
        let mut doc = Document::new(ObjectId(1));
        doc.insert(ObjectId(1), PdfObject::Catalog { pages: ObjectId(2) })
            .unwrap();
        doc.insert(ObjectId(2), PdfObject::PageTree { kids: vec![] })
            .unwrap();
        doc
    }

    #[test]
    fn test_validate_ok() {
        let doc = minimal();
        assert!(doc.validate().is_ok());
        assert_eq!(doc.object_count(), 2);
    }

    #[test]
    fn test_validate_dangling_reference() {
        let mut doc = minimal();
        doc.insert(
            ObjectId(3),
            PdfObject::Page {
                parent: ObjectId(2),
                media_box: MediaBox::LETTER,
                contents: ObjectId(9),
                font: ObjectId(2),
            },
        )
        .unwrap();
        assert!(matches!(doc.validate(), Err(Error::MissingObject(_))));
    }

    #[test]
    fn test_validate_gap() {
        let mut doc = minimal();
        doc.insert(ObjectId(4), PdfObject::PageTree { kids: vec![] })
            .unwrap();
        assert!(matches!(doc.validate(), Err(Error::Corrupted(_))));
    }

    #[test]
    fn test_validate_root_must_be_catalog() {
        let mut doc = minimal();
        doc.root = ObjectId(2);
        assert!(matches!(doc.validate(), Err(Error::Corrupted(_))));
    }

    #[test]
    fn test_duplicate_insert() {
        let mut doc = minimal();
        let result = doc.insert(ObjectId(2), PdfObject::PageTree { kids: vec![] });
        assert!(result.is_err());
    }

    #[test]
    fn test_metadata_is_empty() {
        assert!(Metadata::default().is_empty());
        assert!(!Metadata::with_title("Resume").is_empty());
    }
}
