//! Serialization with a byte-accurate cross-reference table.

use crate::error::{Error, Result};
use crate::model::{Document, ObjectId};

/// PDF version written in the header.
pub const PDF_VERSION: &str = "1.4";

/// Comment line following the version line; its high bytes mark the file
/// as binary.
pub const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

/// Append the file header: `%PDF-<version>` plus the binary marker.
pub fn write_header(out: &mut Vec<u8>) {
    out.extend_from_slice(format!("%PDF-{}\n", PDF_VERSION).as_bytes());
    out.extend_from_slice(BINARY_MARKER);
}

/// Width of one xref entry in bytes, including its end-of-line.
pub const XREF_ENTRY_LEN: usize = 20;

/// Byte position of every object's `N 0 obj` marker, indexed by identifier.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: Vec<usize>,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the offset of the next object. Objects must be recorded in
    /// ascending identifier order starting at 1.
    pub fn record(&mut self, id: ObjectId, offset: usize) -> Result<()> {
        let expected = self.offsets.len() as u32 + 1;
        if id.get() != expected {
            return Err(Error::Corrupted(format!(
                "object {} written out of order (expected {})",
                id.get(),
                expected
            )));
        }
        self.offsets.push(offset);
        Ok(())
    }

    /// Offset recorded for `id`.
    pub fn get(&self, id: ObjectId) -> Option<usize> {
        let index = (id.get() as usize).checked_sub(1)?;
        self.offsets.get(index).copied()
    }

    /// Number of recorded objects.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Append the `xref` section: the free-list head plus one in-use entry
    /// per object.
    pub fn write_table(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(format!("xref\n0 {}\n", self.offsets.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &self.offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
    }
}

/// Serialize a validated document into a complete PDF byte buffer.
pub fn serialize(doc: &Document) -> Result<Vec<u8>> {
    doc.validate()?;

    let mut out = Vec::with_capacity(4096);
    write_header(&mut out);

    let mut offsets = OffsetTable::new();
    for (id, object) in doc.objects() {
        offsets.record(id, out.len())?;
        log::trace!("object {} ({}) at byte {}", id.get(), object.kind(), out.len());

        out.extend_from_slice(format!("{} 0 obj\n", id.get()).as_bytes());
        object.write_body(&mut out);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    offsets.write_table(&mut out);

    let mut trailer = format!(
        "trailer\n<< /Size {} /Root {}",
        offsets.len() + 1,
        doc.root
    );
    if let Some(info) = doc.info {
        trailer.push_str(&format!(" /Info {}", info));
    }
    trailer.push_str(&format!(" >>\nstartxref\n{}\n%%EOF\n", xref_offset));
    out.extend_from_slice(trailer.as_bytes());

    log::debug!(
        "serialized {} objects, {} bytes, xref at {}",
        offsets.len(),
        out.len(),
        xref_offset
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PdfObject;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn minimal() -> Document {
        let mut doc = Document::new(ObjectId(1));
        doc.insert(ObjectId(1), PdfObject::Catalog { pages: ObjectId(2) })
            .unwrap();
        doc.insert(ObjectId(2), PdfObject::PageTree { kids: vec![] })
            .unwrap();
        doc
    }

    #[test]
    fn test_offset_table_order() {
        let mut table = OffsetTable::new();
        table.record(ObjectId(1), 15).unwrap();
        assert!(table.record(ObjectId(3), 40).is_err());
        assert_eq!(table.get(ObjectId(1)), Some(15));
        assert_eq!(table.get(ObjectId(0)), None);
    }

    #[test]
    fn test_xref_entries_are_fixed_width() {
        let mut table = OffsetTable::new();
        table.record(ObjectId(1), 15).unwrap();
        table.record(ObjectId(2), 1234567).unwrap();
        let mut out = Vec::new();
        table.write_table(&mut out);

        let text = String::from_utf8(out).unwrap();
        let entries: Vec<&str> = text.split_inclusive('\n').skip(2).collect();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.len() == XREF_ENTRY_LEN));
        assert_eq!(entries[0], "0000000000 65535 f \n");
        assert_eq!(entries[2], "0001234567 00000 n \n");
    }

    #[test]
    fn test_serialize_minimal() {
        let bytes = serialize(&minimal()).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let mut header = Vec::new();
        write_header(&mut header);
        assert_eq!(header, b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        assert_eq!(find(&bytes, b"1 0 obj"), Some(header.len()));

        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("trailer\n<< /Size 3 /Root 1 0 R >>"));

        let xref_at = find(&bytes, b"xref\n").unwrap();
        assert!(text.ends_with(&format!("startxref\n{}\n%%EOF\n", xref_at)));
    }

    #[test]
    fn test_serialize_rejects_invalid_graph() {
        let mut doc = minimal();
        doc.insert(
            ObjectId(3),
            PdfObject::PageTree {
                kids: vec![ObjectId(12)],
            },
        )
        .unwrap();
        assert!(matches!(serialize(&doc), Err(Error::MissingObject(_))));
    }
}
