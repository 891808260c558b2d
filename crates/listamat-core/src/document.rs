use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;

/// An input PDF held as an immutable byte buffer.
///
/// The bytes are read once. Every extraction attempt takes its own view
/// through [`Document::view`] or [`Document::bytes`], so one stage can never
/// move a read position that another stage depends on.
#[derive(Debug, Clone)]
pub struct Document {
    bytes: Arc<[u8]>,
    name: Option<String>,
}

impl Document {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Document {
            bytes: Arc::from(bytes.into()),
            name: None,
        }
    }

    /// Read the whole stream into memory.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(Self::from_bytes(buf))
    }

    /// Read a PDF file, remembering its file name for export naming.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Ok(Document {
            bytes: Arc::from(bytes),
            name,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Source file name, if the document came from a named file or upload.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// A fresh reader positioned at offset zero.
    pub fn view(&self) -> Cursor<&[u8]> {
        Cursor::new(&self.bytes[..])
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
