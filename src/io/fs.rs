use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::Document;
use crate::error::{Result, TomlPathError};

/// Read and parse the target file. The file must already exist; this tool
/// never creates documents from nothing.
pub fn load_document(path: &Path) -> Result<Document> {
    if !path.is_file() {
        return Err(TomlPathError::file_not_found(path));
    }
    let text = fs::read_to_string(path)?;
    Document::parse_from(&text, path)
}

/// Serialize the document and overwrite the target file atomically: the
/// content goes to a sibling temp file first, which is then renamed over
/// the original. Callers see either the old file or the new one, never a
/// partial write.
pub fn store_document(path: &Path, document: &Document) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut temp = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new_in(".")?,
    };
    temp.write_all(document.to_string().as_bytes())?;
    temp.persist(path).map_err(|e| TomlPathError::Io(e.error))?;
    Ok(())
}
