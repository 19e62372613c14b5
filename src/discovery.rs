//! Schema file discovery
//!
//! Lists the top level of the schema directory and returns the matching file
//! names in byte order, so a run is reproducible regardless of how the
//! filesystem orders its entries.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{InitError, Result};

/// A schema file selected for registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    /// File name, e.g. `order.avsc`
    pub name: String,
    /// File name without its extension, e.g. `order`
    pub stem: String,
    /// Full path to the file
    pub path: PathBuf,
}

impl SchemaFile {
    fn new(dir: &Path, name: String) -> Self {
        let path = dir.join(&name);
        let stem = Path::new(&name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&name)
            .to_string();
        Self { name, stem, path }
    }

    /// Registry subject for this file, e.g. `order-value`
    pub fn subject(&self, suffix: &str) -> String {
        format!("{}{}", self.stem, suffix)
    }
}

/// Result of scanning the schema directory
#[derive(Debug, Clone, Default)]
pub struct SchemaListing {
    /// Matching files, sorted by name
    pub files: Vec<SchemaFile>,
    /// Matching entries whose names are not valid UTF-8 and cannot be registered
    pub skipped: Vec<PathBuf>,
}

/// Find every entry in `dir` whose name ends with `suffix`, sorted by name.
///
/// A missing directory (or a path that is not a directory) is fatal; an empty
/// result is not.
pub fn find_schema_files(dir: &Path, suffix: &str) -> Result<Vec<SchemaFile>> {
    scan_schema_dir(dir, suffix).map(|listing| listing.files)
}

/// Like [`find_schema_files`], also reporting matches that had to be skipped
pub fn scan_schema_dir(dir: &Path, suffix: &str) -> Result<SchemaListing> {
    if !dir.is_dir() {
        return Err(InitError::SchemaDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let mut names = Vec::new();
    let mut skipped = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        match entry.file_name().to_str() {
            Some(name) if name.ends_with(suffix) => names.push(name.to_string()),
            Some(_) => {}
            None if entry.file_name().to_string_lossy().ends_with(suffix) => {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                skipped.push(entry.path().to_path_buf());
            }
            None => {}
        }
    }

    names.sort();
    skipped.sort();
    tracing::debug!(dir = %dir.display(), count = names.len(), "discovered schema files");

    Ok(SchemaListing {
        files: names
            .into_iter()
            .map(|name| SchemaFile::new(dir, name))
            .collect(),
        skipped,
    })
}
