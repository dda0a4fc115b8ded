//! MIME type detection module
//!
//! Returns the Content-Type for a file based on its logical extension, i.e.
//! the extension left once a `.br`/`.gz` compression suffix is removed.

use std::collections::HashMap;
use std::path::Path;

use super::encoding::strip_compression_suffix;

/// Content type for anything not in the table
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const BUILTIN_CONTENT_TYPES: &[(&str, &str)] = &[
    (".js", "application/javascript"),
    (".wasm", "application/wasm"),
    (".data", "application/octet-stream"),
    (".json", "application/json"),
    (".html", "text/html"),
    (".css", "text/css"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".ico", "image/x-icon"),
];

/// Extension to MIME type table
///
/// Keys are lowercased and carry their leading dot.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    table: HashMap<String, String>,
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self {
            table: BUILTIN_CONTENT_TYPES
                .iter()
                .map(|(ext, mime)| ((*ext).to_string(), (*mime).to_string()))
                .collect(),
        }
    }
}

impl ContentTypes {
    /// Built-in table extended with configured entries
    ///
    /// Configured extensions may be written with or without the leading dot
    /// and in any case; they replace built-in entries for the same extension.
    pub fn with_overrides(extra: &HashMap<String, String>) -> Self {
        let mut types = Self::default();
        for (ext, mime) in extra {
            types.table.insert(normalize_extension(ext), mime.clone());
        }
        types
    }

    /// Look up an extension such as `.js`
    pub fn get(&self, extension: &str) -> &str {
        self.table
            .get(&normalize_extension(extension))
            .map_or(DEFAULT_CONTENT_TYPE, String::as_str)
    }

    /// Content type of a file, looking through any compression suffix
    pub fn content_type_for(&self, path: &Path) -> &str {
        let (logical, _) = strip_compression_suffix(path);
        match logical.extension() {
            Some(ext) => self.get(&ext.to_string_lossy()),
            None => DEFAULT_CONTENT_TYPE,
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
