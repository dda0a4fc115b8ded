//! Pre-compressed asset detection
//!
//! Build pipelines ship assets such as `app.wasm.br` or `app.data.gz`. The
//! bytes on disk are already compressed, so the response has to carry a
//! `Content-Encoding` header and the content type of the file underneath.

use std::path::{Path, PathBuf};

/// Compression recognized from a trailing file suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Brotli,
    Gzip,
}

impl ContentEncoding {
    const ALL: [Self; 2] = [Self::Brotli, Self::Gzip];

    /// Value of the `Content-Encoding` response header
    pub const fn header_value(self) -> &'static str {
        match self {
            Self::Brotli => "br",
            Self::Gzip => "gzip",
        }
    }

    /// File name suffix marking the compression
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Brotli => ".br",
            Self::Gzip => ".gz",
        }
    }

    /// Detect the encoding from the path's suffix (case-sensitive)
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.as_os_str().to_string_lossy();
        Self::ALL
            .into_iter()
            .find(|encoding| name.ends_with(encoding.suffix()))
    }
}

/// Split a path into its logical path and the compression it is stored with
///
/// `main.js.gz` becomes (`main.js`, `Some(Gzip)`); paths without a
/// compression suffix come back unchanged with `None`.
pub fn strip_compression_suffix(path: &Path) -> (PathBuf, Option<ContentEncoding>) {
    let Some(encoding) = ContentEncoding::detect(path) else {
        return (path.to_path_buf(), None);
    };

    let mut logical = path.as_os_str().to_string_lossy().into_owned();
    logical.truncate(logical.len() - encoding.suffix().len());
    (PathBuf::from(logical), Some(encoding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            ContentEncoding::detect(Path::new("Build/app.wasm.br")),
            Some(ContentEncoding::Brotli)
        );
        assert_eq!(
            ContentEncoding::detect(Path::new("Build/app.data.gz")),
            Some(ContentEncoding::Gzip)
        );
        assert_eq!(ContentEncoding::detect(Path::new("Build/app.js")), None);
    }

    #[test]
    fn test_other_archives_not_encodings() {
        assert_eq!(ContentEncoding::detect(Path::new("bundle.zip")), None);
        assert_eq!(ContentEncoding::detect(Path::new("bundle.tgz")), None);
        assert_eq!(ContentEncoding::detect(Path::new("bundle.bro")), None);
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        assert_eq!(ContentEncoding::detect(Path::new("app.wasm.BR")), None);
        assert_eq!(ContentEncoding::detect(Path::new("app.wasm.Gz")), None);
    }

    #[test]
    fn test_header_values() {
        assert_eq!(ContentEncoding::Brotli.header_value(), "br");
        assert_eq!(ContentEncoding::Gzip.header_value(), "gzip");
    }

    #[test]
    fn test_strip_compression_suffix() {
        let (logical, encoding) = strip_compression_suffix(Path::new("/srv/Build/main.js.gz"));
        assert_eq!(logical, PathBuf::from("/srv/Build/main.js"));
        assert_eq!(encoding, Some(ContentEncoding::Gzip));

        let (logical, encoding) = strip_compression_suffix(Path::new("app.framework.js.br"));
        assert_eq!(logical, PathBuf::from("app.framework.js"));
        assert_eq!(encoding, Some(ContentEncoding::Brotli));

        let (logical, encoding) = strip_compression_suffix(Path::new("style.css"));
        assert_eq!(logical, PathBuf::from("style.css"));
        assert_eq!(encoding, None);
    }

    #[test]
    fn test_only_last_suffix_is_stripped() {
        let (logical, encoding) = strip_compression_suffix(Path::new("double.gz.br"));
        assert_eq!(logical, PathBuf::from("double.gz"));
        assert_eq!(encoding, Some(ContentEncoding::Brotli));
    }
}
