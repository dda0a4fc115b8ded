// Application state module
// Read-only state shared by every connection task

use std::path::PathBuf;

use super::types::Config;
use crate::http::mime::ContentTypes;

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in it mutates,
/// so handlers read it without locking.
pub struct AppState {
    pub config: Config,
    pub content_types: ContentTypes,
    /// Canonical form of `config.server.root`, used for containment checks
    pub root: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = config.server.root.canonicalize()?;
        let content_types = ContentTypes::with_overrides(&config.files.content_types);
        Ok(Self {
            config,
            content_types,
            root,
        })
    }
}

#[cfg(test)]
impl AppState {
    /// Default configuration serving `root`
    pub fn for_root(root: &std::path::Path) -> Self {
        let cli = crate::cli::Cli {
            build_folder: Some(root.to_path_buf()),
            port: None,
            config: None,
        };
        Self::new(Config::load(&cli).unwrap()).unwrap()
    }
}
