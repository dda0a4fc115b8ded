// Configuration module entry point
// Builds the immutable server configuration and runs the pre-flight check

mod state;
mod types;

use std::net::{IpAddr, SocketAddr};

use crate::cli::Cli;
use crate::error::StartupError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig};

pub const DEFAULT_ROOT: &str = "Builds/WebGL";
pub const DEFAULT_PORT: u16 = 8080;

impl Config {
    /// Build configuration from defaults, the optional config file and the
    /// command line, in increasing order of precedence
    pub fn load(cli: &Cli) -> Result<Self, StartupError> {
        let mut builder = ::config::Config::builder()
            .set_default("server.root", DEFAULT_ROOT)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.host", "0.0.0.0")?
            .set_default("files.entry_file", "index.html")?
            .set_default("files.index_files", vec!["index.html", "index.htm"])?
            .set_default("files.directory_listing", true)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?;

        if let Some(path) = &cli.config {
            builder = builder.add_source(::config::File::from(path.as_path()).required(true));
        }

        let settings = builder
            .set_override_option(
                "server.root",
                cli.build_folder
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let ip: IpAddr = self.server.host.parse().map_err(|e| {
            StartupError::InvalidAddress(format!("'{}': {e}", self.server.host))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Fail fast when the build directory has no entry document
    pub fn check_entry_file(&self) -> Result<(), StartupError> {
        if self.server.root.join(&self.files.entry_file).is_file() {
            Ok(())
        } else {
            Err(StartupError::MissingEntryFile {
                root: self.server.root.clone(),
                entry: self.files.entry_file.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn cli(build_folder: Option<PathBuf>, port: Option<u16>, config: Option<PathBuf>) -> Cli {
        Cli {
            build_folder,
            port,
            config,
        }
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::load(&cli(None, None, None)).unwrap();
        assert_eq!(cfg.server.root, PathBuf::from(DEFAULT_ROOT));
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.server.workers.is_none());
        assert_eq!(cfg.files.entry_file, "index.html");
        assert_eq!(cfg.files.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.files.directory_listing);
        assert!(cfg.files.content_types.is_empty());
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
    }

    #[test]
    fn test_cli_overrides() {
        let cfg = Config::load(&cli(Some(PathBuf::from("dist")), Some(9000), None)).unwrap();
        assert_eq!(cfg.server.root, PathBuf::from("dist"));
        assert_eq!(cfg.server.port, 9000);
    }

    #[test]
    fn test_config_file_and_precedence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("serve.toml");
        std::fs::write(
            &path,
            r#"
[server]
root = "from-file"
port = 7000
workers = 2

[files]
directory_listing = false

[files.content_types]
mjs = "application/javascript"

[logging]
access_log_format = "json"
"#,
        )
        .unwrap();

        let cfg = Config::load(&cli(None, Some(9100), Some(path))).unwrap();
        assert_eq!(cfg.server.root, PathBuf::from("from-file"));
        // Command line wins over the file
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.workers, Some(2));
        assert!(!cfg.files.directory_listing);
        assert_eq!(
            cfg.files.content_types.get("mjs").map(String::as_str),
            Some("application/javascript")
        );
        assert_eq!(cfg.logging.access_log_format, "json");
        // Untouched keys keep their defaults
        assert_eq!(cfg.files.entry_file, "index.html");
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let dir = tempdir().unwrap();
        let result = Config::load(&cli(None, None, Some(dir.path().join("nope.toml"))));
        assert!(matches!(result, Err(StartupError::Config(_))));
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load(&cli(None, Some(8081), None)).unwrap();
        assert_eq!(cfg.get_socket_addr().unwrap(), "0.0.0.0:8081".parse().unwrap());

        cfg.server.host = "::1".to_string();
        assert_eq!(cfg.get_socket_addr().unwrap(), "[::1]:8081".parse().unwrap());

        cfg.server.host = "localhost:80".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(StartupError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_check_entry_file() {
        let dir = tempdir().unwrap();
        let cfg = Config::load(&cli(Some(dir.path().to_path_buf()), None, None)).unwrap();

        assert!(matches!(
            cfg.check_entry_file(),
            Err(StartupError::MissingEntryFile { .. })
        ));

        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        assert!(cfg.check_entry_file().is_ok());
    }

    #[test]
    fn test_entry_file_must_be_a_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("index.html")).unwrap();
        let cfg = Config::load(&cli(Some(dir.path().to_path_buf()), None, None)).unwrap();
        assert!(cfg.check_entry_file().is_err());
    }
}
