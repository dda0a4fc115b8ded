//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: serve-webgl [build-folder] [port]";

/// Serve a pre-built WebGL bundle, including its .br/.gz compressed assets
#[derive(Debug, Parser)]
#[command(name = "serve-webgl", version, about)]
pub struct Cli {
    /// Build folder to serve [default: Builds/WebGL]
    pub build_folder: Option<PathBuf>,

    /// Port to listen on [default: 8080]
    pub port: Option<u16>,

    /// Optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["serve-webgl"]).unwrap();
        assert!(cli.build_folder.is_none());
        assert!(cli.port.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["serve-webgl", "dist/web", "9000"]).unwrap();
        assert_eq!(cli.build_folder, Some(PathBuf::from("dist/web")));
        assert_eq!(cli.port, Some(9000));
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from(["serve-webgl", "--config", "serve.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("serve.toml")));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["serve-webgl", "build", "http"]).is_err());
        assert!(Cli::try_parse_from(["serve-webgl", "build", "70000"]).is_err());
    }
}
