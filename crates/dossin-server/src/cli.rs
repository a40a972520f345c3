//! Command-line and environment configuration for the server binary.

use clap::Parser;
use dossin_core::Settings;
use std::path::PathBuf;
use std::time::Duration;

/// Dossin MCP server (stdio transport).
///
/// Every option falls back to an environment variable, which may also be
/// set in a `.env` file in the working directory.
#[derive(Parser, Debug)]
#[command(name = "dossin-mcp")]
#[command(version, about, long_about = None)]
#[command(author = "Dossin Team")]
pub struct Cli {
    /// Base URL of the Dossin database backend
    #[arg(long, env = "BACKEND_URL", default_value = Settings::DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Directory compiled components are saved to (default: ~/Downloads/dossin-components)
    #[arg(long, env = "DOSSIN_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to the esbuild executable (default: discovered from node_modules, then PATH)
    #[arg(long = "esbuild", env = "ESBUILD_PATH")]
    pub esbuild_path: Option<PathBuf>,

    /// Extra node_modules directory searched during bundling (repeatable)
    #[arg(long = "node-path", env = "DOSSIN_NODE_PATH", value_delimiter = ':')]
    pub node_paths: Vec<PathBuf>,

    /// Timeout in seconds for backend requests
    #[arg(long, env = "BACKEND_TIMEOUT_SECS")]
    pub backend_timeout_secs: Option<u64>,
}

impl Cli {
    /// Converts parsed options into runtime settings.
    #[must_use]
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings::new(self.backend_url);

        if let Some(secs) = self.backend_timeout_secs {
            settings = settings.with_backend_timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = self.output_dir {
            settings = settings.with_output_dir(dir);
        }
        if let Some(path) = self.esbuild_path {
            settings = settings.with_esbuild_path(path);
        }
        for path in self.node_paths {
            settings = settings.with_node_path(path);
        }
        settings
    }
}
