//! Process-wide settings.
//!
//! Settings are resolved once at startup (command line, then environment,
//! then the defaults below) and handed to each component's constructor.
//! Library code never reads the environment directly.
//!
//! # Examples
//!
//! ```
//! use dossin_core::Settings;
//!
//! let settings = Settings::default();
//! assert_eq!(settings.backend_url, Settings::DEFAULT_BACKEND_URL);
//!
//! let custom = Settings::new("http://localhost:8080/api/");
//! assert_eq!(custom.backend_url, "http://localhost:8080/api");
//! ```

use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for the Dossin MCP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the database backend, without a trailing slash.
    ///
    /// Default: [`Settings::DEFAULT_BACKEND_URL`]
    pub backend_url: String,

    /// Optional request timeout for backend calls.
    ///
    /// Default: None (the transport's own timeout applies)
    pub backend_timeout: Option<Duration>,

    /// Directory where compiled components are written.
    ///
    /// Default: None (`~/Downloads/dossin-components`)
    pub output_dir: Option<PathBuf>,

    /// Explicit path to the esbuild executable.
    ///
    /// Default: None (discovered from the dependency roots, then `PATH`)
    pub esbuild_path: Option<PathBuf>,

    /// Extra `node_modules` roots searched during bundling, in priority order.
    pub node_paths: Vec<PathBuf>,
}

impl Settings {
    /// Backend used when no override is configured.
    pub const DEFAULT_BACKEND_URL: &'static str = "https://dev.dossin.com.ar/api";

    /// Creates settings for the given backend with all other values defaulted.
    #[must_use]
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: normalize_base_url(backend_url.into()),
            ..Self::default()
        }
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the esbuild executable.
    #[must_use]
    pub fn with_esbuild_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.esbuild_path = Some(path.into());
        self
    }

    /// Appends an extra dependency root.
    #[must_use]
    pub fn with_node_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.node_paths.push(path.into());
        self
    }

    /// Sets the backend request timeout.
    #[must_use]
    pub const fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = Some(timeout);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: Self::DEFAULT_BACKEND_URL.to_string(),
            backend_timeout: None,
            output_dir: None,
            esbuild_path: None,
            node_paths: Vec::new(),
        }
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
