//! The bundling seam and its esbuild implementation.
//!
//! Component source never runs in-process. It is written to a temp file and
//! handed to an external bundler, which produces a single IIFE script.

use crate::bootstrap::GLOBAL_NAME;
use async_trait::async_trait;
use dossin_core::Settings;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Program name used when no esbuild binary is configured or discovered.
pub const ESBUILD_PROGRAM: &str = "esbuild";

/// Input and output files for one bundling run.
#[derive(Debug, Clone, Copy)]
pub struct BundleRequest<'a> {
    /// Entry module (the augmented component source)
    pub entry: &'a Path,
    /// File the bundled script must be written to
    pub outfile: &'a Path,
}

/// Raw bundler failure, before classification.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BundleError {
    /// Bundler diagnostic text
    pub message: String,
}

impl BundleError {
    /// Wraps bundler diagnostic text.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Produces a browser bundle from an entry module.
///
/// Implementations must write the bundled script to `request.outfile`,
/// exposing the entry's exports under the global [`GLOBAL_NAME`].
#[async_trait]
pub trait Bundler: Send + Sync + std::fmt::Debug {
    /// Bundles `request.entry` and everything it imports.
    ///
    /// # Errors
    ///
    /// Returns the bundler's diagnostic text when bundling fails.
    async fn bundle(&self, request: &BundleRequest<'_>) -> Result<(), BundleError>;
}

/// [`Bundler`] backed by the esbuild CLI.
///
/// Runs with a fixed configuration: bundle everything into an IIFE, target
/// browsers (es2020), transform JSX with `React.createElement`, define
/// `process.env.NODE_ENV` as production, minify, and emit no source maps.
/// `NODE_PATH` lists every dependency root, so imports resolve however
/// the server was installed.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    program: PathBuf,
    node_paths: Vec<PathBuf>,
}

impl EsbuildBundler {
    /// Creates a bundler with an explicit binary and dependency roots.
    #[must_use]
    pub const fn new(program: PathBuf, node_paths: Vec<PathBuf>) -> Self {
        Self {
            program,
            node_paths,
        }
    }

    /// Resolves the binary and dependency roots from `settings`.
    ///
    /// The binary is `settings.esbuild_path`, else the first
    /// `node_modules/.bin/esbuild` found in the dependency roots, else
    /// `esbuild` on `PATH`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let node_paths = dependency_roots(&settings.node_paths);
        let program = settings
            .esbuild_path
            .clone()
            .or_else(|| locate_esbuild(&node_paths))
            .unwrap_or_else(|| PathBuf::from(ESBUILD_PROGRAM));

        Self::new(program, node_paths)
    }

    /// Returns the esbuild binary that will be invoked.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Returns the dependency roots exported as `NODE_PATH`.
    #[must_use]
    pub fn node_paths(&self) -> &[PathBuf] {
        &self.node_paths
    }

    /// Command-line arguments for one bundling run.
    #[must_use]
    pub fn args(request: &BundleRequest<'_>) -> Vec<OsString> {
        let mut outfile = OsString::from("--outfile=");
        outfile.push(request.outfile);

        let mut args = vec![request.entry.as_os_str().to_owned(), outfile];
        args.extend(
            [
                "--bundle",
                "--format=iife",
                format!("--global-name={GLOBAL_NAME}").as_str(),
                "--platform=browser",
                "--target=es2020",
                "--jsx=transform",
                "--jsx-factory=React.createElement",
                "--jsx-fragment=React.Fragment",
                "--define:process.env.NODE_ENV=\"production\"",
                "--minify",
                "--log-level=error",
            ]
            .into_iter()
            .map(OsString::from),
        );
        args
    }
}

#[async_trait]
impl Bundler for EsbuildBundler {
    async fn bundle(&self, request: &BundleRequest<'_>) -> Result<(), BundleError> {
        let node_path = std::env::join_paths(&self.node_paths)
            .map_err(|e| BundleError::new(format!("Invalid dependency root: {e}")))?;

        tracing::debug!(
            program = %self.program.display(),
            entry = %request.entry.display(),
            "Running esbuild"
        );

        let output = Command::new(&self.program)
            .args(Self::args(request))
            .env("NODE_PATH", node_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                BundleError::new(format!(
                    "Failed to run esbuild ({}): {e}. Install it with `npm install esbuild` \
                     in the MCP server folder or set ESBUILD_PATH.",
                    self.program.display()
                ))
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("esbuild exited with {}", output.status)
        } else {
            stderr
        };
        Err(BundleError::new(message))
    }
}

/// Candidate `node_modules` directories, highest priority first.
///
/// Order: configured `extra` roots, then `node_modules` next to the
/// executable, in the working directory, and in the executable's parent and
/// grandparent. Duplicates are dropped; missing directories are kept
/// because resolution simply skips them.
#[must_use]
pub fn dependency_roots(extra: &[PathBuf]) -> Vec<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();

    let mut candidates: Vec<PathBuf> = extra.to_vec();
    if let Some(dir) = &exe_dir {
        candidates.push(dir.join("node_modules"));
    }
    if let Some(dir) = &cwd {
        candidates.push(dir.join("node_modules"));
    }
    if let Some(dir) = &exe_dir {
        candidates.extend(
            dir.ancestors()
                .skip(1)
                .take(2)
                .map(|ancestor| ancestor.join("node_modules")),
        );
    }

    let mut roots = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !roots.contains(&candidate) {
            roots.push(candidate);
        }
    }
    roots
}

/// Finds `.bin/esbuild` inside the first root that has one.
#[must_use]
pub fn locate_esbuild(roots: &[PathBuf]) -> Option<PathBuf> {
    let binary = if cfg!(windows) {
        "esbuild.cmd"
    } else {
        ESBUILD_PROGRAM
    };
    roots
        .iter()
        .map(|root| root.join(".bin").join(binary))
        .find(|candidate| candidate.is_file())
}
