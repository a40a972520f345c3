//! Component source to self-initializing browser script.
//!
//! # Pipeline
//!
//! 1. Validate the export name
//! 2. Normalize the source and append the export epilogue
//! 3. Write it to a scoped temp file and bundle it into a second temp file
//! 4. Classify bundler failures (missing dependency vs. anything else)
//! 5. Read the bundle back and append the auto-initialization script
//!
//! Both temp files are removed when the invocation ends, whichever path it
//! takes.

use crate::bootstrap;
use crate::bundler::{BundleRequest, Bundler, EsbuildBundler};
use crate::diagnostics;
use dossin_core::{CompiledArtifact, ComponentSource, Error, Result, Settings};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Compiles component source into a [`CompiledArtifact`].
///
/// # Examples
///
/// ```no_run
/// use dossin_compiler::ComponentCompiler;
/// use dossin_core::{ComponentSource, Settings};
///
/// # async fn example() -> dossin_core::Result<()> {
/// let compiler = ComponentCompiler::from_settings(&Settings::default());
/// let source = ComponentSource::new(
///     "import React from 'react';\nconst Hello = () => <h1>Hello</h1>;\nexport default Hello;",
///     "Hello",
/// );
/// let artifact = compiler.compile(&source).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ComponentCompiler {
    bundler: Arc<dyn Bundler>,
    temp_dir: Option<PathBuf>,
}

/// Entry and output temp files for one compilation.
///
/// Dropping it deletes both files; deletion errors are ignored.
#[derive(Debug)]
struct Scratch {
    entry: NamedTempFile,
    output: NamedTempFile,
}

impl Scratch {
    fn create(temp_dir: Option<&Path>) -> Result<Self> {
        Ok(Self {
            entry: temp_file("dossin-component-", ".jsx", temp_dir)?,
            output: temp_file("dossin-compiled-", ".js", temp_dir)?,
        })
    }

    fn request(&self) -> BundleRequest<'_> {
        BundleRequest {
            entry: self.entry.path(),
            outfile: self.output.path(),
        }
    }
}

fn temp_file(prefix: &str, suffix: &str, dir: Option<&Path>) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(prefix).suffix(suffix);
    let created = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    };
    created.map_err(|e| Error::CompileFailed(format!("Failed to create temporary file: {e}")))
}

impl ComponentCompiler {
    /// Creates a compiler around any [`Bundler`].
    #[must_use]
    pub fn new(bundler: Arc<dyn Bundler>) -> Self {
        Self {
            bundler,
            temp_dir: None,
        }
    }

    /// Creates a compiler using esbuild as configured in `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Arc::new(EsbuildBundler::from_settings(settings)))
    }

    /// Places temp files in `dir` instead of the system temp directory.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Compiles `source` into a bundled, self-initializing script.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the export name is empty or not an identifier
    /// - [`Error::MissingDependency`] if an import cannot be resolved
    /// - [`Error::CompileFailed`] for any other bundler or temp-file failure
    pub async fn compile(&self, source: &ComponentSource) -> Result<CompiledArtifact> {
        let export_name = source.export_name().trim();
        if export_name.is_empty() {
            return Err(Error::InvalidInput(
                "componentName is required to render the component".to_string(),
            ));
        }
        if !bootstrap::is_valid_export_name(export_name) {
            return Err(Error::InvalidInput(format!(
                "componentName '{export_name}' must be a JavaScript identifier matching the component's name"
            )));
        }

        let augmented = bootstrap::augment_source(source.code(), export_name);
        let scratch = Scratch::create(self.temp_dir.as_deref())?;

        tokio::fs::write(scratch.entry.path(), augmented)
            .await
            .map_err(|e| Error::CompileFailed(format!("Failed to write component source: {e}")))?;

        debug!(
            component = export_name,
            entry = %scratch.entry.path().display(),
            "Bundling component"
        );

        if let Err(failure) = self.bundler.bundle(&scratch.request()).await {
            let err = diagnostics::classify(failure.message);
            warn!(component = export_name, kind = ?err.kind(), "Bundling failed");
            return Err(err);
        }

        let bundle = tokio::fs::read_to_string(scratch.output.path())
            .await
            .map_err(|e| Error::CompileFailed(format!("Failed to read bundler output: {e}")))?;

        info!(
            component = export_name,
            bundle_bytes = bundle.len(),
            "Component compiled"
        );

        Ok(CompiledArtifact::new(bootstrap::with_auto_init(bundle)))
    }
}
