//! React component compilation for the Dossin MCP server.
//!
//! Turns component source text into a self-contained HTML document:
//!
//! - [`ComponentCompiler`] normalizes the source and bundles it through a
//!   [`Bundler`] (esbuild by default) into a self-initializing script
//! - [`DocumentPackager`] wraps that script into a standalone page
//!
//! Bundler failures caused by unresolved imports are reported as
//! [`dossin_core::Error::MissingDependency`] with install instructions.
//!
//! # Examples
//!
//! ```no_run
//! use dossin_compiler::{ComponentCompiler, DocumentPackager};
//! use dossin_core::{ComponentSource, Settings};
//!
//! # async fn example() -> dossin_core::Result<()> {
//! let compiler = ComponentCompiler::from_settings(&Settings::default());
//! let packager = DocumentPackager::new()?;
//!
//! let source = ComponentSource::new("const Hello = () => <h1>Hi</h1>;", "Hello");
//! let artifact = compiler.compile(&source).await?;
//! let document = packager.package(&artifact, "Hello")?;
//! println!("{} bytes", document.as_bytes().len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod bootstrap;
pub mod bundler;
mod compiler;
pub mod diagnostics;
mod package;

pub use bundler::{BundleError, BundleRequest, Bundler, EsbuildBundler};
pub use compiler::ComponentCompiler;
pub use package::DocumentPackager;
