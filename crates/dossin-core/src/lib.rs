//! Core types, settings, and errors for the Dossin MCP server.
//!
//! This crate provides the foundational types used across the other
//! crates in the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Pipeline newtypes (`ComponentSource`, `CompiledArtifact`, `PackagedDocument`)
//! - Wire types (`QueryRequest`, `SqlParam`, `SaveResult`)
//! - The error taxonomy shared by every tool
//! - Process settings resolved once at startup

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub use config::Settings;
pub use error::{Error, ErrorKind, Result};
pub use types::{
    CompiledArtifact, ComponentSource, PackagedDocument, QueryRequest, SaveResult, SqlParam,
};
