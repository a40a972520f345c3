//! MCP server library for the Dossin agricultural cargo system.
//!
//! The server gives an MCP host read access to the Dossin database and a
//! way to turn data-fetching React components into standalone HTML files.
//!
//! # Architecture
//!
//! The server implements three tools:
//!
//! 1. **`get_database_schema`** - Fetch the schema document from the backend
//! 2. **`execute_query`** - Run a parameterized SELECT through the backend
//! 3. **`compile_and_save_component`** - Bundle a component with esbuild,
//!    package it as HTML and save it under `~/Downloads/dossin-components`
//!
//! # Workflow
//!
//! 1. The host calls `get_database_schema` to learn the tables
//! 2. It calls `execute_query` and previews the data in a chat artifact
//! 3. It rewrites the artifact to fetch live data and calls
//!    `compile_and_save_component`
//!
//! # Examples
//!
//! ```no_run
//! use dossin_core::Settings;
//! use dossin_server::DossinService;
//! use rmcp::ServiceExt;
//! use rmcp::transport::stdio;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = DossinService::from_settings(&Settings::default())?
//!     .serve(stdio())
//!     .await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod context;
pub mod dispatch;
pub mod service;
pub mod tools;

pub use cli::Cli;
pub use dispatch::Dispatcher;
pub use service::{DossinService, error_envelope};
pub use tools::{CompileComponentArgs, ExecuteQueryArgs, GetDatabaseSchemaArgs, ToolCall, ToolKind};
