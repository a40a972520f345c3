//! MCP server entry point for the Dossin tools.
//!
//! # Usage
//!
//! Run the server via stdio transport:
//!
//! ```bash
//! dossin-mcp --backend-url https://dev.dossin.com.ar/api
//! ```
//!
//! Or configure it in the MCP host:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "dossin": {
//!       "command": "dossin-mcp",
//!       "env": { "BACKEND_URL": "https://dev.dossin.com.ar/api" }
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use dossin_files::ComponentStore;
use dossin_server::{Cli, DossinService};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();
    let settings = Cli::parse().into_settings();

    // Initialize logging to stderr (stdout is for MCP protocol)
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,dossin_server=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let service =
        DossinService::from_settings(&settings).context("Failed to initialize Dossin service")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %settings.backend_url,
        output_dir = %ComponentStore::from_settings(&settings).base_dir().display(),
        "Starting dossin-mcp"
    );

    let running = service.serve(stdio()).await?;
    running.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
