//! MCP server implementation for the Dossin tools.
//!
//! `DossinService` exposes three tools:
//! 1. `get_database_schema` - Fetch the backend's schema document
//! 2. `execute_query` - Run a parameterized SELECT on the backend
//! 3. `compile_and_save_component` - Compile a component to standalone HTML
//!
//! Tool failures never surface as protocol errors. Every error becomes a
//! `CallToolResult` with `is_error` set and a JSON body describing it.

use crate::dispatch::Dispatcher;
use crate::tools::{ToolCall, ToolKind};
use dossin_core::{Error, Result, Settings};
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// MCP server for the Dossin database and component compiler.
///
/// # Examples
///
/// ```no_run
/// use dossin_core::Settings;
/// use dossin_server::DossinService;
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
///
/// # async fn example() -> anyhow::Result<()> {
/// let service = DossinService::from_settings(&Settings::default())?;
/// let running = service.serve(stdio()).await?;
/// running.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DossinService {
    dispatcher: Arc<Dispatcher>,
    backend_url: String,
}

impl DossinService {
    /// Creates a service around `dispatcher`.
    ///
    /// `backend_url` is only used in tool descriptions.
    #[must_use]
    pub fn new(dispatcher: Dispatcher, backend_url: impl Into<String>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            backend_url: backend_url.into(),
        }
    }

    /// Creates a service wired to the real backend, esbuild and output
    /// directory described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns error if the dispatcher cannot be initialized.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            Dispatcher::from_settings(settings)?,
            settings.backend_url.clone(),
        ))
    }

    /// Tool definitions advertised to the host.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        ToolKind::ALL
            .into_iter()
            .map(|kind| {
                Tool::new(
                    kind.name(),
                    kind.description(&self.backend_url),
                    Arc::new(kind.input_schema()),
                )
            })
            .collect()
    }

    /// Runs the named tool and wraps the outcome in a tool result.
    pub async fn handle_call(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        info!(tool = name, "Tool called");

        match self.run(name, arguments).await {
            Ok(value) => CallToolResult::success(vec![Content::text(pretty(&value))]),
            Err(err) => {
                warn!(tool = name, kind = ?err.kind(), error = %err, "Tool failed");
                CallToolResult::error(vec![Content::text(pretty(&error_envelope(&err)))])
            }
        }
    }

    async fn run(&self, name: &str, arguments: Option<JsonObject>) -> Result<Value> {
        let kind: ToolKind = name.parse()?;
        let call = ToolCall::parse(kind, arguments)?;
        self.dispatcher.dispatch(call).await
    }
}

/// JSON body reported for a failed tool call.
///
/// `causes` lists the error's source chain, outermost first.
#[must_use]
pub fn error_envelope(err: &Error) -> Value {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = std::error::Error::source(cause);
    }

    json!({
        "error": err.to_string(),
        "kind": err.kind(),
        "causes": causes,
    })
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

impl ServerHandler for DossinService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Dossin agricultural cargo system. Use get_database_schema to learn the \
                 tables, execute_query to read data, and compile_and_save_component to \
                 turn a data-fetching React component into standalone HTML. Backend: {}",
                self.backend_url
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self.handle_call(&request.name, request.arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_for_missing_dependency() {
        let err = Error::MissingDependency {
            package: "left-pad".to_string(),
            remediation: "Run: npm install left-pad".to_string(),
        };
        let envelope = error_envelope(&err);

        assert_eq!(envelope["error"], "Run: npm install left-pad");
        assert_eq!(envelope["kind"], json!(err.kind()));
        assert_eq!(envelope["causes"], json!([]));
    }

    #[test]
    fn test_envelope_for_backend_error() {
        let err = Error::BackendUnavailable {
            status: Some(500),
            message: "db down".to_string(),
        };
        let envelope = error_envelope(&err);
        assert_eq!(envelope["error"], "db down");
        assert!(envelope["kind"].is_string());
    }

    #[test]
    fn test_envelope_lists_io_cause_for_persistence_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only filesystem");
        let err = Error::persistence("write component file", io);
        let envelope = error_envelope(&err);

        assert_eq!(
            envelope["error"],
            "Failed to write component file: read-only filesystem"
        );
        assert_eq!(envelope["kind"], "PersistenceError");
        assert_eq!(envelope["causes"], json!(["read-only filesystem"]));
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let text = pretty(&json!({"a": 1, "b": [1, 2]}));
        assert!(text.contains('\n'));
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap()["a"], 1);
    }
}
