//! Routes validated tool calls to the gateway, compiler and store.

use crate::tools::{CompileComponentArgs, ExecuteQueryArgs, ToolCall};
use dossin_backend::{DatabaseGateway, HttpGateway};
use dossin_compiler::{ComponentCompiler, DocumentPackager};
use dossin_core::{ComponentSource, Error, QueryRequest, Result, SaveResult, Settings};
use dossin_files::ComponentStore;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Executes tool calls against the configured collaborators.
///
/// Holds no mutable state; concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn DatabaseGateway>,
    compiler: ComponentCompiler,
    packager: Arc<DocumentPackager>,
    store: ComponentStore,
}

impl Dispatcher {
    /// Creates a dispatcher from explicit collaborators.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn DatabaseGateway>,
        compiler: ComponentCompiler,
        packager: DocumentPackager,
        store: ComponentStore,
    ) -> Self {
        Self {
            gateway,
            compiler,
            packager: Arc::new(packager),
            store,
        }
    }

    /// Wires the HTTP gateway, esbuild compiler and output store from
    /// `settings`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client or the document template cannot be
    /// initialized.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            Arc::new(HttpGateway::new(settings)?),
            ComponentCompiler::from_settings(settings),
            DocumentPackager::new()?,
            ComponentStore::from_settings(settings),
        ))
    }

    /// Runs one tool call to completion.
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's error unchanged.
    pub async fn dispatch(&self, call: ToolCall) -> Result<Value> {
        match call {
            ToolCall::GetDatabaseSchema => self.gateway.fetch_schema().await,
            ToolCall::ExecuteQuery(args) => self.execute_query(args).await,
            ToolCall::CompileAndSaveComponent(args) => self.compile_and_save(args).await,
        }
    }

    async fn execute_query(&self, args: ExecuteQueryArgs) -> Result<Value> {
        debug!(params = args.params.len(), "Executing query");
        let request = QueryRequest::new(args.query).with_params(args.params);
        self.gateway.run_query(&request).await
    }

    async fn compile_and_save(&self, args: CompileComponentArgs) -> Result<Value> {
        let source = ComponentSource::new(args.component_code, args.component_name)
            .with_file_name(args.file_name);
        let display_name = source.export_name().trim();

        let artifact = self.compiler.compile(&source).await?;
        let document = self.packager.package(&artifact, display_name)?;
        let saved = self
            .store
            .save(&document, source.file_name(), display_name)
            .await?;

        SavedComponent::new(saved).into_value()
    }
}

/// Tool result for `compile_and_save_component`: the save report plus a
/// human-readable summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedComponent {
    #[serde(flatten)]
    saved: SaveResult,
    message: String,
}

impl SavedComponent {
    fn new(saved: SaveResult) -> Self {
        let message = format!("Component compiled and saved to {}", saved.local_path);
        Self { saved, message }
    }

    fn into_value(self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| Error::persistence("encode save result", e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_component_flattens_save_result() {
        let saved = SaveResult {
            success: true,
            local_path: "/tmp/out/hello.html".to_string(),
            file_name: "hello.html".to_string(),
            file_size: 42,
            hash: "ab12".to_string(),
            timestamp: "2025-12-02T10:00:00.000Z".to_string(),
        };

        let value = SavedComponent::new(saved).into_value().unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "fileName",
                "fileSize",
                "hash",
                "localPath",
                "message",
                "success",
                "timestamp"
            ]
        );
        assert_eq!(value["fileSize"], 42);
        assert_eq!(
            value["message"],
            "Component compiled and saved to /tmp/out/hello.html"
        );
    }
}
