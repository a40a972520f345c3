//! Domain types shared across the Dossin crates.
//!
//! The pipeline types (`ComponentSource`, `CompiledArtifact`,
//! `PackagedDocument`) are newtypes so the compiler, packager and store
//! cannot be wired in the wrong order.
//!
//! # Examples
//!
//! ```
//! use dossin_core::{ComponentSource, QueryRequest, SqlParam};
//!
//! let source = ComponentSource::new("const Hello = () => <p>Hello</p>;", "Hello");
//! assert_eq!(source.export_name(), "Hello");
//!
//! let query = QueryRequest::new("SELECT * FROM turnos WHERE estado = ?")
//!     .with_params(vec![SqlParam::from("pendiente")]);
//! assert_eq!(query.params.len(), 1);
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// UI component source text plus the name of its renderable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSource {
    code: String,
    export_name: String,
    file_name: Option<String>,
}

impl ComponentSource {
    /// Creates a component source without a file name override.
    #[must_use]
    pub fn new(code: impl Into<String>, export_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            export_name: export_name.into(),
            file_name: None,
        }
    }

    /// Sets the output file name override.
    #[must_use]
    pub fn with_file_name(mut self, file_name: Option<String>) -> Self {
        self.file_name = file_name;
        self
    }

    /// Raw component source text.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Top-level symbol rendered into the mount element.
    #[inline]
    #[must_use]
    pub fn export_name(&self) -> &str {
        &self.export_name
    }

    /// Explicit output file name, if any.
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

/// Bundled, minified browser script produced by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact(String);

impl CompiledArtifact {
    /// Wraps compiled script text.
    #[must_use]
    pub fn new(script: impl Into<String>) -> Self {
        Self(script.into())
    }

    /// Returns the script text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Complete standalone HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedDocument(String);

impl PackagedDocument {
    /// Wraps finished HTML text.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Returns the HTML text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the HTML bytes exactly as they are written to disk.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for PackagedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata describing a persisted HTML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResult {
    /// Always `true` for a returned result; failures are errors
    pub success: bool,
    /// Absolute path of the written file
    pub local_path: String,
    /// Final file name, always ending in `.html`
    pub file_name: String,
    /// Size in bytes as reported by the filesystem
    pub file_size: u64,
    /// Hex BLAKE3 digest of the written bytes
    pub hash: String,
    /// RFC 3339 UTC time of the save
    pub timestamp: String,
}

/// A single positional SQL parameter.
///
/// Only primitives are forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SqlParam {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// SQL NULL
    Null,
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Body of `POST {backend}/database/query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// SQL text with `?` placeholders
    pub sql: String,
    /// Values bound to the placeholders, in order
    #[serde(default)]
    pub params: Vec<SqlParam>,
}

impl QueryRequest {
    /// Creates a query without parameters.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Replaces the positional parameters.
    #[must_use]
    pub fn with_params(mut self, params: Vec<SqlParam>) -> Self {
        self.params = params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_result_uses_camel_case() {
        let result = SaveResult {
            success: true,
            local_path: "/tmp/a.html".to_string(),
            file_name: "a.html".to_string(),
            file_size: 10,
            hash: "abc".to_string(),
            timestamp: "2025-01-01T00:00:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["localPath"], "/tmp/a.html");
        assert_eq!(value["fileName"], "a.html");
        assert_eq!(value["fileSize"], 10);
    }

    #[test]
    fn test_sql_params_deserialize_primitives() {
        let params: Vec<SqlParam> =
            serde_json::from_value(json!(["2025-12-02", 7, 1.5, true, null])).unwrap();
        assert_eq!(
            params,
            vec![
                SqlParam::Text("2025-12-02".to_string()),
                SqlParam::Integer(7),
                SqlParam::Float(1.5),
                SqlParam::Bool(true),
                SqlParam::Null,
            ]
        );
    }

    #[test]
    fn test_sql_params_reject_nested_values() {
        let result: std::result::Result<Vec<SqlParam>, _> =
            serde_json::from_value(json!([["nested"]]));
        assert!(result.is_err());
    }

    #[test]
    fn test_query_request_wire_shape() {
        let request = QueryRequest::new("SELECT 1").with_params(vec![SqlParam::from(3)]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "sql": "SELECT 1", "params": [3] })
        );
    }

    #[test]
    fn test_component_source_accessors() {
        let source = ComponentSource::new("code", "Hello")
            .with_file_name(Some("report".to_string()));
        assert_eq!(source.code(), "code");
        assert_eq!(source.export_name(), "Hello");
        assert_eq!(source.file_name(), Some("report"));
    }
}
