//! Tool catalog and argument types.
//!
//! The tool set is closed: [`ToolKind`] names every tool the server exposes
//! and [`ToolCall`] carries the typed arguments for one invocation.

use crate::context::domain_context;
use dossin_core::{Error, Result, SqlParam};
use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Returns the backend's database schema document
    GetDatabaseSchema,
    /// Runs a parameterized read query on the backend
    ExecuteQuery,
    /// Compiles a component and saves it as standalone HTML
    CompileAndSaveComponent,
}

impl ToolKind {
    /// All tools, in listing order.
    pub const ALL: [Self; 3] = [
        Self::GetDatabaseSchema,
        Self::ExecuteQuery,
        Self::CompileAndSaveComponent,
    ];

    /// Wire name of the tool.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetDatabaseSchema => "get_database_schema",
            Self::ExecuteQuery => "execute_query",
            Self::CompileAndSaveComponent => "compile_and_save_component",
        }
    }

    /// Description shown to the MCP host, pointing at `backend_url`.
    #[must_use]
    pub fn description(self, backend_url: &str) -> String {
        match self {
            Self::GetDatabaseSchema => format!(
                "{context}

---

Returns the complete schema of the MySQL database, including tables, columns, \
data types, relationships (foreign keys), indexes and constraints.

**WHEN TO USE**:
- First interaction with the database
- Before building complex queries
- To understand relationships between tables
- When you need exact column names

**RETURNS**: JSON with the full database structure.",
                context = domain_context(backend_url)
            ),
            Self::ExecuteQuery => "Runs SQL SELECT queries on the Dossin database.

**AVAILABLE DATA**:
- Appointments (turnos): loading/unloading schedules
- Trucks (camiones): vehicles and their plates
- Loads (cargas): active and historical operations
- Drivers (choferes): registered drivers
- Clients (clientes): companies and producers
- Products (productos): agricultural catalog
- Destinations (destinos): ports, storage facilities, plants

**BEST PRACTICES**:
- Use parameters (?) for dynamic values
- Fetch the schema first if you do not know the structure
- Limit results with LIMIT when appropriate
- Use CURDATE() for the current date
- Only SELECT queries are allowed

**EXAMPLE**:
query: \"SELECT * FROM turnos WHERE fecha >= CURDATE() LIMIT 10\"
params: []"
                .to_string(),
            Self::CompileAndSaveComponent => format!(
                "Compiles a DOSSIN COMPONENT into standalone HTML with full bundling and saves \
it to ~/Downloads/dossin-components/.

CRITICAL - ARTIFACT vs DOSSIN COMPONENT:

CHAT ARTIFACT (do NOT compile):
   - Component with hardcoded data, shown in the chat
   - const turnos = [{{id: 1, ...}}, {{id: 2, ...}}];
   - No fetch(), no useEffect
   - Do NOT use with compile_and_save_component

DOSSIN COMPONENT (compile):
   - Component that fetches data dynamically
   - const [data, setData] = useState([]);
   - useEffect(() => {{ fetch('{backend_url}/database/query', ...) }}, []);
   - Includes loading, error and data states
   - USE with compile_and_save_component

REQUIRED TRANSFORMATION (Artifact -> Dossin component):
1. Remove: const turnos = [hardcoded_data];
2. Add: const [turnos, setTurnos] = useState([]);
3. Add: const [loading, setLoading] = useState(true);
4. Add: const [error, setError] = useState(null);
5. Add: useEffect with a fetch to the endpoint
6. Add: handling for if (loading) and if (error)

COMPILATION AND BUNDLING:
- esbuild bundles every dependency automatically
- Imports are detected and inlined into the HTML (~200KB)
- Any library may be used
- If a library is missing, compilation FAILS with a detailed error
- The error says which library to install and how
- Do NOT continue after a missing-library error - tell the user

Libraries already installed: react, react-dom, lucide-react, recharts

RESULT:
- Standalone HTML that loads live data
- Works from file://, S3 and iframes
- Tailwind CSS from CDN

WHEN TO USE:
- Only after transforming ARTIFACT -> DOSSIN COMPONENT
- To produce production HTML files
- To serve from a backend or S3"
            ),
        }
    }

    /// JSON Schema of the tool's arguments.
    #[must_use]
    pub fn input_schema(self) -> Map<String, Value> {
        let schema = match self {
            Self::GetDatabaseSchema => schemars::schema_for!(GetDatabaseSchemaArgs),
            Self::ExecuteQuery => schemars::schema_for!(ExecuteQueryArgs),
            Self::CompileAndSaveComponent => schemars::schema_for!(CompileComponentArgs),
        };
        match serde_json::to_value(schema) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown tool: {s}")))
    }
}

/// Arguments for `get_database_schema` (none).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetDatabaseSchemaArgs {}

/// Arguments for `execute_query`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteQueryArgs {
    /// SQL SELECT query. Use `?` placeholders for dynamic values.
    /// Example: SELECT * FROM turnos WHERE fecha = ? AND estado = ?
    pub query: String,

    /// Values for the `?` placeholders, in order.
    /// Example: ["2025-12-02", "pendiente"]
    #[serde(default)]
    pub params: Vec<SqlParam>,
}

/// Arguments for `compile_and_save_component`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompileComponentArgs {
    /// JSX source of the DOSSIN COMPONENT (dynamic fetch, not the hardcoded
    /// artifact). Should include useState, useEffect, fetch() and loading and
    /// error handling.
    pub component_code: String,

    /// Name of the component function (e.g. 'TurnosDelDia'). Used for the
    /// page title and the file name.
    pub component_name: String,

    /// Custom HTML file name (optional). A timestamped name is generated
    /// when omitted.
    #[serde(default)]
    pub file_name: Option<String>,
}

/// One validated tool invocation.
#[derive(Debug, Clone)]
pub enum ToolCall {
    /// `get_database_schema`
    GetDatabaseSchema,
    /// `execute_query`
    ExecuteQuery(ExecuteQueryArgs),
    /// `compile_and_save_component`
    CompileAndSaveComponent(CompileComponentArgs),
}

impl ToolCall {
    /// Deserializes and validates `arguments` for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a required argument is missing,
    /// has the wrong type, or is blank.
    pub fn parse(kind: ToolKind, arguments: Option<Map<String, Value>>) -> Result<Self> {
        let arguments = arguments.unwrap_or_default();

        match kind {
            ToolKind::GetDatabaseSchema => {
                let GetDatabaseSchemaArgs {} = decode(kind, arguments)?;
                Ok(Self::GetDatabaseSchema)
            }
            ToolKind::ExecuteQuery => {
                let args: ExecuteQueryArgs = decode(kind, arguments)?;
                require_non_blank("query", &args.query)?;
                Ok(Self::ExecuteQuery(args))
            }
            ToolKind::CompileAndSaveComponent => {
                let args: CompileComponentArgs = decode(kind, arguments)?;
                require_non_blank("componentCode", &args.component_code)?;
                require_non_blank("componentName", &args.component_name)?;
                Ok(Self::CompileAndSaveComponent(args))
            }
        }
    }

    /// The tool this call targets.
    #[must_use]
    pub const fn kind(&self) -> ToolKind {
        match self {
            Self::GetDatabaseSchema => ToolKind::GetDatabaseSchema,
            Self::ExecuteQuery(_) => ToolKind::ExecuteQuery,
            Self::CompileAndSaveComponent(_) => ToolKind::CompileAndSaveComponent,
        }
    }
}

fn decode<T: DeserializeOwned>(kind: ToolKind, arguments: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| Error::InvalidInput(format!("Invalid arguments for {kind}: {e}")))
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!(
            "{field} is required and must be a non-empty string"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[test]
    fn test_names_round_trip_through_from_str() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.name().parse::<ToolKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_tool_is_invalid_input() {
        let err = "drop_database".parse::<ToolKind>().unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "Invalid input: Unknown tool: drop_database");
    }

    #[test]
    fn test_execute_query_schema_requires_query_only() {
        let schema = ToolKind::ExecuteQuery.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["query"]));
        assert!(schema["properties"]["params"].is_object());
    }

    #[test]
    fn test_compile_schema_uses_camel_case() {
        let schema = ToolKind::CompileAndSaveComponent.input_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("componentCode"));
        assert!(properties.contains_key("componentName"));
        assert!(properties.contains_key("fileName"));

        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("componentCode")));
        assert!(required.contains(&json!("componentName")));
        assert!(!required.contains(&json!("fileName")));
    }

    #[test]
    fn test_schema_tool_has_object_schema() {
        let schema = ToolKind::GetDatabaseSchema.input_schema();
        assert_eq!(schema["type"], "object");
    }

    #[test]
    fn test_descriptions_interpolate_backend() {
        let url = "http://localhost:9000/api";
        assert!(
            ToolKind::GetDatabaseSchema
                .description(url)
                .contains("Backend: http://localhost:9000/api")
        );
        assert!(
            ToolKind::CompileAndSaveComponent
                .description(url)
                .contains("fetch('http://localhost:9000/api/database/query'")
        );
        assert!(ToolKind::ExecuteQuery.description(url).contains("SELECT"));
    }

    #[test]
    fn test_parse_execute_query_defaults_params() {
        let call = ToolCall::parse(ToolKind::ExecuteQuery, args(json!({"query": "SELECT 1"})))
            .unwrap();
        match call {
            ToolCall::ExecuteQuery(args) => {
                assert_eq!(args.query, "SELECT 1");
                assert!(args.params.is_empty());
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[test]
    fn test_parse_execute_query_rejects_bad_query() {
        for bad in [json!({}), json!({"query": 42}), json!({"query": "   "})] {
            let err = ToolCall::parse(ToolKind::ExecuteQuery, args(bad.clone())).unwrap_err();
            assert!(err.is_invalid_input(), "{bad} should be rejected");
        }
        let err = ToolCall::parse(ToolKind::ExecuteQuery, None).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_parse_compile_args() {
        let call = ToolCall::parse(
            ToolKind::CompileAndSaveComponent,
            args(json!({
                "componentCode": "const Hello = () => null;",
                "componentName": "Hello",
                "fileName": "hello"
            })),
        )
        .unwrap();
        assert_eq!(call.kind(), ToolKind::CompileAndSaveComponent);
        match call {
            ToolCall::CompileAndSaveComponent(args) => {
                assert_eq!(args.component_name, "Hello");
                assert_eq!(args.file_name.as_deref(), Some("hello"));
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[test]
    fn test_parse_compile_rejects_blank_fields() {
        let err = ToolCall::parse(
            ToolKind::CompileAndSaveComponent,
            args(json!({"componentCode": "", "componentName": "Hello"})),
        )
        .unwrap_err();
        assert!(err.to_string().contains("componentCode"));

        let err = ToolCall::parse(
            ToolKind::CompileAndSaveComponent,
            args(json!({"componentCode": "x"})),
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_parse_schema_ignores_extra_arguments() {
        let call =
            ToolCall::parse(ToolKind::GetDatabaseSchema, args(json!({"verbose": true}))).unwrap();
        assert_eq!(call.kind(), ToolKind::GetDatabaseSchema);
    }
}
