//! Classification of bundler failures.
//!
//! Unresolved imports are the one failure a user can fix without touching
//! the component, so they are lifted into [`Error::MissingDependency`] with
//! install instructions. Everything else passes through as
//! [`Error::CompileFailed`].

use dossin_core::Error;
use regex::Regex;
use std::sync::LazyLock;

/// Libraries shipped alongside the server.
pub const PREINSTALLED_LIBRARIES: &[&str] = &["react", "react-dom", "lucide-react", "recharts"];

static MODULE_NOT_FOUND: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r#"Could not resolve "(.+?)""#).expect("valid regex"),
        Regex::new(r#"Cannot find module ['"](.+?)['"]"#).expect("valid regex"),
        Regex::new(r#"Module not found: ['"](.+?)['"]"#).expect("valid regex"),
    ]
});

/// Returns the import specifier the bundler failed to resolve, if any.
///
/// # Examples
///
/// ```
/// use dossin_compiler::diagnostics::unresolved_import;
///
/// let stderr = "✘ [ERROR] Could not resolve \"left-pad\"\n\n    entry.jsx:1:20:";
/// assert_eq!(unresolved_import(stderr), Some("left-pad"));
/// assert_eq!(unresolved_import("Unexpected \"}\""), None);
/// ```
#[must_use]
pub fn unresolved_import(message: &str) -> Option<&str> {
    MODULE_NOT_FOUND.iter().find_map(|pattern| {
        pattern
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

/// Name to pass to `npm install` for an import specifier.
///
/// Subpath imports install their owning package: `lodash/debounce`
/// becomes `lodash`, `@scope/pkg/sub` becomes `@scope/pkg`.
#[must_use]
pub fn install_name(specifier: &str) -> &str {
    let segments = if specifier.starts_with('@') { 2 } else { 1 };
    match specifier.match_indices('/').nth(segments - 1) {
        Some((idx, _)) => &specifier[..idx],
        None => specifier,
    }
}

/// Human-actionable instructions for a missing package.
#[must_use]
pub fn remediation(package: &str) -> String {
    let install = install_name(package);
    format!(
        "Library '{package}' is not installed in the MCP server.\n\n\
         To use it in compiled components, install it first:\n  \
         1. Open the MCP server folder\n  \
         2. Run: npm install {install}\n  \
         3. Restart the MCP host (e.g. Claude Desktop)\n  \
         4. Compile the component again\n\n\
         Libraries already available: {available}\n\n\
         Note: any npm library can be used, as long as it is installed first.",
        available = PREINSTALLED_LIBRARIES.join(", "),
    )
}

/// Converts raw bundler error text into the matching [`Error`].
#[must_use]
pub fn classify(message: String) -> Error {
    match unresolved_import(&message) {
        Some(package) => Error::MissingDependency {
            remediation: remediation(package),
            package: package.to_string(),
        },
        None => Error::CompileFailed(message),
    }
}
