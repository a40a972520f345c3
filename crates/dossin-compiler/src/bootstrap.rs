//! Source normalization and the browser-side bootstrap.
//!
//! Before bundling, the component source gets a fixed export surface:
//! `default` (the component), `React` and `createRoot`. After bundling,
//! [`AUTO_INIT_SCRIPT`] is appended. It mounts `DossinApp.default` into
//! `#root` once the document is ready, or renders a visible error panel.

use regex::Regex;
use std::sync::LazyLock;

/// Global namespace the IIFE bundle is exposed under.
pub const GLOBAL_NAME: &str = "DossinApp";

/// Self-invoking initializer appended to every compiled bundle.
pub const AUTO_INIT_SCRIPT: &str = include_str!("../templates/auto_init.js");

// `export default Name;` anywhere, including mid-line and before `\r\n`
static DEFAULT_EXPORT_IDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bexport\s+default\s+[A-Za-z_$][\w$]*\s*;?").expect("valid regex")
});
// `export default function Name` / `export default class Name`
static DEFAULT_EXPORT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+default\s+((?:async\s+)?function\b|class\b)").expect("valid regex")
});
static REACT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bimport\s+(?:\*\s+as\s+)?React\b").expect("valid regex")
});
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*$").expect("valid regex"));

/// Returns `true` if `name` can be spliced into the export epilogue.
#[must_use]
pub fn is_valid_export_name(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Removes default-export statements from component source.
///
/// The epilogue supplies its own `default`; a second one would make the
/// bundler reject the module. Declarations (`export default function Foo`)
/// keep their body and lose only the `export default` prefix.
///
/// # Examples
///
/// ```
/// use dossin_compiler::bootstrap::strip_default_export;
///
/// let code = "const Hello = () => null;\nexport default Hello;\n";
/// assert_eq!(strip_default_export(code), "const Hello = () => null;");
///
/// let code = "export default function Hello() { return null; }";
/// assert_eq!(strip_default_export(code), "function Hello() { return null; }");
/// ```
#[must_use]
pub fn strip_default_export(code: &str) -> String {
    // Declarations first, so `export default function` is not read as an identifier
    let without_decls = DEFAULT_EXPORT_DECL.replace_all(code, "$1");
    DEFAULT_EXPORT_IDENT
        .replace_all(&without_decls, "")
        .trim()
        .to_string()
}

/// Builds the bundler entry module for `code` rendering `export_name`.
///
/// `export_name` must already satisfy [`is_valid_export_name`].
#[must_use]
pub fn augment_source(code: &str, export_name: &str) -> String {
    let cleaned = strip_default_export(code);
    let react_import = if REACT_IMPORT.is_match(&cleaned) {
        ""
    } else {
        "import React from 'react';\n"
    };

    format!(
        "{react_import}{cleaned}\n\n\
         import {{ createRoot }} from 'react-dom/client';\n\n\
         export {{ React, createRoot, {export_name} as default }};\n"
    )
}

/// Appends [`AUTO_INIT_SCRIPT`] to bundler output.
#[must_use]
pub fn with_auto_init(mut bundle: String) -> String {
    bundle.push_str(AUTO_INIT_SCRIPT);
    bundle
}
