//! Standalone HTML packaging for compiled components.
//!
//! The document is fixed boilerplate: meta tags, the Tailwind CDN, an
//! inline reset stylesheet and a single `#root` mount element. The compiled
//! script is inlined into one `<script>` block. Rendering is deterministic:
//! the same artifact and display name always yield identical bytes.

use dossin_core::{CompiledArtifact, Error, PackagedDocument, Result};
use handlebars::Handlebars;
use serde::Serialize;

const DOCUMENT_TEMPLATE: &str = "standalone";

/// Renders compiled components into standalone HTML documents.
///
/// # Examples
///
/// ```
/// use dossin_compiler::DocumentPackager;
/// use dossin_core::CompiledArtifact;
///
/// let packager = DocumentPackager::new().unwrap();
/// let doc = packager
///     .package(&CompiledArtifact::new("console.log('hi');"), "Hello")
///     .unwrap();
///
/// assert!(doc.as_str().contains("<title>Hello - Dossin</title>"));
/// assert!(doc.as_str().contains(r#"<div id="root"></div>"#));
/// ```
#[derive(Debug)]
pub struct DocumentPackager {
    handlebars: Handlebars<'static>,
}

#[derive(Serialize)]
struct DocumentContext<'a> {
    title: &'a str,
    script: String,
}

impl DocumentPackager {
    /// Creates a packager with the built-in document template.
    ///
    /// # Errors
    ///
    /// Returns error if the built-in template fails to register (should not
    /// happen with the shipped template).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);

        handlebars
            .register_template_string(
                DOCUMENT_TEMPLATE,
                include_str!("../templates/standalone.html.hbs"),
            )
            .map_err(|e| {
                Error::CompileFailed(format!("Failed to register document template: {e}"))
            })?;

        Ok(Self { handlebars })
    }

    /// Wraps `artifact` into a complete HTML document titled after
    /// `display_name`.
    ///
    /// The title is HTML-escaped. Any `</script` inside the artifact is
    /// escaped so the inline block cannot be closed early.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CompileFailed`] if template rendering fails.
    pub fn package(
        &self,
        artifact: &CompiledArtifact,
        display_name: &str,
    ) -> Result<PackagedDocument> {
        let context = DocumentContext {
            title: display_name,
            script: escape_script(artifact.as_str()),
        };

        self.handlebars
            .render(DOCUMENT_TEMPLATE, &context)
            .map(PackagedDocument::new)
            .map_err(|e| Error::CompileFailed(format!("Failed to render HTML document: {e}")))
    }
}

fn escape_script(script: &str) -> String {
    script.replace("</script", "<\\/script")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packager() -> DocumentPackager {
        DocumentPackager::new().unwrap()
    }

    #[test]
    fn test_single_mount_and_single_inline_script() {
        let doc = packager()
            .package(&CompiledArtifact::new("var DossinApp={};"), "Hello")
            .unwrap();
        let html = doc.as_str();

        assert_eq!(html.matches(r#"<div id="root">"#).count(), 1);
        assert_eq!(html.matches("<script>").count(), 1);
        assert!(html.contains("var DossinApp={};"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_packaging_is_idempotent() {
        let packager = packager();
        let artifact = CompiledArtifact::new("var a = 1 < 2 && 3 > 2;");
        let first = packager.package(&artifact, "Turnos").unwrap();
        let second = packager.package(&artifact, "Turnos").unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_script_is_inlined_verbatim() {
        let script = "var s = \"<b>&amp;</b>\"; if (a < b && c > d) {}";
        let doc = packager()
            .package(&CompiledArtifact::new(script), "X")
            .unwrap();
        assert!(doc.as_str().contains(script));
    }

    #[test]
    fn test_title_is_escaped() {
        let doc = packager()
            .package(&CompiledArtifact::new(""), "<Panel & Co>")
            .unwrap();
        assert!(doc.as_str().contains("<title>&lt;Panel &amp; Co&gt; - Dossin</title>"));
    }

    #[test]
    fn test_closing_script_tag_escaped() {
        let doc = packager()
            .package(&CompiledArtifact::new("var s = '</script>';"), "X")
            .unwrap();
        assert_eq!(doc.as_str().matches("</script>").count(), 2);
        assert!(doc.as_str().contains("'<\\/script>'"));
    }

    #[test]
    fn test_boilerplate_present() {
        let doc = packager()
            .package(&CompiledArtifact::new(""), "X")
            .unwrap();
        let html = doc.as_str();
        assert!(html.contains(r#"<meta charset="UTF-8">"#));
        assert!(html.contains("name=\"viewport\""));
        assert!(html.contains("https://cdn.tailwindcss.com"));
        assert!(html.contains("box-sizing: border-box;"));
        assert!(html.contains("input[type=\"range\"]"));
    }
}
