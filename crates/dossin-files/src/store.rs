//! The output directory and its file naming rules.

use chrono::{SecondsFormat, Utc};
use dossin_core::{Error, PackagedDocument, Result, SaveResult, Settings};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Folder created under the user's `Downloads` directory.
pub const OUTPUT_FOLDER: &str = "dossin-components";

const HTML_EXTENSION: &str = ".html";
const NAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Writes packaged documents into a single base directory.
///
/// Files are never written outside `base_dir`: explicit names must be a
/// single path component. Saving under an existing name overwrites it.
#[derive(Debug, Clone)]
pub struct ComponentStore {
    base_dir: PathBuf,
}

impl ComponentStore {
    /// Creates a store rooted at `base_dir`.
    ///
    /// The directory is created lazily on the first save.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Creates a store at the configured output directory, or at
    /// [`ComponentStore::default_location`].
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings
                .output_dir
                .clone()
                .unwrap_or_else(Self::default_location),
        )
    }

    /// `~/Downloads/dossin-components`, or a relative `Downloads/...` when
    /// the home directory cannot be determined.
    #[must_use]
    pub fn default_location() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Downloads")
            .join(OUTPUT_FOLDER)
    }

    /// Returns the directory documents are written to.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Persists `document` and reports what was written.
    ///
    /// The file name is `explicit_name` when given, otherwise
    /// `{display_name}-{timestamp}`; `.html` is appended unless present.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the name is empty or not a single path
    ///   component
    /// - [`Error::PersistenceError`] if the directory cannot be created or
    ///   the file cannot be written; a file that was written but cannot be
    ///   measured is removed again
    pub async fn save(
        &self,
        document: &PackagedDocument,
        explicit_name: Option<&str>,
        display_name: &str,
    ) -> Result<SaveResult> {
        let file_name = resolve_file_name(explicit_name, display_name)?;

        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| Error::persistence("create output directory", e))?;

        let path = self.base_dir.join(&file_name);
        tokio::fs::write(&path, document.as_bytes())
            .await
            .map_err(|e| Error::persistence("write component file", e))?;

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| Error::persistence("read file metadata", e));
        let file_size = discard_on_error(&path, metadata).await?.len();
        let hash = blake3::hash(document.as_bytes()).to_hex().to_string();

        let local_path = std::path::absolute(&path)
            .unwrap_or(path)
            .display()
            .to_string();

        info!(path = %local_path, bytes = file_size, "Component saved");

        Ok(SaveResult {
            success: true,
            local_path,
            file_name,
            file_size,
            hash,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// Removes the file at `path` when `result` is an error.
///
/// Removal is best effort; the original error is returned either way.
async fn discard_on_error<T>(path: &Path, result: Result<T>) -> Result<T> {
    if result.is_err()
        && let Err(e) = tokio::fs::remove_file(path).await
    {
        warn!(path = %path.display(), error = %e, "Failed to remove unsaved file");
    }
    result
}

/// Applies the naming rules without touching the filesystem.
fn resolve_file_name(explicit_name: Option<&str>, display_name: &str) -> Result<String> {
    let stem = match explicit_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!(
            "{display_name}-{}",
            Utc::now().format(NAME_TIMESTAMP_FORMAT)
        ),
    };

    validate_single_component(&stem)?;

    if stem.ends_with(HTML_EXTENSION) {
        Ok(stem)
    } else {
        Ok(format!("{stem}{HTML_EXTENSION}"))
    }
}

fn validate_single_component(name: &str) -> Result<()> {
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(Error::InvalidInput(format!(
            "fileName '{name}' must be a plain file name without path separators or '..'"
        )));
    }
    if name == HTML_EXTENSION {
        return Err(Error::InvalidInput(
            "fileName must have a name before the .html extension".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc() -> PackagedDocument {
        PackagedDocument::new("<!DOCTYPE html><html><body><div id=\"root\"></div></body></html>")
    }

    #[tokio::test]
    async fn test_explicit_name_gets_html_suffix() {
        let temp = TempDir::new().unwrap();
        let store = ComponentStore::new(temp.path());

        let saved = store.save(&doc(), Some("report"), "X").await.unwrap();

        assert!(saved.success);
        assert_eq!(saved.file_name, "report.html");
        assert!(temp.path().join("report.html").is_file());
        assert!(saved.local_path.ends_with("report.html"));
    }

    #[tokio::test]
    async fn test_no_double_suffix() {
        let temp = TempDir::new().unwrap();
        let store = ComponentStore::new(temp.path());

        let saved = store.save(&doc(), Some("report.html"), "X").await.unwrap();

        assert_eq!(saved.file_name, "report.html");
    }

    #[tokio::test]
    async fn test_timestamp_name_when_not_given() {
        let temp = TempDir::new().unwrap();
        let store = ComponentStore::new(temp.path());

        let saved = store.save(&doc(), None, "Dashboard").await.unwrap();
        let stem = saved
            .file_name
            .strip_prefix("Dashboard-")
            .and_then(|rest| rest.strip_suffix(".html"))
            .unwrap();

        // YYYY-MM-DDTHH-MM-SS
        assert_eq!(stem.len(), 19);
        assert_eq!(&stem[10..11], "T");
        assert!(!stem.contains(':'));
        assert!(!stem.contains('.'));
        assert!(
            stem.chars()
                .all(|c| c.is_ascii_digit() || c == '-' || c == 'T')
        );
    }

    #[tokio::test]
    async fn test_blank_explicit_name_falls_back_to_timestamp() {
        let temp = TempDir::new().unwrap();
        let store = ComponentStore::new(temp.path());

        let saved = store.save(&doc(), Some("  "), "Panel").await.unwrap();

        assert!(saved.file_name.starts_with("Panel-"));
    }

    #[tokio::test]
    async fn test_same_content_same_hash_and_size() {
        let temp = TempDir::new().unwrap();
        let store = ComponentStore::new(temp.path());

        let a = store.save(&doc(), Some("a"), "X").await.unwrap();
        let b = store.save(&doc(), Some("b"), "X").await.unwrap();

        assert_eq!(a.hash, b.hash);
        assert_eq!(a.file_size, b.file_size);
        assert_ne!(a.local_path, b.local_path);
        assert_eq!(a.file_size, u64::try_from(doc().as_bytes().len()).unwrap());
        assert_eq!(a.hash, blake3::hash(doc().as_bytes()).to_hex().to_string());
    }

    #[tokio::test]
    async fn test_different_content_different_hash() {
        let temp = TempDir::new().unwrap();
        let store = ComponentStore::new(temp.path());

        let a = store.save(&doc(), Some("a"), "X").await.unwrap();
        let b = store
            .save(&PackagedDocument::new("<html></html>"), Some("b"), "X")
            .await
            .unwrap();

        assert_ne!(a.hash, b.hash);
    }

    #[tokio::test]
    async fn test_creates_nested_base_dir_idempotently() {
        let temp = TempDir::new().unwrap();
        let store = ComponentStore::new(temp.path().join("Downloads").join(OUTPUT_FOLDER));

        store.save(&doc(), Some("one"), "X").await.unwrap();
        store.save(&doc(), Some("two"), "X").await.unwrap();

        assert!(store.base_dir().join("one.html").is_file());
        assert!(store.base_dir().join("two.html").is_file());
    }

    #[tokio::test]
    async fn test_bytes_written_verbatim() {
        let temp = TempDir::new().unwrap();
        let store = ComponentStore::new(temp.path());

        store.save(&doc(), Some("exact"), "X").await.unwrap();

        let written = std::fs::read(temp.path().join("exact.html")).unwrap();
        assert_eq!(written, doc().as_bytes());
    }

    #[tokio::test]
    async fn test_path_traversal_rejected_before_io() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("out");
        let store = ComponentStore::new(&base);

        for name in ["../escape", "nested/file", "..\\escape", ".html"] {
            let err = store.save(&doc(), Some(name), "X").await.unwrap_err();
            assert!(err.is_invalid_input(), "{name} should be rejected");
        }
        assert!(!base.exists());
    }

    #[tokio::test]
    async fn test_unwritable_location_is_persistence_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let store = ComponentStore::new(blocker.join("out"));

        let err = store.save(&doc(), Some("x"), "X").await.unwrap_err();

        assert!(err.is_persistence_error());
        assert!(err.to_string().starts_with("Failed to create output directory"));
    }

    #[tokio::test]
    async fn test_failed_save_step_removes_written_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("orphan.html");
        std::fs::write(&path, "partial").unwrap();

        let failed = Err(Error::persistence(
            "read file metadata",
            std::io::Error::other("metadata unavailable"),
        ));
        let err = discard_on_error::<u64>(&path, failed).await.unwrap_err();

        assert!(err.to_string().starts_with("Failed to read file metadata"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_successful_save_step_keeps_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kept.html");
        std::fs::write(&path, "complete").unwrap();

        let size = discard_on_error(&path, Ok(8_u64)).await.unwrap();

        assert_eq!(size, 8);
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn test_timestamp_is_rfc3339_millis() {
        let temp = TempDir::new().unwrap();
        let store = ComponentStore::new(temp.path());

        let saved = store.save(&doc(), Some("t"), "X").await.unwrap();

        assert!(chrono::DateTime::parse_from_rfc3339(&saved.timestamp).is_ok());
        assert!(saved.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_default_location() {
        let location = ComponentStore::default_location();
        assert!(location.ends_with(Path::new("Downloads").join(OUTPUT_FOLDER)));
    }

    #[test]
    fn test_from_settings_uses_configured_dir() {
        let settings = Settings::default().with_output_dir("/srv/dossin");
        let store = ComponentStore::from_settings(&settings);
        assert_eq!(store.base_dir(), Path::new("/srv/dossin"));
    }
}
