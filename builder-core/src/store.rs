//! Page storage behind the editor's explicit save action.
//!
//! The editor never autosaves; a [`PageStore`] is written only when the user
//! saves. [`MemoryPageStore`] keeps pages in process and [`FilePageStore`]
//! writes one pretty-printed JSON file per page.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Canvas, PageDocument};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested page does not exist.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Destination for saved pages.
pub trait PageStore {
    /// Save (create or overwrite) a page.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be written.
    fn save(&self, document: &PageDocument) -> Result<(), StoreError>;

    /// Load a page by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if the page does not exist.
    fn load(&self, page_id: &str) -> Result<PageDocument, StoreError>;

    /// Ids of all stored pages, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be listed.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Delete a page.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if the page does not exist.
    fn delete(&self, page_id: &str) -> Result<(), StoreError>;

    /// Snapshot `canvas` as a document stamped with the current time and save it.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be written.
    fn save_canvas(
        &self,
        page_id: &str,
        title: &str,
        canvas: &Canvas,
    ) -> Result<PageDocument, StoreError> {
        let document = PageDocument::from_canvas(page_id, title, canvas, current_timestamp_ms());
        self.save(&document)?;
        Ok(document)
    }
}

/// Thread-safe in-memory page store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPageStore {
    pages: Arc<RwLock<HashMap<String, PageDocument>>>,
}

impl MemoryPageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageStore for MemoryPageStore {
    fn save(&self, document: &PageDocument) -> Result<(), StoreError> {
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pages.insert(document.page_id.clone(), document.clone());
        Ok(())
    }

    fn load(&self, page_id: &str) -> Result<PageDocument, StoreError> {
        let pages = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| StoreError::PageNotFound(page_id.to_string()))
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let pages = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut ids: Vec<_> = pages.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn delete(&self, page_id: &str) -> Result<(), StoreError> {
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pages
            .remove(page_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::PageNotFound(page_id.to_string()))
    }
}

/// Page store writing `<data_dir>/<page id>.json`.
#[derive(Debug, Clone)]
pub struct FilePageStore {
    data_dir: PathBuf,
}

impl FilePageStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Root directory of this store.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing `page_id`.
    #[must_use]
    pub fn page_path(&self, page_id: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.json", sanitize_filename(page_id)))
    }
}

impl PageStore for FilePageStore {
    fn save(&self, document: &PageDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(document)?;
        let path = self.page_path(&document.page_id);
        std::fs::write(&path, json)?;
        tracing::debug!("Saved page {} to {}", document.page_id, path.display());
        Ok(())
    }

    fn load(&self, page_id: &str) -> Result<PageDocument, StoreError> {
        let path = self.page_path(page_id);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::PageNotFound(page_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn delete(&self, page_id: &str) -> Result<(), StoreError> {
        let path = self.page_path(page_id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::PageNotFound(page_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Sanitize a page ID for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(page_id: &str) -> String {
    page_id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Get the current Unix timestamp in milliseconds.
#[must_use]
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementType, ElementUpdate};

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new();
        let id = canvas.add_element(ElementType::Text).id();
        canvas
            .update_element(id, &ElementUpdate::content("Saved"))
            .expect("update");
        canvas.add_element(ElementType::Image);
        canvas
    }

    #[test]
    fn test_memory_save_and_load() {
        let store = MemoryPageStore::new();
        let saved = store
            .save_canvas("home", "Home", &sample_canvas())
            .expect("save");
        assert!(saved.updated_at > 0);

        let loaded = store.load("home").expect("load");
        assert_eq!(loaded, saved);
        assert_eq!(store.list().expect("list"), vec!["home".to_string()]);
    }

    #[test]
    fn test_memory_missing_page() {
        let store = MemoryPageStore::new();
        assert!(matches!(store.load("nope"), Err(StoreError::PageNotFound(_))));
        assert!(matches!(store.delete("nope"), Err(StoreError::PageNotFound(_))));
    }

    #[test]
    fn test_file_save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FilePageStore::new(dir.path()).expect("store");
        let canvas = sample_canvas();
        store.save_canvas("about", "About", &canvas).expect("save");

        let path = dir.path().join("about.json");
        assert!(path.exists(), "page file should be written on save");

        let restored = store.load("about").expect("load").into_canvas();
        assert_eq!(restored.elements(), canvas.elements());
    }

    #[test]
    fn test_file_list_and_delete() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FilePageStore::new(dir.path()).expect("store");
        for name in ["b-page", "a-page"] {
            store.save_canvas(name, name, &Canvas::new()).expect("save");
        }
        assert_eq!(
            store.list().expect("list"),
            vec!["a-page".to_string(), "b-page".to_string()]
        );

        store.delete("a-page").expect("delete");
        assert!(matches!(store.load("a-page"), Err(StoreError::PageNotFound(_))));
        assert!(matches!(store.delete("a-page"), Err(StoreError::PageNotFound(_))));
    }

    #[test]
    fn test_file_rejects_corrupt_page() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FilePageStore::new(dir.path()).expect("store");
        std::fs::write(dir.path().join("broken.json"), "{ nope").expect("write");
        assert!(matches!(store.load("broken"), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("simple"), "simple");
        assert_eq!(sanitize_filename("with-dash"), "with-dash");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("../up"), "___up");
    }
}
