//! Lesson Catalog
//!
//! The catalog is loaded once at startup from a JSON document and shared
//! read-only with every request. A document that cannot be read or parsed
//! never takes the process down: `load_or_empty` logs the failure and
//! returns an empty catalog that reports itself as not loaded.

use crate::lesson::{LessonDefinition, LessonSummary};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Lesson document not readable at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Lesson document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct LessonDocument {
    #[serde(default)]
    lessons: Vec<LessonDefinition>,
}

/// Immutable collection of lesson definitions.
#[derive(Debug, Clone, Default)]
pub struct LessonCatalog {
    lessons: Vec<LessonDefinition>,
    loaded: bool,
}

impl LessonCatalog {
    /// Creates a loaded catalog from already-parsed lessons.
    pub fn new(lessons: Vec<LessonDefinition>) -> Self {
        Self {
            lessons,
            loaded: true,
        }
    }

    /// The catalog used when the lesson document could not be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a lesson document. Entries without a `lesson_id` cannot be
    /// looked up and are skipped.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: LessonDocument = serde_json::from_str(json)?;
        let lessons = document
            .lessons
            .into_iter()
            .enumerate()
            .filter_map(|(index, lesson)| {
                if lesson.id.trim().is_empty() {
                    warn!(index, title = ?lesson.title, "Skipping lesson without a lesson_id");
                    None
                } else {
                    Some(lesson)
                }
            })
            .collect();
        Ok(Self::new(lessons))
    }

    /// Reads and parses the lesson document at `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Like [`LessonCatalog::load`], but degrades to an empty catalog on failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                info!(path = %path.display(), lesson_count = catalog.len(), "Lesson catalog loaded.");
                catalog
            }
            Err(e) => {
                error!(error = %e, "Failed to load lesson catalog; no lessons will be available.");
                Self::empty()
            }
        }
    }

    pub fn find_by_id(&self, lesson_id: &str) -> Option<&LessonDefinition> {
        self.lessons.iter().find(|lesson| lesson.id == lesson_id)
    }

    pub fn list_summaries(&self) -> Vec<LessonSummary> {
        self.lessons.iter().map(LessonDefinition::summary).collect()
    }

    /// Whether the lesson document was read successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::StepDefinition;
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "lessons": [
            {"lesson_id": "lesson1", "title": "Greetings",
             "steps": [{"prompt": "Hi"}, {"prompt": "Bye"}]},
            {"lesson_id": "lesson2", "steps": []}
        ]
    }"#;

    #[test]
    fn finds_lessons_by_id() {
        let catalog = LessonCatalog::from_json_str(DOCUMENT).unwrap();

        let lesson = catalog.find_by_id("lesson1").unwrap();
        assert_eq!(lesson.steps.len(), 2);
        assert_eq!(lesson.steps[1].prompt, "Bye");
        assert!(catalog.find_by_id("lesson3").is_none());
    }

    #[test]
    fn lists_summaries_in_document_order() {
        let catalog = LessonCatalog::from_json_str(DOCUMENT).unwrap();
        let summaries = catalog.list_summaries();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "lesson1");
        assert_eq!(summaries[0].title, "Greetings");
        assert_eq!(summaries[1].title, "Lesson lesson2");
    }

    #[test]
    fn document_without_lessons_key_is_loaded_but_empty() {
        let catalog = LessonCatalog::from_json_str("{}").unwrap();
        assert!(catalog.is_loaded());
        assert!(catalog.is_empty());
    }

    #[test]
    fn lessons_without_id_are_skipped() {
        let catalog = LessonCatalog::from_json_str(
            r#"{
                "lessons": [
                    {"title": "Orphan", "steps": [{"prompt": "?"}]},
                    {"lesson_id": "", "title": "Blank"},
                    {"lesson_id": "lesson1", "title": "Greetings", "steps": [{"prompt": "Hi"}]}
                ]
            }"#,
        )
        .unwrap();

        assert!(catalog.is_loaded());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find_by_id("").is_none());
        assert_eq!(
            catalog.list_summaries(),
            vec![LessonSummary {
                id: "lesson1".to_string(),
                title: "Greetings".to_string(),
            }]
        );
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = LessonCatalog::from_json_str("{\"lessons\": [").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn missing_file_degrades_to_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        assert!(matches!(
            LessonCatalog::load(&path),
            Err(CatalogError::Io { .. })
        ));

        let catalog = LessonCatalog::load_or_empty(&path);
        assert!(!catalog.is_loaded());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.list_summaries().is_empty());
    }

    #[test]
    fn malformed_file_degrades_to_empty_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let catalog = LessonCatalog::load_or_empty(file.path());
        assert!(!catalog.is_loaded());
        assert!(catalog.list_summaries().is_empty());
    }

    #[test]
    fn loads_document_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();

        let catalog = LessonCatalog::load_or_empty(file.path());
        assert!(catalog.is_loaded());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn bundled_lessons_load() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../lessons/lesson_content.json");
        let catalog = LessonCatalog::load(&path).unwrap();

        assert!(!catalog.is_empty());
        assert!(
            catalog
                .list_summaries()
                .iter()
                .all(|summary| catalog.find_by_id(&summary.id).is_some())
        );
    }

    #[test]
    fn new_catalog_is_loaded() {
        let catalog = LessonCatalog::new(vec![LessonDefinition::new(
            "a",
            "A",
            vec![StepDefinition::new("p", "teacher", "")],
        )]);
        assert!(catalog.is_loaded());
        assert_eq!(catalog.find_by_id("a").map(|l| l.steps.len()), Some(1));
    }
}
