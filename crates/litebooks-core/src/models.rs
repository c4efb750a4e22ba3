//! Data models for LiteBooks
//!
//! Defines the book record as stored in the remote `books` collection,
//! the insert payload, and the in-progress editor draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier prefix for built-in sample records.
///
/// Sample identifiers are fixed sentinels and must never be sent to the
/// remote store; saving a sample always inserts a fresh row.
pub const SAMPLE_ID_PREFIX: &str = "sample-";

/// Book category taxonomy.
///
/// Unknown labels coming off the wire normalize to [`Category::General`]
/// instead of failing the whole fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Programming,
    DevOps,
    UiUx,
    #[default]
    General,
}

impl Category {
    /// All categories, in the order the editor cycles through them.
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Programming,
        Category::DevOps,
        Category::UiUx,
    ];

    /// Display label, also the canonical wire value.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Programming => "Programming",
            Category::DevOps => "DevOps",
            Category::UiUx => "UI/UX",
            Category::General => "General",
        }
    }

    /// Next category in cycling order (wrapping).
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Previous category in cycling order (wrapping).
    pub fn prev(self) -> Self {
        let pos = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.trim() {
            "Programming" => Category::Programming,
            "DevOps" => Category::DevOps,
            "UI/UX" => Category::UiUx,
            _ => Category::General,
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

/// A catalog record.
///
/// Remote rows are normalized on read: a missing `is_hidden` or
/// `description` takes its default, and `is_local` never appears on the
/// wire in either direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Remote-issued opaque key, or a `sample-*` sentinel for built-ins
    pub id: String,
    /// Display title
    pub title: String,
    /// Short summary shown in the catalog
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    /// Markdown body
    #[serde(default)]
    pub content: String,
    /// Hidden records are visible to signed-in admins only
    #[serde(default)]
    pub is_hidden: bool,
    /// True only for built-in samples; never persisted remotely
    #[serde(default, skip_serializing)]
    pub is_local: bool,
    /// Server-generated; drives the descending catalog order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// In-progress editor form state.
///
/// Reset to empty defaults on entering create mode, populated from the
/// target record on entering edit mode, discarded on cancel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub content: String,
}

impl BookDraft {
    /// Populate a draft from an existing record (edit mode).
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            description: book.description.clone(),
            category: book.category,
            content: book.content.clone(),
        }
    }

    /// A draft saves only when both title and content are non-blank.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

/// Insert payload for the remote store.
///
/// Carries neither an identifier nor the local flag; the store issues the
/// key and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub content: String,
    pub is_hidden: bool,
}

impl NewBook {
    /// Build an insert payload from an editor draft.
    pub fn from_draft(draft: &BookDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category,
            content: draft.content.clone(),
            is_hidden: false,
        }
    }

    /// Build a seeding payload from a sample, stripping the sentinel
    /// identifier and local flag.
    pub fn from_sample(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            description: book.description.clone(),
            category: book.category,
            content: book.content.clone(),
            is_hidden: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            let wire: String = category.into();
            assert_eq!(Category::from(wire), category);
        }
    }

    #[test]
    fn test_category_unknown_normalizes_to_general() {
        assert_eq!(Category::from("Cooking".to_string()), Category::General);
        assert_eq!(Category::from("".to_string()), Category::General);
        assert_eq!(Category::from("  DevOps ".to_string()), Category::DevOps);
    }

    #[test]
    fn test_category_cycling_wraps() {
        let mut category = Category::General;
        for _ in 0..Category::ALL.len() {
            category = category.next();
        }
        assert_eq!(category, Category::General);
        assert_eq!(Category::General.prev(), Category::UiUx);
    }

    #[test]
    fn test_book_normalizes_missing_fields() {
        let json = r#"{"id": "abc", "title": "Only a title"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, "abc");
        assert_eq!(book.description, "");
        assert_eq!(book.category, Category::General);
        assert!(!book.is_hidden);
        assert!(!book.is_local);
        assert!(book.created_at.is_none());
    }

    #[test]
    fn test_book_local_flag_never_serialized() {
        let book = Book {
            id: "sample-1".to_string(),
            title: "Sample".to_string(),
            description: String::new(),
            category: Category::General,
            content: "body".to_string(),
            is_hidden: false,
            is_local: true,
            created_at: None,
        };
        let json = serde_json::to_string(&book).unwrap();
        assert!(!json.contains("is_local"));
        assert!(!json.contains("created_at"));
    }

    #[test]
    fn test_book_deserializes_remote_row() {
        let json = r##"{
            "id": "3f6c",
            "title": "Rust in Production",
            "description": "Notes",
            "category": "Programming",
            "content": "# Heading",
            "is_hidden": true,
            "created_at": "2026-01-02T10:30:00+00:00"
        }"##;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.category, Category::Programming);
        assert!(book.is_hidden);
        assert!(!book.is_local);
        assert!(book.created_at.is_some());
    }

    #[test]
    fn test_draft_completeness() {
        let mut draft = BookDraft::default();
        assert!(!draft.is_complete());
        draft.title = "Title".to_string();
        assert!(!draft.is_complete());
        draft.content = "   ".to_string();
        assert!(!draft.is_complete());
        draft.content = "# Body".to_string();
        assert!(draft.is_complete());
    }

    #[test]
    fn test_new_book_from_sample_strips_local_identity() {
        let sample = Book {
            id: format!("{}guide", SAMPLE_ID_PREFIX),
            title: "Guide".to_string(),
            description: "A guide".to_string(),
            category: Category::DevOps,
            content: "# Guide".to_string(),
            is_hidden: false,
            is_local: true,
            created_at: None,
        };
        let payload = NewBook::from_sample(&sample);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("sample-"));
        assert!(!json.contains("is_local"));
        assert!(!payload.is_hidden);
    }

    #[test]
    fn test_draft_from_book() {
        let book = Book {
            id: "1".to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            category: Category::UiUx,
            content: "C".to_string(),
            is_hidden: true,
            is_local: false,
            created_at: None,
        };
        let draft = BookDraft::from_book(&book);
        assert_eq!(draft.title, "T");
        assert_eq!(draft.category, Category::UiUx);
        assert_eq!(draft.content, "C");
    }
}
