// Domain model for the focus stream
//
// The HN item tree collapses into two shapes we care about: stories (top-level
// discussion roots) and comments (everything below them). The raw API payloads
// live in api::models; this module only holds the mapped domain types that the
// rest of the app navigates over.

use serde::{Deserialize, Serialize};

/// A top-level discussion root (story, job posting, or poll).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: u64,
    pub title: String,
    /// External link, absent for Ask/Show-style text posts
    pub url: Option<String>,
    pub author: String,
    pub points: u32,
    /// Total comment count as reported by the API (descendants)
    pub comment_count: u32,
    /// Unix timestamp (seconds)
    pub time: i64,
    /// Body text for Ask HN / Show HN posts, already stripped of markup
    pub text: Option<String>,
    /// Direct reply ids, in ranked order
    pub child_ids: Vec<u64>,
}

/// A comment anywhere below a story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub author: String,
    /// Body text, stripped of markup
    pub text: String,
    /// Unix timestamp (seconds)
    pub time: i64,
    /// Direct reply ids, in ranked order
    pub child_ids: Vec<u64>,
    pub parent_id: u64,
    pub deleted: bool,
    /// Total descendant count, only known when the enriched source answered
    pub total_reply_count: Option<u32>,
}

/// Either variant of a fetched item. Exactly one applies to any payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Story(Story),
    Comment(Comment),
}

impl Item {
    pub fn id(&self) -> u64 {
        match self {
            Item::Story(s) => s.id,
            Item::Comment(c) => c.id,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            Item::Story(s) => &s.author,
            Item::Comment(c) => &c.author,
        }
    }

    pub fn child_ids(&self) -> &[u64] {
        match self {
            Item::Story(s) => &s.child_ids,
            Item::Comment(c) => &c.child_ids,
        }
    }

    /// Parent id when this item is a comment
    pub fn parent_id(&self) -> Option<u64> {
        match self {
            Item::Story(_) => None,
            Item::Comment(c) => Some(c.parent_id),
        }
    }

    /// Title shown in the breadcrumb stack: the story's own title, or a
    /// synthesized label for comments.
    pub fn display_title(&self) -> String {
        match self {
            Item::Story(s) => s.title.clone(),
            Item::Comment(c) => format!("Comment by {}", c.author),
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Item::Comment(c) => Some(c),
            Item::Story(_) => None,
        }
    }
}

/// One hop of the ancestry chain, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub id: u64,
    pub title: String,
}

impl PathEntry {
    pub fn for_item(item: &Item) -> Self {
        Self {
            id: item.id(),
            title: item.display_title(),
        }
    }
}

/// Home collection layout. Persisted per user; grid is the shipped default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    /// Parse a persisted value, ignoring anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_for_comment_is_synthesized() {
        let item = Item::Comment(Comment {
            id: 2,
            author: "pg".into(),
            text: String::new(),
            time: 0,
            child_ids: vec![],
            parent_id: 1,
            deleted: false,
            total_reply_count: None,
        });
        assert_eq!(item.display_title(), "Comment by pg");
    }

    #[test]
    fn view_mode_parse_rejects_unknown() {
        assert_eq!(ViewMode::parse("grid"), Some(ViewMode::Grid));
        assert_eq!(ViewMode::parse("list"), Some(ViewMode::List));
        assert_eq!(ViewMode::parse("mosaic"), None);
    }
}
