// Data models for parsing Hacker News API payloads
//
// Two remote shapes feed the same domain model:
// - Firebase (`/v0/item/{id}.json`): flat items with child id lists
// - Algolia (`/api/v1/items/{id}`): the same item with children nested
//   inline, which is the only way to learn total descendant counts
//
// We only parse the fields we care about. Serde ignores extras, keeping this
// robust to upstream additions.

use crate::item::{Comment, Item, Story};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// A raw item from the Firebase API. Every field except `id` is optional in
/// practice; deleted items arrive with almost nothing set.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub by: Option<String>,
    #[serde(default)]
    pub time: i64,
    pub text: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub score: Option<u32>,
    pub descendants: Option<u32>,
    #[serde(default)]
    pub kids: Vec<u64>,
    pub parent: Option<u64>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

impl RawItem {
    /// Discriminate into the domain variant. Stories, jobs and polls are all
    /// top-level roots; everything else is a comment.
    pub fn into_item(self) -> Item {
        if matches!(self.kind.as_deref(), Some("story" | "job" | "poll")) {
            Item::Story(self.into_story())
        } else {
            Item::Comment(self.into_comment())
        }
    }

    pub fn into_story(self) -> Story {
        Story {
            id: self.id,
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            url: self.url,
            author: self.by.unwrap_or_else(|| "unknown".to_string()),
            points: self.score.unwrap_or(0),
            comment_count: self.descendants.unwrap_or(0),
            time: self.time,
            text: self.text.map(|t| sanitize_text(&t)),
            child_ids: self.kids,
        }
    }

    pub fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            author: self.by.unwrap_or_else(|| "unknown".to_string()),
            text: sanitize_text(&self.text.unwrap_or_default()),
            time: self.time,
            child_ids: self.kids,
            parent_id: self.parent.unwrap_or(0),
            deleted: self.deleted || self.dead,
            total_reply_count: None,
        }
    }
}

/// A raw item from the Algolia enrichment API, children nested inline.
#[derive(Debug, Clone, Deserialize)]
pub struct AlgoliaItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub points: Option<u32>,
    pub text: Option<String>,
    #[serde(default)]
    pub created_at_i: i64,
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub children: Vec<AlgoliaItem>,
}

impl AlgoliaItem {
    /// Count every node below this one in the inlined tree.
    fn descendant_count(&self) -> u32 {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    pub fn into_item(self) -> Item {
        let total = self.descendant_count();
        let child_ids: Vec<u64> = self.children.iter().map(|c| c.id).collect();

        if matches!(self.kind.as_deref(), Some("story" | "job" | "poll")) {
            Item::Story(Story {
                id: self.id,
                title: self.title.unwrap_or_else(|| "Untitled".to_string()),
                url: self.url,
                author: self.author.unwrap_or_else(|| "unknown".to_string()),
                points: self.points.unwrap_or(0),
                comment_count: total,
                time: self.created_at_i,
                text: self.text.map(|t| sanitize_text(&t)),
                child_ids,
            })
        } else {
            Item::Comment(Comment {
                id: self.id,
                author: self.author.unwrap_or_else(|| "unknown".to_string()),
                text: sanitize_text(&self.text.unwrap_or_default()),
                time: self.created_at_i,
                child_ids,
                parent_id: self.parent_id.unwrap_or(0),
                deleted: false,
                total_reply_count: Some(total),
            })
        }
    }
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</?p>|<br\s*/?>").unwrap())
}

fn any_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn signature_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)--\s*Sent from my (iPhone|iPad|Android)|--\s*Posted via \S+|\[dead\]")
            .unwrap()
    })
}

/// Turn an HN HTML body into plain terminal text: paragraph breaks become
/// newlines, remaining tags are dropped, entities are decoded, and common
/// signature noise is stripped.
pub fn sanitize_text(html: &str) -> String {
    let with_breaks = tag_re().replace_all(html, "\n\n");
    let stripped = any_tag_re().replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);
    signature_re().replace_all(&decoded, "").trim().to_string()
}

/// Decode the handful of entities the HN API actually emits.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let end = match rest.find(';') {
            // Entities are short; anything longer is a stray ampersand
            Some(end) if end <= 8 => end,
            _ => {
                out.push('&');
                rest = &rest[1..];
                continue;
            }
        };
        let entity = &rest[..=end];
        match entity {
            "&amp;" => out.push('&'),
            "&lt;" => out.push('<'),
            "&gt;" => out.push('>'),
            "&quot;" => out.push('"'),
            "&#x27;" | "&#39;" => out.push('\''),
            "&#x2F;" | "&#47;" => out.push('/'),
            other => {
                // Numeric entities: &#NNN; and &#xHH;
                let decoded = other
                    .strip_prefix("&#x")
                    .and_then(|s| u32::from_str_radix(s.trim_end_matches(';'), 16).ok())
                    .or_else(|| {
                        other
                            .strip_prefix("&#")
                            .and_then(|s| s.trim_end_matches(';').parse().ok())
                    })
                    .and_then(char::from_u32);
                match decoded {
                    Some(c) => out.push(c),
                    None => out.push_str(other),
                }
            }
        }
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: &str) -> RawItem {
        RawItem {
            id: 1,
            kind: Some(kind.to_string()),
            by: Some("pg".to_string()),
            time: 1_700_000_000,
            text: None,
            title: Some("A title".to_string()),
            url: None,
            score: Some(42),
            descendants: Some(7),
            kids: vec![2, 3],
            parent: None,
            deleted: false,
            dead: false,
        }
    }

    #[test]
    fn story_job_poll_map_to_story() {
        for kind in ["story", "job", "poll"] {
            assert!(matches!(raw(kind).into_item(), Item::Story(_)));
        }
        assert!(matches!(raw("comment").into_item(), Item::Comment(_)));
    }

    #[test]
    fn dead_flag_marks_comment_deleted() {
        let mut r = raw("comment");
        r.dead = true;
        let Item::Comment(c) = r.into_item() else {
            panic!("expected comment");
        };
        assert!(c.deleted);
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let r = RawItem {
            id: 9,
            kind: Some("story".into()),
            by: None,
            time: 0,
            text: None,
            title: None,
            url: None,
            score: None,
            descendants: None,
            kids: vec![],
            parent: None,
            deleted: false,
            dead: false,
        };
        let Item::Story(s) = r.into_item() else {
            panic!("expected story");
        };
        assert_eq!(s.title, "Untitled");
        assert_eq!(s.author, "unknown");
        assert_eq!(s.points, 0);
    }

    #[test]
    fn sanitize_strips_tags_and_decodes_entities() {
        let html = "I agree.<p>It&#x27;s &lt;great&gt; &amp; fast. <a href=\"x\">link</a>";
        let text = sanitize_text(html);
        assert_eq!(text, "I agree.\n\nIt's <great> & fast. link");
    }

    #[test]
    fn sanitize_strips_signature_noise() {
        let text = sanitize_text("good point -- Sent from my iPhone");
        assert_eq!(text, "good point");
    }

    #[test]
    fn stray_ampersand_survives() {
        assert_eq!(sanitize_text("AT&T rocks & rolls"), "AT&T rocks & rolls");
    }

    #[test]
    fn algolia_descendant_count_is_recursive() {
        let json = serde_json::json!({
            "id": 1,
            "type": "comment",
            "author": "a",
            "text": "root",
            "created_at_i": 0,
            "parent_id": 99,
            "children": [
                { "id": 2, "type": "comment", "author": "b", "text": "x",
                  "created_at_i": 0, "parent_id": 1,
                  "children": [
                    { "id": 4, "type": "comment", "author": "d", "text": "z",
                      "created_at_i": 0, "parent_id": 2, "children": [] }
                  ] },
                { "id": 3, "type": "comment", "author": "c", "text": "y",
                  "created_at_i": 0, "parent_id": 1, "children": [] }
            ]
        });
        let item: AlgoliaItem = serde_json::from_value(json).unwrap();
        let Item::Comment(c) = item.into_item() else {
            panic!("expected comment");
        };
        assert_eq!(c.total_reply_count, Some(3));
        assert_eq!(c.child_ids, vec![2, 3]);
    }
}
