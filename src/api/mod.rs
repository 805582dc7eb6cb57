// Remote item gateway - read-only access to the Hacker News APIs
//
// Primary source is the Firebase API (flat items, ranked top-story ids).
// For replies we try the Algolia API first because its nested tree is the
// only way to learn total descendant counts; any Algolia failure falls back
// to Firebase for that id. Batches resolve concurrently but are recombined
// in input order, never completion order.

pub mod models;

use crate::item::{Comment, Item, PathEntry, Story};
use futures::future::join_all;
use models::{AlgoliaItem, RawItem};
use std::fmt;

/// Ancestry walks stop here even if the parent chain claims to go deeper.
/// Guards against malformed or cyclic parent links.
const MAX_ANCESTRY_DEPTH: usize = 30;

/// Errors from the remote gateway
#[derive(Debug, Clone)]
pub enum ApiError {
    /// The remote source answered with an empty/null payload for this id
    NotFound(u64),
    /// Transport failure or non-2xx status
    Fetch(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(id) => write!(f, "item {} not found", id),
            ApiError::Fetch(msg) => write!(f, "fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Fetch(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Read-only client for the item tree
#[derive(Debug, Clone)]
pub struct HnClient {
    http: reqwest::Client,
    /// Firebase base, e.g. https://hacker-news.firebaseio.com/v0
    base_url: String,
    /// Algolia base, e.g. https://hn.algolia.com/api/v1
    enrich_url: String,
}

impl HnClient {
    pub fn new(base_url: &str, enrich_url: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            enrich_url: enrich_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a single item from the primary source.
    pub async fn item(&self, id: u64) -> ApiResult<Item> {
        let url = format!("{}/item/{}.json", self.base_url, id);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Fetch(format!("{} -> {}", url, resp.status())));
        }
        // Firebase answers a literal `null` for unknown ids
        let raw: Option<RawItem> = resp.json().await?;
        match raw {
            Some(raw) => Ok(raw.into_item()),
            None => Err(ApiError::NotFound(id)),
        }
    }

    /// Fetch the ranked top-story id list.
    pub async fn top_story_ids(&self) -> ApiResult<Vec<u64>> {
        let url = format!("{}/topstories.json", self.base_url);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Fetch(format!("{} -> {}", url, resp.status())));
        }
        Ok(resp.json().await?)
    }

    /// Fetch a page of top stories: slice `[offset, offset + limit)` of the
    /// ranked id list, resolve concurrently, keep rank order. Individual
    /// failures (and the odd non-story payload) are dropped, not fatal.
    pub async fn top_stories(&self, limit: usize, offset: usize) -> ApiResult<Vec<Story>> {
        let ids = self.top_story_ids().await?;
        let page: Vec<u64> = ids.into_iter().skip(offset).take(limit).collect();

        let fetches = page.iter().map(|&id| self.item(id));
        let resolved = join_all(fetches).await;

        let mut stories = Vec::with_capacity(page.len());
        for (id, result) in page.iter().zip(resolved) {
            match result {
                Ok(Item::Story(story)) => stories.push(story),
                Ok(Item::Comment(_)) => {
                    tracing::debug!("top-story id {} resolved to a comment, skipping", id);
                }
                Err(e) => {
                    tracing::warn!("dropping top story {}: {}", id, e);
                }
            }
        }
        Ok(stories)
    }

    /// Fetch one item for the focus view, enriched source first. The Algolia
    /// payload carries the nested subtree (hence total descendant counts); on
    /// any failure there we fall back to the primary source for the same id.
    pub async fn item_enriched(&self, id: u64) -> ApiResult<Item> {
        match self.enriched_item(id).await {
            Ok(item) => Ok(item),
            Err(e) => {
                tracing::debug!("enrichment miss for {}: {}, trying primary", id, e);
                self.item(id).await
            }
        }
    }

    /// Fetch one reply with enrichment, rejecting non-comment payloads.
    pub async fn reply(&self, id: u64) -> ApiResult<Comment> {
        match self.item_enriched(id).await? {
            Item::Comment(c) => Ok(c),
            Item::Story(_) => Err(ApiError::Fetch(format!("reply {} resolved to a story", id))),
        }
    }

    async fn enriched_item(&self, id: u64) -> ApiResult<Item> {
        let url = format!("{}/items/{}", self.enrich_url, id);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Fetch(format!("{} -> {}", url, resp.status())));
        }
        let raw: Option<AlgoliaItem> = resp.json().await?;
        match raw {
            Some(raw) => Ok(raw.into_item()),
            None => Err(ApiError::NotFound(id)),
        }
    }

    /// Resolve a set of reply ids concurrently. Failed and deleted replies
    /// are dropped; survivors keep their relative input order.
    pub async fn replies(&self, ids: &[u64]) -> Vec<Comment> {
        let fetches = ids.iter().map(|&id| self.reply(id));
        let resolved = join_all(fetches).await;

        let mut replies = Vec::with_capacity(ids.len());
        for (id, result) in ids.iter().zip(resolved) {
            match result {
                Ok(c) if c.deleted => {
                    tracing::debug!("reply {} is deleted, skipping", id);
                }
                Ok(c) => replies.push(c),
                Err(e) => {
                    tracing::warn!("dropping reply {}: {}", id, e);
                }
            }
        }
        replies
    }

    /// Walk parent links from `item` up to its story root, returning the
    /// chain root-first (the item itself is not included). A failed hop
    /// truncates the chain silently rather than failing the view.
    pub async fn ancestry(&self, item: &Item) -> Vec<PathEntry> {
        let mut chain = Vec::new();
        let mut parent_id = item.parent_id();
        let mut depth = 0;

        while let Some(id) = parent_id {
            if id == 0 || depth >= MAX_ANCESTRY_DEPTH {
                break;
            }
            match self.item(id).await {
                Ok(parent) => {
                    parent_id = parent.parent_id();
                    chain.push(PathEntry::for_item(&parent));
                    depth += 1;
                }
                Err(e) => {
                    tracing::warn!("ancestry truncated at {}: {}", id, e);
                    break;
                }
            }
        }

        chain.reverse();
        chain
    }
}
