// Event system - messages from background fetch tasks to the TUI
//
// Every fetch runs as a spawned tokio task and reports back over an mpsc
// channel. Results are tagged with the epoch that was current when the fetch
// started; the app drops results from a stale epoch, so a refresh or a quick
// navigation can never paint data from a superseded request.

use crate::api::HnClient;
use crate::item::{Comment, Item, PathEntry, Story};
use tokio::sync::mpsc;

/// Events delivered to the TUI event loop
#[derive(Debug)]
pub enum AppEvent {
    /// A page of top stories arrived.
    /// `append` is true for load-more pages, false for a full (re)load.
    TopStoriesLoaded {
        epoch: u64,
        stories: Vec<Story>,
        append: bool,
    },
    /// Top stories fetch failed entirely (list endpoint unreachable)
    TopStoriesFailed { epoch: u64, error: String },
    /// The focused item and its ancestry path arrived
    ItemLoaded {
        epoch: u64,
        item: Box<Item>,
        path: Vec<PathEntry>,
    },
    /// The focused item could not be fetched
    ItemFailed { epoch: u64, id: u64, error: String },
    /// Direct replies for the focused item arrived
    RepliesLoaded {
        epoch: u64,
        parent_id: u64,
        replies: Vec<Comment>,
    },
}

/// Spawn a top-stories page fetch. Failures of individual items inside the
/// page are dropped by the client; only a list-endpoint failure reports here.
pub fn spawn_top_stories(
    client: HnClient,
    tx: mpsc::Sender<AppEvent>,
    epoch: u64,
    limit: usize,
    offset: usize,
    append: bool,
) {
    tokio::spawn(async move {
        let event = match client.top_stories(limit, offset).await {
            Ok(stories) => AppEvent::TopStoriesLoaded {
                epoch,
                stories,
                append,
            },
            Err(e) => AppEvent::TopStoriesFailed {
                epoch,
                error: e.to_string(),
            },
        };
        let _ = tx.send(event).await;
    });
}

/// Spawn the item-view load: the item itself, its ancestry path, then its
/// direct replies. Item and path go out first so the view can render while
/// replies are still in flight.
pub fn spawn_item_load(client: HnClient, tx: mpsc::Sender<AppEvent>, epoch: u64, id: u64) {
    tokio::spawn(async move {
        let item = match client.item_enriched(id).await {
            Ok(item) => item,
            Err(e) => {
                let _ = tx
                    .send(AppEvent::ItemFailed {
                        epoch,
                        id,
                        error: e.to_string(),
                    })
                    .await;
                return;
            }
        };

        let path = client.ancestry(&item).await;
        let child_ids = item.child_ids().to_vec();

        if tx
            .send(AppEvent::ItemLoaded {
                epoch,
                item: Box::new(item),
                path,
            })
            .await
            .is_err()
        {
            return;
        }

        let replies = client.replies(&child_ids).await;
        let _ = tx
            .send(AppEvent::RepliesLoaded {
                epoch,
                parent_id: id,
                replies,
            })
            .await;
    });
}
