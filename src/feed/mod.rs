//! Paginated post feed: wire types and the loader state machine.

mod loader;
mod types;

pub use loader::{FeedError, FeedLoader, FeedSnapshot, LoadOutcome};
pub use types::{FeedItem, RawPost};
