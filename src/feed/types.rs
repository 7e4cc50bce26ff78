use serde::Deserialize;

/// Raw post shape returned by the content service.
///
/// Unknown fields (`userId` and anything the service adds later) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// One entry in the in-memory feed.
///
/// `thumbnail_url` is derived deterministically from `id`. `unique_key` is
/// generated at fetch time from `id` and the fetch timestamp — it is NOT a
/// stable identifier and is only unique within a single fetch batch. The same
/// post fetched again (e.g. overlapping server pages) appears again with a
/// different key; the feed deliberately does not deduplicate by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub thumbnail_url: String,
    pub unique_key: String,
}

impl RawPost {
    /// Map a raw post into a [`FeedItem`] for the given fetch instant.
    pub fn into_item(self, thumbnail_base: &str, fetched_at_millis: i64) -> FeedItem {
        FeedItem {
            thumbnail_url: format!("{}/100/100?random={}", thumbnail_base, self.id),
            unique_key: format!("{}-{}", self.id, fetched_at_millis),
            id: self.id,
            title: self.title,
            body: self.body,
        }
    }
}
