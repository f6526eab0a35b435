use std::sync::Arc;

use async_trait::async_trait;

use crate::api::WeiboApi;
use crate::app::Result;
use crate::harvest::{Page, PageSource};
use crate::normalizer::Normalizer;

/// Walks the friends timeline of the account behind a `SUB` session cookie.
///
/// Each response's `next_cursor_str` becomes the next request's `max_id`.
/// A missing, empty or `"0"` cursor marks the last page.
pub struct TimelineCursor {
    cookie_sub: String,
    max_id: String,
    api: Arc<dyn WeiboApi + Send + Sync>,
    normalizer: Normalizer,
}

impl TimelineCursor {
    pub fn new(
        cookie_sub: impl Into<String>,
        api: Arc<dyn WeiboApi + Send + Sync>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            cookie_sub: cookie_sub.into(),
            max_id: String::new(),
            api,
            normalizer,
        }
    }

    pub fn max_id(&self) -> &str {
        &self.max_id
    }
}

#[async_trait]
impl PageSource for TimelineCursor {
    async fn advance(&mut self) -> Result<Page> {
        tracing::debug!("Fetching timeline page max_id={:?}", self.max_id);
        let timeline = self.api.fetch_feed(&self.cookie_sub, &self.max_id).await?;

        if !timeline.is_ok() {
            tracing::info!("Timeline returned ok={:?}, stopping", timeline.ok);
            return Ok(Page::exhausted());
        }
        let Some(data) = timeline.data else {
            return Ok(Page::exhausted());
        };
        if data.statuses.is_empty() {
            return Ok(Page::exhausted());
        }

        let articles = self.normalizer.normalize_posts(&data.statuses);
        let has_more = match data.next_cursor_str {
            Some(next) if !next.is_empty() && next != "0" => {
                self.max_id = next;
                true
            }
            _ => false,
        };

        Ok(Page { articles, has_more })
    }
}
