use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ContainerResolver, WeiboApi};
use crate::app::Result;
use crate::harvest::{Page, PageSource};
use crate::normalizer::Normalizer;

/// Walks the listing pages of one user's posts container.
///
/// The page counter starts at 0 and only moves forward once a page has been
/// fetched, so the first call requests page 1 and a failed call is retried
/// with the same page number. A page whose articles are exactly those of the
/// previous page ends the walk, since the endpoint is no longer moving forward.
pub struct PageCursor {
    uid: String,
    current_page: u32,
    previous_ids: Vec<String>,
    api: Arc<dyn WeiboApi + Send + Sync>,
    resolver: ContainerResolver,
    normalizer: Normalizer,
}

impl PageCursor {
    pub fn new(
        uid: impl Into<String>,
        api: Arc<dyn WeiboApi + Send + Sync>,
        resolver: ContainerResolver,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            uid: uid.into(),
            current_page: 0,
            previous_ids: Vec::new(),
            api,
            resolver,
            normalizer,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }
}

#[async_trait]
impl PageSource for PageCursor {
    async fn advance(&mut self) -> Result<Page> {
        let page = self.current_page + 1;
        let container_id = self.resolver.resolve(&self.uid).await?;

        tracing::debug!("Fetching page {} of user {}", page, self.uid);
        let listing = self
            .api
            .fetch_listing_page(&self.uid, &container_id, page)
            .await?;
        self.current_page = page;

        if !listing.is_ok() || listing.cards().is_empty() {
            tracing::info!("No more posts for user {} after page {}", self.uid, page - 1);
            return Ok(Page::exhausted());
        }

        let articles = self.normalizer.normalize_cards(listing.cards());
        let ids: Vec<String> = articles.iter().map(|a| a.id.clone()).collect();
        if !ids.is_empty() && ids == self.previous_ids {
            tracing::warn!(
                "Page {} of user {} repeats the previous page; stopping",
                page,
                self.uid
            );
            return Ok(Page::exhausted());
        }
        if !ids.is_empty() {
            self.previous_ids = ids;
        }

        Ok(Page {
            articles,
            has_more: true,
        })
    }
}
