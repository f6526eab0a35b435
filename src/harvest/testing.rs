use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::types::{
    Card, ListingData, ListingPage, Mblog, Tab, TabsInfo, Timeline, TimelineData, UserIndex,
    UserIndexData,
};
use crate::api::WeiboApi;
use crate::app::{HarvestError, Result};

pub const CONTAINER_ID: &str = "1076030000000123";

pub fn post_card(id: &str, text: &str) -> Card {
    Card {
        card_type: Some(9),
        mblog: Some(Mblog {
            id: Some(id.into()),
            text: Some(text.into()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn ad_card() -> Card {
    Card {
        card_type: Some(11),
        ..Default::default()
    }
}

pub fn listing(cards: Vec<Card>) -> ListingPage {
    ListingPage {
        ok: Some(1),
        data: Some(ListingData {
            cards,
            ..Default::default()
        }),
    }
}

pub fn timeline(statuses: Vec<Mblog>, next_cursor: &str) -> Timeline {
    Timeline {
        ok: Some(1),
        http_code: Some(200),
        data: Some(TimelineData {
            statuses,
            next_cursor_str: Some(next_cursor.into()),
            ..Default::default()
        }),
    }
}

/// In-memory [`WeiboApi`] serving scripted listing pages and feed pages.
///
/// Listing page `n` is `listings[n - 1]`; pages past the end are empty.
/// Feed responses are served in order; every call records its `max_id`.
/// With `without_posts_tab` the user index has no `"weibo"` tab.
#[derive(Default)]
pub struct FakeApi {
    pub listings: Vec<ListingPage>,
    pub without_posts_tab: bool,
    pub failing_page: Option<u32>,
    pub feed: Mutex<VecDeque<Timeline>>,
    pub index_calls: AtomicUsize,
    pub listing_calls: AtomicUsize,
    pub requested_pages: Mutex<Vec<u32>>,
    pub requested_max_ids: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_listings(listings: Vec<ListingPage>) -> Self {
        Self {
            listings,
            ..Default::default()
        }
    }

    pub fn with_feed(feed: Vec<Timeline>) -> Self {
        Self {
            feed: Mutex::new(feed.into()),
            ..Default::default()
        }
    }

    pub fn index_calls(&self) -> usize {
        self.index_calls.load(Ordering::SeqCst)
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeiboApi for FakeApi {
    async fn fetch_user_index(&self, _uid: &str) -> Result<UserIndex> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        if self.without_posts_tab {
            return Ok(UserIndex {
                ok: Some(1),
                data: Some(UserIndexData::default()),
            });
        }
        Ok(UserIndex {
            ok: Some(1),
            data: Some(UserIndexData {
                tabs_info: Some(TabsInfo {
                    selected_tab: Some(1),
                    tabs: vec![Tab {
                        tab_key: Some("weibo".into()),
                        containerid: Some(CONTAINER_ID.into()),
                        ..Default::default()
                    }],
                }),
                ..Default::default()
            }),
        })
    }

    async fn fetch_listing_page(
        &self,
        _uid: &str,
        container_id: &str,
        page: u32,
    ) -> Result<ListingPage> {
        assert_eq!(container_id, CONTAINER_ID);
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_pages.lock().unwrap().push(page);

        if self.failing_page == Some(page) {
            return Err(HarvestError::Other(format!("page {} unavailable", page)));
        }
        let index = page as usize - 1;
        Ok(self
            .listings
            .get(index)
            .cloned()
            .unwrap_or_else(|| listing(Vec::new())))
    }

    async fn fetch_feed(&self, _cookie_sub: &str, max_id: &str) -> Result<Timeline> {
        self.requested_max_ids.lock().unwrap().push(max_id.to_string());
        Ok(self
            .feed
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| timeline(Vec::new(), "0")))
    }
}
