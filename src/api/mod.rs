pub mod container;
pub mod http_client;
pub mod types;

use async_trait::async_trait;

use crate::app::Result;
use types::{ListingPage, Timeline, UserIndex};

pub use container::ContainerResolver;
pub use http_client::HttpWeiboClient;

/// The three m.weibo.cn calls the harvester needs.
///
/// Implementations must keep transport failures (`HarvestError::Transport`)
/// apart from undecodable bodies (`HarvestError::Decode`).
#[async_trait]
pub trait WeiboApi {
    /// Profile index of `uid`, listing the tabs and their container ids.
    async fn fetch_user_index(&self, uid: &str) -> Result<UserIndex>;

    /// One page of the posts container of `uid`. Pages start at 1.
    async fn fetch_listing_page(&self, uid: &str, container_id: &str, page: u32)
        -> Result<ListingPage>;

    /// Friends timeline of the account owning the `SUB` session cookie.
    /// `max_id` is empty for the newest page.
    async fn fetch_feed(&self, cookie_sub: &str, max_id: &str) -> Result<Timeline>;
}
