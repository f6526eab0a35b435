use std::sync::Arc;

use crate::api::WeiboApi;
use crate::app::{HarvestError, Result};
use crate::cache::TtlCache;

/// Tab of the profile index that holds the user's own posts.
pub const WEIBO_TAB_KEY: &str = "weibo";

fn cache_key(uid: &str) -> String {
    format!("weibo:containerid:{}", uid)
}

/// Maps a user id to the container id of their posts tab.
///
/// Successful lookups are cached for the cache's TTL. Failed lookups are
/// never cached, so every miss goes back to the network.
#[derive(Clone)]
pub struct ContainerResolver {
    api: Arc<dyn WeiboApi + Send + Sync>,
    cache: Arc<TtlCache<String, String>>,
}

impl ContainerResolver {
    pub fn new(api: Arc<dyn WeiboApi + Send + Sync>, cache: Arc<TtlCache<String, String>>) -> Self {
        Self { api, cache }
    }

    pub async fn resolve(&self, uid: &str) -> Result<String> {
        let key = cache_key(uid);
        if let Some(container_id) = self.cache.get(&key) {
            tracing::debug!("Container cache hit for {}", uid);
            return Ok(container_id);
        }

        tracing::debug!("Container cache miss for {}", uid);
        let index = self.api.fetch_user_index(uid).await?;
        let container_id = index
            .container_for(WEIBO_TAB_KEY)
            .map(String::from)
            .ok_or_else(|| HarvestError::ContainerNotFound(uid.to_string()))?;

        self.cache.set(key, container_id.clone());
        Ok(container_id)
    }
}
