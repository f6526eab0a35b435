use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::api::{ContainerResolver, HttpWeiboClient, WeiboApi};
use crate::app::error::Result;
use crate::cache::TtlCache;
use crate::config::Config;
use crate::harvest::{SingleUserReader, TimelineReader};
use crate::normalizer::Normalizer;

pub struct AppContext {
    pub config: Config,
    pub api: Arc<dyn WeiboApi + Send + Sync>,
    pub container_cache: Arc<TtlCache<String, String>>,
    pub resolver: ContainerResolver,
    pub normalizer: Normalizer,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let api: Arc<dyn WeiboApi + Send + Sync> = Arc::new(HttpWeiboClient::new(&config.api)?);
        Ok(Self::with_api(config, api))
    }

    /// Wire everything around an existing API client.
    pub fn with_api(config: Config, api: Arc<dyn WeiboApi + Send + Sync>) -> Self {
        let container_cache = Arc::new(TtlCache::new(config.cache.ttl()));
        let resolver = ContainerResolver::new(api.clone(), container_cache.clone());
        let normalizer = Normalizer::new();

        Self {
            config,
            api,
            container_cache,
            resolver,
            normalizer,
        }
    }

    /// Start the periodic purge of expired container ids. Requires a tokio runtime.
    pub fn spawn_cache_sweeper(&self) -> JoinHandle<()> {
        self.container_cache
            .spawn_sweeper(self.config.cache.sweep_interval())
    }

    pub fn user_reader(&self, uid: impl Into<String>) -> SingleUserReader {
        SingleUserReader::new(
            uid,
            self.api.clone(),
            self.resolver.clone(),
            self.normalizer.clone(),
        )
    }

    pub fn timeline_reader(&self, cookie_sub: impl Into<String>) -> TimelineReader {
        TimelineReader::new(cookie_sub, self.api.clone(), self.normalizer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::testing::{listing, post_card, FakeApi};
    use crate::harvest::ArchiveReader;

    #[tokio::test]
    async fn test_readers_share_container_cache() {
        let api = Arc::new(FakeApi::with_listings(vec![listing(vec![post_card("1", "a")])]));
        let ctx = AppContext::with_api(Config::default(), api.clone());

        let mut first = ctx.user_reader("123");
        first.initialize().unwrap();
        first.next().await.unwrap();

        let mut second = ctx.user_reader("123");
        second.initialize().unwrap();
        second.next().await.unwrap();

        assert_eq!(api.index_calls(), 1);
        assert_eq!(ctx.container_cache.len(), 1);
    }

    #[test]
    fn test_new_builds_http_client() {
        let ctx = AppContext::new(Config::default()).unwrap();
        assert_eq!(ctx.container_cache.ttl(), std::time::Duration::from_secs(300));
    }
}
