use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ContainerResolver, WeiboApi};
use crate::app::{HarvestError, Result};
use crate::domain::Article;
use crate::harvest::{ArchiveReader, Buffered, PageCursor, TimelineCursor};
use crate::normalizer::Normalizer;

fn not_initialized() -> HarvestError {
    HarvestError::Config("reader used before initialize()".into())
}

/// Every post of a single user, newest first.
pub struct SingleUserReader {
    pub uid: String,
    api: Arc<dyn WeiboApi + Send + Sync>,
    resolver: ContainerResolver,
    normalizer: Normalizer,
    session: Option<Buffered<PageCursor>>,
}

impl SingleUserReader {
    pub fn new(
        uid: impl Into<String>,
        api: Arc<dyn WeiboApi + Send + Sync>,
        resolver: ContainerResolver,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            uid: uid.into(),
            api,
            resolver,
            normalizer,
            session: None,
        }
    }
}

#[async_trait]
impl ArchiveReader for SingleUserReader {
    fn initialize(&mut self) -> Result<()> {
        if self.uid.trim().is_empty() {
            return Err(HarvestError::Config("must provide uid".into()));
        }
        let cursor = PageCursor::new(
            self.uid.trim(),
            self.api.clone(),
            self.resolver.clone(),
            self.normalizer.clone(),
        );
        self.session = Some(Buffered::new(cursor));
        Ok(())
    }

    async fn next(&mut self) -> Result<Option<Article>> {
        self.session.as_mut().ok_or_else(not_initialized)?.next().await
    }
}

/// Friends timeline of the logged-in account identified by its `SUB` cookie.
pub struct TimelineReader {
    pub cookie_sub: String,
    api: Arc<dyn WeiboApi + Send + Sync>,
    normalizer: Normalizer,
    session: Option<Buffered<TimelineCursor>>,
}

impl TimelineReader {
    pub fn new(
        cookie_sub: impl Into<String>,
        api: Arc<dyn WeiboApi + Send + Sync>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            cookie_sub: cookie_sub.into(),
            api,
            normalizer,
            session: None,
        }
    }
}

#[async_trait]
impl ArchiveReader for TimelineReader {
    fn initialize(&mut self) -> Result<()> {
        if self.cookie_sub.trim().is_empty() {
            return Err(HarvestError::Config("must provide SUB cookie".into()));
        }
        let cursor = TimelineCursor::new(
            self.cookie_sub.trim(),
            self.api.clone(),
            self.normalizer.clone(),
        );
        self.session = Some(Buffered::new(cursor));
        Ok(())
    }

    async fn next(&mut self) -> Result<Option<Article>> {
        self.session.as_mut().ok_or_else(not_initialized)?.next().await
    }
}
