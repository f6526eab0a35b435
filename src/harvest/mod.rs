//! Pull-based harvesting.
//!
//! ```text
//! ArchiveReader::next → Buffered → PageSource::advance → WeiboApi → Normalizer
//! ```
//!
//! A [`PageSource`] produces one page of articles per call. [`Buffered`]
//! turns that into a one-article-at-a-time sequence, and the readers add the
//! host-facing `initialize`/`next` lifecycle on top.

mod buffer;
mod cursor;
mod reader;
mod timeline;

#[cfg(test)]
pub(crate) mod testing;

pub use buffer::Buffered;
pub use cursor::PageCursor;
pub use reader::{SingleUserReader, TimelineReader};
pub use timeline::TimelineCursor;

use async_trait::async_trait;
use futures::stream::{self, Stream};

use crate::app::{HarvestError, Result};
use crate::domain::Article;

/// Output of one [`PageSource::advance`] call.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub articles: Vec<Article>,
    /// `false` once the source has nothing after this page.
    pub has_more: bool,
}

impl Page {
    pub fn exhausted() -> Self {
        Self::default()
    }
}

#[async_trait]
pub trait PageSource: Send {
    async fn advance(&mut self) -> Result<Page>;
}

/// Host-facing reader lifecycle.
#[async_trait]
pub trait ArchiveReader: Send {
    /// Validate options and reset the session. Must be called before `next`.
    fn initialize(&mut self) -> Result<()>;

    /// Next article, or `None` once the sequence has ended.
    async fn next(&mut self) -> Result<Option<Article>>;
}

#[async_trait]
impl ArchiveReader for Box<dyn ArchiveReader> {
    fn initialize(&mut self) -> Result<()> {
        (**self).initialize()
    }

    async fn next(&mut self) -> Result<Option<Article>> {
        (**self).next().await
    }
}

/// Drive an initialized reader as a stream. The stream ends after the first error.
pub fn into_stream<R>(reader: R) -> impl Stream<Item = Result<Article>>
where
    R: ArchiveReader + 'static,
{
    stream::try_unfold(reader, |mut reader| async move {
        let next = reader.next().await?;
        Ok::<_, HarvestError>(next.map(|article| (article, reader)))
    })
}
