use std::collections::VecDeque;

use crate::app::{HarvestError, Result};
use crate::domain::Article;
use crate::harvest::PageSource;

/// Buffers page-sized batches from a [`PageSource`] and hands them out one at a time.
///
/// The source is only advanced when the buffer is empty. Once a page reports
/// `has_more == false` the sequence is finished and the source is never
/// touched again. A missing posts container also finishes the sequence, since
/// the user has nothing to harvest. Other errors leave the state as it was, so
/// calling `next` again retries the same page.
pub struct Buffered<S> {
    source: S,
    pending: VecDeque<Article>,
    finished: bool,
}

impl<S: PageSource> Buffered<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    pub async fn next(&mut self) -> Result<Option<Article>> {
        loop {
            if let Some(article) = self.pending.pop_front() {
                return Ok(Some(article));
            }
            if self.finished {
                return Ok(None);
            }

            let page = match self.source.advance().await {
                Ok(page) => page,
                Err(err @ HarvestError::ContainerNotFound(_)) => {
                    tracing::warn!("{}; ending session", err);
                    self.finished = true;
                    return Err(err);
                }
                Err(err) => return Err(err),
            };
            if !page.has_more {
                tracing::info!("Source exhausted");
                self.finished = true;
            }
            // A page of only ads and navigation cards yields nothing; keep going.
            self.pending.extend(page.articles);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished && self.pending.is_empty()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
