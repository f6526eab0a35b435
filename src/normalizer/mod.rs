use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::api::types::{Card, Mblog};
use crate::domain::{Article, Author, Media};

/// Layout of `created_at` in API responses, e.g. `Sat Oct 17 12:00:00 +0800 2020`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("HTML to markdown conversion panicked")]
    Panicked,

    #[error("{0}")]
    Other(String),
}

pub trait MarkdownConverter {
    fn convert(&self, html: &str) -> Result<String, ConversionError>;
}

/// Converter backed by `html2md`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2MdConverter;

impl MarkdownConverter for Html2MdConverter {
    fn convert(&self, html: &str) -> Result<String, ConversionError> {
        // html2md panics on some malformed markup instead of returning an error.
        panic::catch_unwind(AssertUnwindSafe(|| html2md::parse_html(html)))
            .map_err(|_| ConversionError::Panicked)
    }
}

pub fn parse_created_at(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw.trim(), CREATED_AT_FORMAT).ok()
}

/// Turns listing cards and timeline statuses into [`Article`]s.
///
/// Never fails: a bad date leaves `publish_date` unset and a failed markdown
/// conversion keeps the raw text.
#[derive(Clone)]
pub struct Normalizer {
    converter: Arc<dyn MarkdownConverter + Send + Sync>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::with_converter(Arc::new(Html2MdConverter))
    }

    pub fn with_converter(converter: Arc<dyn MarkdownConverter + Send + Sync>) -> Self {
        Self { converter }
    }

    /// Cards without a post payload are skipped; order is preserved.
    pub fn normalize_cards(&self, cards: &[Card]) -> Vec<Article> {
        cards
            .iter()
            .filter_map(|card| card.mblog.as_ref())
            .filter_map(|mblog| self.normalize_post(mblog))
            .collect()
    }

    pub fn normalize_posts(&self, posts: &[Mblog]) -> Vec<Article> {
        posts
            .iter()
            .filter_map(|mblog| self.normalize_post(mblog))
            .collect()
    }

    /// Returns `None` only when the post has no id to derive an article id from.
    pub fn normalize_post(&self, mblog: &Mblog) -> Option<Article> {
        let Some(native_id) = mblog.id.as_deref().or(mblog.mid.as_deref()) else {
            tracing::warn!("Skipping post without id");
            return None;
        };

        let mut article = Article::new(native_id);

        if let Some(created_at) = mblog.created_at.as_deref() {
            article.publish_date = parse_created_at(created_at);
            if article.publish_date.is_none() {
                tracing::warn!("Unparseable created_at {:?} on post {}", created_at, native_id);
            }
        }

        if let Some(text) = mblog.text.as_deref() {
            article.content = match self.converter.convert(text) {
                Ok(markdown) => markdown,
                Err(e) => {
                    tracing::warn!("Markdown conversion failed for post {}: {}", native_id, e);
                    text.to_string()
                }
            };
        }

        if let Some(user) = &mblog.user {
            if let Some(user_id) = &user.id {
                article.author = Some(Author::new(&user_id.to_string(), user.screen_name.clone()));
            }
        }

        article.media = mblog
            .pics
            .iter()
            .filter_map(|pic| pic.url.as_deref())
            .map(Media::image)
            .collect();

        Some(article)
    }
}
