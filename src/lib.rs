//! # weibo-harvest
//!
//! Harvests Weibo posts from the m.weibo.cn mobile API and turns them into
//! markdown articles for an archiving host.
//!
//! ## Architecture
//!
//! ```text
//! ArchiveReader → PageCursor → ContainerResolver (TTL cache) → WeiboApi → Normalizer
//! ```
//!
//! - [`api`]: HTTP client for the mobile API and container resolution
//! - [`cache`]: In-memory TTL cache for container ids
//! - [`normalizer`]: Converts posts into [`Article`](domain::Article)s
//! - [`harvest`]: Pagination and the one-article-at-a-time readers
//!
//! ## Quick Start
//!
//! ```bash
//! # All posts of a user as JSON lines
//! weibo-harvest user 2656274875
//!
//! # Friends timeline of a logged-in account
//! WEIBO_COOKIE_SUB=... weibo-harvest timeline --limit 50
//! ```

/// Application context and error types.
///
/// [`AppContext`](app::AppContext) wires the API client, the container cache
/// and the normalizer together and hands out readers.
pub mod app;

/// m.weibo.cn endpoints.
///
/// - [`WeiboApi`](api::WeiboApi): Async trait over the three calls
/// - [`HttpWeiboClient`](api::HttpWeiboClient): reqwest-based implementation
/// - [`ContainerResolver`](api::ContainerResolver): uid → container id, cached
/// - [`types`](api::types): Response shapes
pub mod api;

/// Expiring in-memory key/value store with a pluggable clock.
pub mod cache;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/weibo-harvest/config.toml`.
pub mod config;

/// Canonical article model and identifier derivation.
pub mod domain;

/// Pagination cursors, buffering, and the host-facing readers.
pub mod harvest;

/// Post to article conversion.
pub mod normalizer;

/// Reader services exposed to an archiving host.
pub mod provision;
