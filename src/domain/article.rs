use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const ARTICLE_NAMESPACE: &str = "Weibo";
pub const USER_NAMESPACE: &str = "WeiboUser";
pub const RESOURCE_NAMESPACE: &str = "WeiboResource";

/// MIME hint attached to every picture; the actual content type is never inspected.
pub const IMAGE_MIME_TYPE: &str = "image/jpg";

/// Derive a stable identifier from a namespace tag and a native id.
///
/// The NUL separator keeps `("ab", "c")` and `("a", "bc")` apart.
pub fn create_id(namespace: &str, native_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update([0u8]);
    hasher.update(native_id.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub publish_date: Option<DateTime<FixedOffset>>,
    pub content: String,
    pub author: Option<Author>,
    pub media: Vec<Media>,
}

impl Article {
    pub fn new(native_id: &str) -> Self {
        Self {
            id: create_id(ARTICLE_NAMESPACE, native_id),
            publish_date: None,
            content: String::new(),
            author: None,
            media: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub full_name: Option<String>,
}

impl Author {
    pub fn new(user_id: &str, full_name: Option<String>) -> Self {
        Self {
            id: create_id(USER_NAMESPACE, user_id),
            full_name,
        }
    }
}

/// A picture referenced by an article. Only the link is kept; bytes are never fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: String,
    pub mime_type: Option<String>,
    pub external_link: Option<String>,
}

impl Media {
    pub fn image(url: &str) -> Self {
        Self {
            id: create_id(RESOURCE_NAMESPACE, url),
            mime_type: Some(IMAGE_MIME_TYPE.to_string()),
            external_link: Some(url.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation_deterministic() {
        assert_eq!(create_id("Weibo", "999"), create_id("Weibo", "999"));
    }

    #[test]
    fn test_id_depends_on_namespace() {
        assert_ne!(create_id("Weibo", "999"), create_id("WeiboUser", "999"));
        assert_ne!(create_id("ab", "c"), create_id("a", "bc"));
    }

    #[test]
    fn test_id_is_hex_sha256() {
        let id = create_id("Weibo", "999");
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_article_new_uses_article_namespace() {
        let article = Article::new("999");
        assert_eq!(article.id, create_id(ARTICLE_NAMESPACE, "999"));
        assert!(article.content.is_empty());
        assert!(article.media.is_empty());
    }

    #[test]
    fn test_media_image() {
        let media = Media::image("https://wx1.sinaimg.cn/orj360/a.jpg");
        assert_eq!(media.id, create_id(RESOURCE_NAMESPACE, "https://wx1.sinaimg.cn/orj360/a.jpg"));
        assert_eq!(media.mime_type.as_deref(), Some("image/jpg"));
        assert_eq!(
            media.external_link.as_deref(),
            Some("https://wx1.sinaimg.cn/orj360/a.jpg")
        );
    }

    #[test]
    fn test_article_serializes_to_json() {
        let mut article = Article::new("1");
        article.content = "hi".into();
        article.author = Some(Author::new("42", Some("name".into())));
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["content"], "hi");
        assert_eq!(json["author"]["full_name"], "name");
        assert!(json["publish_date"].is_null());
    }
}
