use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, REFERER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::types::{ListingPage, Timeline, UserIndex};
use crate::api::WeiboApi;
use crate::app::{HarvestError, Result};
use crate::config::ApiConfig;

const CONTAINER_INDEX_PATH: &str = "api/container/getIndex";
const FRIENDS_FEED_PATH: &str = "feed/friends";

const MWEIBO_PWA: &str = "mweibo-pwa";

pub struct HttpWeiboClient {
    client: Client,
    base_url: Url,
    referer: HeaderValue,
}

impl HttpWeiboClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let referer = HeaderValue::from_str(base_url.as_str())
            .map_err(|e| HarvestError::Config(format!("Invalid base URL for Referer: {}", e)))?;

        let mut builder = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            referer,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    fn base_headers(&self, pwa: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, self.referer.clone());
        if pwa {
            headers.insert(HeaderName::from_static(MWEIBO_PWA), HeaderValue::from_static("1"));
        }
        headers
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, headers: HeaderMap) -> Result<T> {
        let endpoint = url.path().to_string();
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).headers(headers).send().await?;
        response.error_for_status_ref()?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|source| HarvestError::Decode { endpoint, source })
    }
}

#[async_trait]
impl WeiboApi for HttpWeiboClient {
    async fn fetch_user_index(&self, uid: &str) -> Result<UserIndex> {
        let url = self.endpoint(CONTAINER_INDEX_PATH, &[("type", "uid"), ("value", uid)])?;
        self.get_json(url, self.base_headers(false)).await
    }

    async fn fetch_listing_page(
        &self,
        uid: &str,
        container_id: &str,
        page: u32,
    ) -> Result<ListingPage> {
        let page = page.to_string();
        let url = self.endpoint(
            CONTAINER_INDEX_PATH,
            &[
                ("type", "uid"),
                ("value", uid),
                ("containerid", container_id),
                ("page", page.as_str()),
            ],
        )?;
        self.get_json(url, self.base_headers(true)).await
    }

    async fn fetch_feed(&self, cookie_sub: &str, max_id: &str) -> Result<Timeline> {
        let url = self.endpoint(FRIENDS_FEED_PATH, &[("max_id", max_id)])?;
        let cookie = HeaderValue::from_str(&format!("SUB={}", cookie_sub))
            .map_err(|_| HarvestError::Config("SUB cookie contains invalid characters".into()))?;

        let mut headers = self.base_headers(true);
        headers.insert(COOKIE, cookie);
        self.get_json(url, headers).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> HttpWeiboClient {
        let config = ApiConfig {
            base_url: format!("{}/", server.uri()),
            ..Default::default()
        };
        HttpWeiboClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_user_index_sends_referer() {
        let server = MockServer::start().await;
        let referer = format!("{}/", server.uri());

        Mock::given(method("GET"))
            .and(path("/api/container/getIndex"))
            .and(query_param("type", "uid"))
            .and(query_param("value", "123"))
            .and(header("referer", referer.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"ok":1,"data":{"tabsInfo":{"tabs":[{"tabKey":"weibo","containerid":"107603123"}]}}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let index = client_for(&server).fetch_user_index("123").await.unwrap();
        assert_eq!(index.container_for("weibo"), Some("107603123"));
    }

    #[tokio::test]
    async fn test_fetch_listing_page_sends_container_and_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/container/getIndex"))
            .and(query_param("value", "123"))
            .and(query_param("containerid", "107603123"))
            .and(query_param("page", "2"))
            .and(header("mweibo-pwa", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"ok":1,"data":{"cards":[{"card_type":9,"mblog":{"id":"1","text":"a"}}]}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .fetch_listing_page("123", "107603123", 2)
            .await
            .unwrap();
        assert!(page.is_ok());
        assert_eq!(page.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_feed_sends_cookie() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/feed/friends"))
            .and(query_param("max_id", "4890"))
            .and(header("cookie", "SUB=secret"))
            .and(header("mweibo-pwa", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"ok":1,"http_code":200,"data":{"statuses":[],"next_cursor_str":"0"}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let timeline = client_for(&server).fetch_feed("secret", "4890").await.unwrap();
        assert_eq!(timeline.http_code, Some(200));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_user_index("123").await.unwrap_err();
        assert!(matches!(err, HarvestError::Decode { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_server_error_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_listing_page("123", "c", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, HarvestError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(
            HttpWeiboClient::new(&config),
            Err(HarvestError::InvalidUrl(_))
        ));
    }
}
