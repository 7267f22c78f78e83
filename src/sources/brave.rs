//! Brave Search API collector.
//!
//! Each query goes to the news endpoint first. When that yields fewer than
//! [`MIN_NEWS_RESULTS`] article-like hits (or fails outright), the web search
//! endpoint is asked as well and its hits are appended. The call only fails
//! when every endpoint it tried failed.
//!
//! # Response Shapes
//!
//! ```text
//! news: { "results": [ { "title", "url", "description", "age" } ] }
//! web:  { "web": { "results": [ { "title", "url", "description", "age" } ] } }
//! ```

use crate::models::RawResult;
use crate::pipeline::classify::UrlClassifier;
use crate::pipeline::dedupe::dedupe;
use crate::pipeline::normalize::strip_markup;
use crate::sources::{CollectError, Collector, dated_query};
use crate::utils::truncate_for_log;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const NEWS_ENDPOINT: &str = "https://api.search.brave.com/res/v1/news/search";
pub const WEB_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// Below this many usable news hits the web endpoint is consulted too.
pub const MIN_NEWS_RESULTS: usize = 6;
const RESULT_COUNT: &str = "10";

#[derive(Debug, Default, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    results: Vec<BraveHit>,
}

#[derive(Debug, Default, Deserialize)]
struct WebResponse {
    #[serde(default)]
    web: Option<WebResults>,
}

#[derive(Debug, Default, Deserialize)]
struct WebResults {
    #[serde(default)]
    results: Vec<BraveHit>,
}

#[derive(Debug, Default, Deserialize)]
struct BraveHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    age: Option<String>,
}

#[derive(Debug)]
pub struct BraveCollector {
    client: reqwest::Client,
    api_key: String,
    target_date: String,
    classifier: UrlClassifier,
    news_endpoint: String,
    web_endpoint: String,
}

impl BraveCollector {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        target_date: impl Into<String>,
        classifier: UrlClassifier,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            target_date: target_date.into(),
            classifier,
            news_endpoint: NEWS_ENDPOINT.to_string(),
            web_endpoint: WEB_ENDPOINT.to_string(),
        }
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, endpoint: &str, query: &str) -> Result<String, CollectError> {
        let url = Url::parse_with_params(endpoint, &[("q", query), ("count", RESULT_COUNT)])
            .map_err(|e| CollectError::InvalidUrl(format!("{endpoint}: {e}")))?;

        let resp = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CollectError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        debug!(bytes = body.len(), "Fetched Brave response");
        Ok(body)
    }
}

impl Collector for BraveCollector {
    fn mode(&self) -> &'static str {
        "brave"
    }

    #[instrument(level = "info", skip(self), fields(date = %self.target_date))]
    async fn collect(&self, query: &str) -> Result<Vec<RawResult>, CollectError> {
        let q = dated_query(&self.target_date, query);
        let mut items = Vec::new();
        let mut last_error = None;
        let mut answered = false;

        match self.fetch(&self.news_endpoint, &q).await {
            Ok(body) => match parse_news_results(&body, &self.classifier) {
                Ok(mut hits) => {
                    items.append(&mut hits);
                    answered = true;
                }
                Err(e) => {
                    warn!(error = %e, body = %truncate_for_log(&body, 200), "Bad news response");
                    last_error = Some(e);
                }
            },
            Err(e) => {
                warn!(error = %e, "News search failed");
                last_error = Some(e);
            }
        }

        if items.len() < MIN_NEWS_RESULTS {
            debug!(news_hits = items.len(), "Falling back to web search");
            match self.fetch(&self.web_endpoint, &q).await {
                Ok(body) => match parse_web_results(&body, &self.classifier) {
                    Ok(mut hits) => {
                        items.append(&mut hits);
                        answered = true;
                    }
                    Err(e) => {
                        warn!(error = %e, body = %truncate_for_log(&body, 200), "Bad web response");
                        last_error = Some(e);
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Web search failed");
                    last_error = Some(e);
                }
            }
        }

        // an endpoint that answered with zero hits is still a successful query
        if !answered {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        let items = dedupe(items);
        info!(count = items.len(), "Collected Brave results");
        Ok(items)
    }
}

fn parse_news_results(
    body: &str,
    classifier: &UrlClassifier,
) -> Result<Vec<RawResult>, CollectError> {
    let parsed: NewsResponse =
        serde_json::from_str(body).map_err(|e| CollectError::Decode(e.to_string()))?;
    Ok(hits_to_results(parsed.results, classifier))
}

fn parse_web_results(
    body: &str,
    classifier: &UrlClassifier,
) -> Result<Vec<RawResult>, CollectError> {
    let parsed: WebResponse =
        serde_json::from_str(body).map_err(|e| CollectError::Decode(e.to_string()))?;
    let hits = parsed.web.map(|w| w.results).unwrap_or_default();
    Ok(hits_to_results(hits, classifier))
}

fn hits_to_results(hits: Vec<BraveHit>, classifier: &UrlClassifier) -> Vec<RawResult> {
    hits.into_iter()
        .filter_map(|hit| {
            let link = hit.url.trim();
            if !classifier.is_article_url(link) {
                return None;
            }
            let published_hint = hit
                .age
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty());
            Some(RawResult::new(
                strip_markup(&hit.title),
                link,
                strip_markup(&hit.description),
                published_hint,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEWS_BODY: &str = r#"{
        "type": "news",
        "results": [
            {
                "title": "<strong>Fed</strong> holds rates",
                "url": "https://www.reuters.com/markets/us/2024/05/01/fed-holds-rates/",
                "description": "The <em>Federal Reserve</em> held rates steady.",
                "age": "2 hours ago"
            },
            {
                "title": "Markets topic page",
                "url": "https://www.reuters.com/markets/news/",
                "description": "",
                "age": ""
            },
            {
                "title": "No age",
                "url": "https://example.com/business/no-age-story"
            }
        ]
    }"#;

    #[test]
    fn test_parse_news_results_filters_and_cleans() {
        let out = parse_news_results(NEWS_BODY, &UrlClassifier::default()).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Fed holds rates");
        assert_eq!(out[0].snippet, "The Federal Reserve held rates steady.");
        assert_eq!(out[0].source, "reuters.com");
        assert_eq!(out[0].published_hint.as_deref(), Some("2 hours ago"));
        assert_eq!(out[1].published_hint, None);
    }

    #[test]
    fn test_parse_web_results() {
        let body = r#"{"web": {"results": [
            {"title": "Story", "url": "https://apnews.com/article/abc", "description": "d"}
        ]}}"#;
        let out = parse_web_results(body, &UrlClassifier::default()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, "apnews.com");
    }

    #[test]
    fn test_parse_web_results_without_web_section() {
        let out = parse_web_results("{}", &UrlClassifier::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = parse_news_results("<html>", &UrlClassifier::default()).unwrap_err();
        assert!(matches!(err, CollectError::Decode(_)));
    }

    /// Serve `body` as a JSON 200 response to every connection.
    async fn serve_json(body: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let body = body.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });
        format!("http://{addr}")
    }

    fn collector(news_endpoint: String, web_endpoint: String) -> BraveCollector {
        let client = crate::sources::http_client(std::time::Duration::from_secs(2)).unwrap();
        let mut collector =
            BraveCollector::new(client, "key", "2024-05-01", UrlClassifier::default());
        collector.news_endpoint = news_endpoint;
        collector.web_endpoint = web_endpoint;
        collector
    }

    fn news_body(count: usize) -> String {
        let hits: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"title": "Story {i}", "url": "https://site{i}.com/2024/05/01/story-{i}", "description": "d"}}"#
                )
            })
            .collect();
        format!(r#"{{"results": [{}]}}"#, hits.join(","))
    }

    #[tokio::test]
    async fn test_unreachable_endpoints_fail_the_query() {
        let collector = collector(
            "http://127.0.0.1:9/news".to_string(),
            "http://127.0.0.1:9/web".to_string(),
        );
        let result = collector.collect("anything").await;
        assert!(matches!(result, Err(CollectError::Http(_))));
    }

    #[tokio::test]
    async fn test_empty_news_answer_is_not_a_failure() {
        let server = serve_json(r#"{"results": []}"#.to_string()).await;
        let collector = collector(format!("{server}/news"), "http://127.0.0.1:9/web".to_string());
        let items = collector.collect("q").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_web_fallback_used_when_news_fails() {
        let server = serve_json(
            r#"{"web": {"results": [{"title": "Web story", "url": "https://apnews.com/article/abc"}]}}"#
                .to_string(),
        )
        .await;
        let collector = collector("http://127.0.0.1:9/news".to_string(), format!("{server}/web"));
        let items = collector.collect("q").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Web story");
    }

    #[tokio::test]
    async fn test_sparse_news_is_topped_up_from_web() {
        let news = serve_json(news_body(2)).await;
        let web = serve_json(
            r#"{"web": {"results": [{"title": "Web story", "url": "https://apnews.com/article/abc"}]}}"#
                .to_string(),
        )
        .await;
        let collector = collector(format!("{news}/news"), format!("{web}/web"));
        let items = collector.collect("q").await.unwrap();
        let titles: Vec<&str> = items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Story 0", "Story 1", "Web story"]);
    }

    #[tokio::test]
    async fn test_enough_news_skips_web() {
        let news = serve_json(news_body(MIN_NEWS_RESULTS)).await;
        // the web endpoint would add a non-news story if it were asked
        let web = serve_json(
            r#"{"web": {"results": [{"title": "Web story", "url": "https://apnews.com/article/abc"}]}}"#
                .to_string(),
        )
        .await;
        let collector = collector(format!("{news}/news"), format!("{web}/web"));
        let items = collector.collect("q").await.unwrap();
        assert_eq!(items.len(), MIN_NEWS_RESULTS);
        assert!(items.iter().all(|r| r.title != "Web story"));
    }
}
