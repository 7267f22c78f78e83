//! RSS search-feed collector.
//!
//! Fills the `{query}` placeholder of a feed URL template with the
//! URL-encoded, date-prefixed query and parses the RSS 2.0 response.
//! Aggregator redirect links that carry the publisher URL in a `url=` query
//! parameter (Bing News does this) are unwrapped so the candidate's source
//! is the publisher, not the aggregator.

use crate::models::RawResult;
use crate::pipeline::classify::UrlClassifier;
use crate::pipeline::dedupe::dedupe;
use crate::pipeline::normalize::strip_markup;
use crate::sources::{CollectError, Collector, dated_query};
use quick_xml::de::from_str;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_URL_TEMPLATE: &str = "https://www.bing.com/news/search?q={query}&format=rss";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

#[derive(Debug)]
pub struct RssCollector {
    client: reqwest::Client,
    url_template: String,
    target_date: String,
    classifier: UrlClassifier,
}

impl RssCollector {
    pub fn new(
        client: reqwest::Client,
        url_template: impl Into<String>,
        target_date: impl Into<String>,
        classifier: UrlClassifier,
    ) -> Self {
        Self {
            client,
            url_template: url_template.into(),
            target_date: target_date.into(),
            classifier,
        }
    }

    fn feed_url(&self, query: &str) -> Result<Url, CollectError> {
        let q = dated_query(&self.target_date, query);
        let filled = self
            .url_template
            .replace("{query}", &urlencoding::encode(&q));
        Url::parse(&filled).map_err(|e| CollectError::InvalidUrl(format!("{filled}: {e}")))
    }
}

impl Collector for RssCollector {
    fn mode(&self) -> &'static str {
        "rss"
    }

    #[instrument(level = "info", skip(self), fields(date = %self.target_date))]
    async fn collect(&self, query: &str) -> Result<Vec<RawResult>, CollectError> {
        let url = self.feed_url(query)?;
        debug!(%url, "Fetching RSS feed");

        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CollectError::Status {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        let items = dedupe(parse_feed(&body, &self.classifier)?);
        info!(count = items.len(), "Collected RSS results");
        Ok(items)
    }
}

fn parse_feed(xml: &str, classifier: &UrlClassifier) -> Result<Vec<RawResult>, CollectError> {
    let rss: Rss = from_str(xml).map_err(|e| CollectError::Decode(e.to_string()))?;
    let mut out = Vec::with_capacity(rss.channel.items.len());

    for it in rss.channel.items {
        let Some(link) = it.link.as_deref().map(unwrap_redirect) else {
            continue;
        };
        if !classifier.is_article_url(&link) {
            continue;
        }
        out.push(RawResult::new(
            strip_markup(it.title.as_deref().unwrap_or_default()),
            link,
            strip_markup(it.description.as_deref().unwrap_or_default()),
            it.pub_date
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        ));
    }

    Ok(out)
}

/// Publisher URL hidden in an aggregator redirect, or `link` itself.
pub fn unwrap_redirect(link: &str) -> String {
    let link = link.trim();
    Url::parse(link)
        .ok()
        .and_then(|parsed| {
            parsed
                .query_pairs()
                .find(|(k, v)| k == "url" && v.starts_with("http"))
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or_else(|| link.to_string())
}
