use crate::domain::article::Article;
use crate::text;
use anyhow::{Context, Result};
use rss::Channel;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://news.google.com";
const DEFAULT_LANG: &str = "en-US";
const DEFAULT_COUNTRY: &str = "US";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MISSING_TITLE: &str = "No title";

#[async_trait::async_trait]
pub trait NewsFeed: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch_articles(&self, keyword: &str) -> Result<Vec<Article>>;
}

#[derive(Debug, Clone)]
pub struct GoogleNewsClient {
    http: reqwest::Client,
    base_url: String,
    lang: String,
    country: String,
    max_articles: Option<usize>,
}

impl GoogleNewsClient {
    pub fn new() -> Result<Self> {
        let base_url =
            std::env::var("NEWS_FEED_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let lang = std::env::var("NEWS_FEED_LANG").unwrap_or_else(|_| DEFAULT_LANG.to_string());
        let country =
            std::env::var("NEWS_FEED_COUNTRY").unwrap_or_else(|_| DEFAULT_COUNTRY.to_string());

        let timeout_secs = std::env::var("NEWS_FEED_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let max_articles = std::env::var("NEWS_MAX_ARTICLES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok());

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build news http client")?;

        Ok(Self {
            http,
            base_url,
            lang,
            country,
            max_articles,
        })
    }

    fn url(&self) -> String {
        format!("{}/rss/search", self.base_url.trim_end_matches('/'))
    }

    /// Country plus the bare language code, e.g. `US:en` for `en-US`.
    fn ceid(&self) -> String {
        let lang = self.lang.split('-').next().unwrap_or("en");
        format!("{}:{}", self.country, lang)
    }
}

#[async_trait::async_trait]
impl NewsFeed for GoogleNewsClient {
    fn source_name(&self) -> &'static str {
        "google_news"
    }

    async fn fetch_articles(&self, keyword: &str) -> Result<Vec<Article>> {
        let ceid = self.ceid();
        let res = self
            .http
            .get(self.url())
            .query(&[
                ("q", keyword),
                ("hl", self.lang.as_str()),
                ("gl", self.country.as_str()),
                ("ceid", ceid.as_str()),
            ])
            .send()
            .await
            .context("news feed request failed")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("failed to read news feed response")?;
        if !status.is_success() {
            anyhow::bail!("news feed returned HTTP {status}");
        }

        let mut articles = parse_feed(&body)?;
        if let Some(max) = self.max_articles {
            if articles.len() > max {
                tracing::debug!(
                    total = articles.len(),
                    max,
                    "truncating article batch to the configured cap"
                );
                articles.truncate(max);
            }
        }

        Ok(articles)
    }
}

fn parse_feed(body: &str) -> Result<Vec<Article>> {
    let channel =
        Channel::read_from(body.as_bytes()).context("failed to parse news feed as RSS")?;

    let articles = channel
        .items()
        .iter()
        .map(|item| {
            let raw_summary = item.description().unwrap_or_default().to_string();
            Article {
                title: text::clean(item.title().unwrap_or(MISSING_TITLE)),
                link: item.link().unwrap_or_default().to_string(),
                published_at: item.pub_date().unwrap_or_default().to_string(),
                clean_summary: text::clean(&raw_summary),
                raw_summary,
            }
        })
        .collect();

    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The `"#` inside the font color attribute rules out a single-hash raw
    // string delimiter here.
    const SAMPLE_FEED: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"Meta Platforms" - Google News</title>
    <link>https://news.google.com/search</link>
    <description>Google News</description>
    <item>
      <title>Meta beats earnings &amp; raises guidance</title>
      <link>https://news.google.com/rss/articles/abc123</link>
      <pubDate>Mon, 05 Jan 2026 09:00:00 GMT</pubDate>
      <description>&lt;a href="https://example.com/a"&gt;Meta beats earnings&lt;/a&gt;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Reuters&lt;/font&gt;</description>
    </item>
    <item>
      <title>Regulators open new probe into Meta</title>
      <link>https://news.google.com/rss/articles/def456</link>
      <pubDate>Mon, 05 Jan 2026 08:30:00 GMT</pubDate>
      <description>Antitrust officials said the probe is in an early stage.</description>
    </item>
    <item>
      <link>https://news.google.com/rss/articles/ghi789</link>
    </item>
  </channel>
</rss>"##;

    #[test]
    fn parses_entries_in_feed_order() {
        let articles = parse_feed(SAMPLE_FEED).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "Meta beats earnings & raises guidance");
        assert_eq!(articles[1].title, "Regulators open new probe into Meta");
        assert_eq!(
            articles[0].link,
            "https://news.google.com/rss/articles/abc123"
        );
        assert_eq!(articles[0].published_at, "Mon, 05 Jan 2026 09:00:00 GMT");
    }

    #[test]
    fn summaries_keep_raw_and_cleaned_forms() {
        let articles = parse_feed(SAMPLE_FEED).unwrap();
        assert!(articles[0].raw_summary.contains("<a href"));
        assert!(articles[0].raw_summary.contains("#6f6f6f"));
        assert_eq!(articles[0].clean_summary, "Meta beats earnings Reuters");
        assert_eq!(
            articles[1].clean_summary,
            "Antitrust officials said the probe is in an early stage."
        );
    }

    #[test]
    fn missing_title_gets_the_sentinel() {
        let articles = parse_feed(SAMPLE_FEED).unwrap();
        assert_eq!(articles[2].title, "No title");
        assert_eq!(articles[2].raw_summary, "");
        assert_eq!(articles[2].clean_summary, "");
    }

    #[test]
    fn empty_channel_yields_no_articles() {
        let body = r#"<?xml version="1.0"?><rss version="2.0"><channel><title>t</title><link>l</link><description>d</description></channel></rss>"#;
        let articles = parse_feed(body).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn non_feed_body_is_rejected() {
        let err = parse_feed("<html><body>captcha</body></html>")
            .unwrap_err()
            .to_string();
        assert!(err.contains("RSS"));
    }

    #[test]
    fn ceid_pairs_country_with_bare_language() {
        let client = GoogleNewsClient {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "en-US".to_string(),
            country: "US".to_string(),
            max_articles: None,
        };
        assert_eq!(client.ceid(), "US:en");
    }
}
