pub mod signal;

use crate::classify::Classifier;
use crate::config::RunInputs;
use crate::domain::article::{Article, ScoredArticle};
use crate::domain::quote::Quote;
use crate::domain::snapshot::AnalysisSnapshot;
use crate::ingest::news::NewsFeed;
use crate::ingest::quote::QuoteProvider;
use chrono::Utc;
use signal::SignalThresholds;
use std::sync::Arc;

pub struct Analyzer {
    quotes: Arc<dyn QuoteProvider>,
    news: Arc<dyn NewsFeed>,
    classifier: Classifier,
    thresholds: SignalThresholds,
    ticker: String,
    keyword: String,
}

impl Analyzer {
    pub fn new(
        inputs: RunInputs,
        quotes: Arc<dyn QuoteProvider>,
        news: Arc<dyn NewsFeed>,
        classifier: Classifier,
        thresholds: SignalThresholds,
    ) -> Self {
        Self {
            quotes,
            news,
            classifier,
            thresholds,
            ticker: inputs.ticker,
            keyword: inputs.keyword,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub async fn run(&self) -> AnalysisSnapshot {
        let quote = self.fetch_quote_stage().await;
        let articles = self.fetch_articles_stage().await;
        let article_count = articles.len();

        let scored = if articles.is_empty() {
            tracing::info!(keyword = %self.keyword, "no articles to score; finishing the run early");
            Vec::new()
        } else {
            self.score_articles_stage(articles).await
        };

        let scores: Vec<f64> = scored.iter().map(|s| s.sentiment.signed_score).collect();
        let aggregate = signal::aggregate(&scores, self.thresholds);
        let recommendation = quote.as_ref().map(|q| {
            signal::recommend(aggregate.average_score, q.daily_change_pct, self.thresholds)
        });

        tracing::info!(
            ticker = %self.ticker,
            article_count,
            scored = scored.len(),
            label = %aggregate.label,
            "analysis run complete"
        );

        AnalysisSnapshot {
            timestamp: Utc::now(),
            ticker: self.ticker.clone(),
            keyword: self.keyword.clone(),
            quote,
            article_count,
            aggregate,
            recommendation,
            articles: scored,
        }
    }

    async fn fetch_quote_stage(&self) -> Option<Quote> {
        match self.quotes.fetch_quote(&self.ticker).await {
            Ok(quote) => Some(quote),
            Err(err) => {
                tracing::warn!(
                    ticker = %self.ticker,
                    provider = self.quotes.provider_name(),
                    error = %err,
                    "quote unavailable; continuing without stock data"
                );
                None
            }
        }
    }

    async fn fetch_articles_stage(&self) -> Vec<Article> {
        match self.news.fetch_articles(&self.keyword).await {
            Ok(articles) => {
                tracing::info!(keyword = %self.keyword, count = articles.len(), "fetched articles");
                articles
            }
            Err(err) => {
                tracing::warn!(
                    keyword = %self.keyword,
                    source = self.news.source_name(),
                    error = %err,
                    "article fetch failed; treating as an empty batch"
                );
                Vec::new()
            }
        }
    }

    async fn score_articles_stage(&self, articles: Vec<Article>) -> Vec<ScoredArticle> {
        let total = articles.len();
        let mut scored = Vec::with_capacity(total);

        for (idx, article) in articles.into_iter().enumerate() {
            match self.classifier.classify(&article.clean_summary).await {
                Ok(sentiment) => {
                    tracing::debug!(
                        item = idx + 1,
                        total,
                        score = sentiment.signed_score,
                        "scored article"
                    );
                    scored.push(ScoredArticle { article, sentiment });
                }
                Err(err) => {
                    tracing::warn!(
                        item = idx + 1,
                        total,
                        title = %article.title,
                        error = %err,
                        "classification failed; excluding the article from the aggregate"
                    );
                }
            }
        }

        scored
    }
}

/// Admits one run at a time; `try_acquire` refuses instead of queueing.
#[derive(Debug, Default)]
pub struct RunGate {
    inner: tokio::sync::Mutex<()>,
}

impl RunGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<RunPermit<'_>> {
        self.inner
            .try_lock()
            .ok()
            .map(|guard| RunPermit { _guard: guard })
    }
}

pub struct RunPermit<'a> {
    _guard: tokio::sync::MutexGuard<'a, ()>,
}
