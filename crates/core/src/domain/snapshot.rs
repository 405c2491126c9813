use crate::domain::article::ScoredArticle;
use crate::domain::quote::Quote;
use crate::domain::sentiment::AggregateSentiment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Recommendation::Buy => "BUY",
            Recommendation::Hold => "HOLD",
            Recommendation::Sell => "SELL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    pub timestamp: DateTime<Utc>,
    pub ticker: String,
    pub keyword: String,
    pub quote: Option<Quote>,
    /// How many articles the feed returned; `articles` holds the scored subset.
    pub article_count: usize,
    pub aggregate: AggregateSentiment,
    /// `None` exactly when the quote is absent.
    pub recommendation: Option<Recommendation>,
    pub articles: Vec<ScoredArticle>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::SentimentLabel;
    use chrono::TimeZone;

    #[test]
    fn snapshot_serializes_with_camel_case_keys() {
        let snapshot = AnalysisSnapshot {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap(),
            ticker: "META".to_string(),
            keyword: "Meta Platforms".to_string(),
            quote: Some(Quote {
                current: 612.5,
                previous_close: 600.0,
                daily_change: 12.5,
                daily_change_pct: 2.08,
                day_high: 615.0,
                day_low: 598.2,
                day_open: 601.1,
            }),
            article_count: 3,
            aggregate: AggregateSentiment {
                label: SentimentLabel::Positive,
                average_score: 0.42,
            },
            recommendation: Some(Recommendation::Buy),
            articles: Vec::new(),
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["articleCount"], 3);
        assert_eq!(value["quote"]["dailyChangePct"], 2.08);
        assert_eq!(value["quote"]["previousClose"], 600.0);
        assert_eq!(value["aggregate"]["averageScore"], 0.42);
        assert_eq!(value["recommendation"], "BUY");
    }

    #[test]
    fn missing_quote_and_recommendation_serialize_as_null() {
        let snapshot = AnalysisSnapshot {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap(),
            ticker: "META".to_string(),
            keyword: "Meta Platforms".to_string(),
            quote: None,
            article_count: 0,
            aggregate: AggregateSentiment::neutral(),
            recommendation: None,
            articles: Vec::new(),
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value["quote"].is_null());
        assert!(value["recommendation"].is_null());
        assert_eq!(value["aggregate"]["label"], "NEUTRAL");
    }
}
