use crate::domain::snapshot::AnalysisSnapshot;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub fn default_export_path(snapshot: &AnalysisSnapshot) -> PathBuf {
    PathBuf::from(format!(
        "sentiment_analysis_{}.json",
        snapshot.timestamp.format("%Y%m%d_%H%M%S")
    ))
}

pub fn write_snapshot_json(snapshot: &AnalysisSnapshot, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot to JSON")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::{Article, ScoredArticle};
    use crate::domain::quote::Quote;
    use crate::domain::sentiment::{AggregateSentiment, SentimentLabel, SentimentResult};
    use crate::domain::snapshot::Recommendation;
    use chrono::{TimeZone, Utc};

    fn sample_snapshot() -> AnalysisSnapshot {
        AnalysisSnapshot {
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
            article_count: 2,
            aggregate: AggregateSentiment {
                label: SentimentLabel::Positive,
                average_score: 0.53,
            },
            recommendation: Some(Recommendation::Buy),
            articles: vec![ScoredArticle {
                article: Article {
                    title: "Meta beats earnings".to_string(),
                    link: "https://example.com/a".to_string(),
                    published_at: "Mon, 05 Jan 2026 09:00:00 GMT".to_string(),
                    raw_summary: "<b>Strong</b> quarter".to_string(),
                    clean_summary: "Strong quarter".to_string(),
                },
                sentiment: SentimentResult::positive(0.53),
            }],
        }
    }

    #[test]
    fn default_path_embeds_the_snapshot_timestamp() {
        let path = default_export_path(&sample_snapshot());
        assert_eq!(
            path.to_str().unwrap(),
            "sentiment_analysis_20260105_093000.json"
        );
    }

    #[test]
    fn written_file_round_trips_to_an_equal_snapshot() {
        let snapshot = sample_snapshot();
        let path = std::env::temp_dir().join(format!(
            "marketmood_export_test_{}.json",
            std::process::id()
        ));

        write_snapshot_json(&snapshot, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(contents.contains("\"articleCount\": 2"));
        assert!(contents.contains("\"dailyChangePct\": 2.08"));
        assert!(contents.contains("\"signedScore\": 0.53"));

        let restored: AnalysisSnapshot = serde_json::from_str(&contents).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn write_fails_with_a_path_in_the_message() {
        let snapshot = sample_snapshot();
        let path = Path::new("/nonexistent-dir/snapshot.json");
        let err = write_snapshot_json(&snapshot, path).unwrap_err().to_string();
        assert!(err.contains("/nonexistent-dir/snapshot.json"));
    }
}
