use crate::domain::sentiment::{AggregateSentiment, SentimentLabel};
use crate::domain::snapshot::Recommendation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            positive: 0.15,
            negative: -0.15,
        }
    }
}

/// Mean of the signed scores; the label comparisons are inclusive.
pub fn aggregate(scores: &[f64], thresholds: SignalThresholds) -> AggregateSentiment {
    if scores.is_empty() {
        return AggregateSentiment::neutral();
    }

    let average_score = scores.iter().sum::<f64>() / scores.len() as f64;
    let label = if average_score >= thresholds.positive {
        SentimentLabel::Positive
    } else if average_score <= thresholds.negative {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    AggregateSentiment {
        label,
        average_score,
    }
}

/// BUY or SELL only when sentiment and same-day momentum agree. Comparisons
/// are strict, unlike the aggregate label: a mean exactly on a threshold
/// holds, and flat price action never confirms.
pub fn recommend(
    average_score: f64,
    daily_change_pct: f64,
    thresholds: SignalThresholds,
) -> Recommendation {
    if average_score > thresholds.positive && daily_change_pct > 0.0 {
        Recommendation::Buy
    } else if average_score < thresholds.negative && daily_change_pct < 0.0 {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}
