use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        };
        f.write_str(s)
    }
}

/// `signed_score` is `raw_score` signed by the label; NEUTRAL carries zeros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub raw_score: f64,
    pub signed_score: f64,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            raw_score: 0.0,
            signed_score: 0.0,
        }
    }

    pub fn positive(raw_score: f64) -> Self {
        Self {
            label: SentimentLabel::Positive,
            raw_score,
            signed_score: raw_score,
        }
    }

    pub fn negative(raw_score: f64) -> Self {
        Self {
            label: SentimentLabel::Negative,
            raw_score,
            signed_score: -raw_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSentiment {
    pub label: SentimentLabel,
    pub average_score: f64,
}

impl AggregateSentiment {
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            average_score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_score_follows_label() {
        let pos = SentimentResult::positive(0.97);
        assert_eq!(pos.signed_score, 0.97);

        let neg = SentimentResult::negative(0.97);
        assert_eq!(neg.raw_score, 0.97);
        assert_eq!(neg.signed_score, -0.97);

        let neutral = SentimentResult::neutral();
        assert_eq!(neutral.raw_score, 0.0);
        assert_eq!(neutral.signed_score, 0.0);
    }

    #[test]
    fn labels_serialize_uppercase() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");

        let parsed: SentimentLabel = serde_json::from_str("\"NEGATIVE\"").unwrap();
        assert_eq!(parsed, SentimentLabel::Negative);
    }
}
