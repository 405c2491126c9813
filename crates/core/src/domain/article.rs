use crate::domain::sentiment::SentimentResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub link: String,
    /// The source's own date string, kept verbatim.
    pub published_at: String,
    pub raw_summary: String,
    /// `raw_summary` with markup stripped and entities decoded.
    pub clean_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredArticle {
    pub article: Article,
    pub sentiment: SentimentResult,
}
