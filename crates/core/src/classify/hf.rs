use crate::classify::error::ClassifierDiagnosticsError;
use crate::classify::{ModelLabel, ModelScore, SentimentModel};
use crate::config::Settings;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub struct HfInferenceModel {
    // Built on the first real classification, reused afterwards.
    http: OnceCell<reqwest::Client>,
    base_url: String,
    model: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl HfInferenceModel {
    pub fn from_settings(settings: &Settings) -> Self {
        let base_url = std::env::var("SENTIMENT_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var("SENTIMENT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout_secs = std::env::var("SENTIMENT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            http: OnceCell::new(),
            base_url,
            model,
            api_token: settings.sentiment_api_token.clone(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    async fn client(&self) -> Result<&reqwest::Client> {
        self.http
            .get_or_try_init(|| async {
                tracing::info!(model = %self.model, "initializing sentiment model session");
                reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .context("failed to build classifier http client")
            })
            .await
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.api_token {
            headers.insert(
                "authorization",
                HeaderValue::from_str(&format!("Bearer {token}"))?,
            );
        }
        Ok(headers)
    }

    fn diagnostics(
        &self,
        stage: &'static str,
        detail: String,
        raw_output: Option<String>,
    ) -> ClassifierDiagnosticsError {
        let raw_response_json = raw_output
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok());
        ClassifierDiagnosticsError {
            model: self.model.clone(),
            stage,
            detail,
            raw_output,
            raw_response_json,
        }
    }
}

#[async_trait::async_trait]
impl SentimentModel for HfInferenceModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn classify(&self, text: &str) -> Result<ModelScore> {
        let req = InferenceRequest {
            inputs: text,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let res = self
            .client()
            .await?
            .post(self.url())
            .headers(self.headers()?)
            .json(&req)
            .send()
            .await
            .context("sentiment model request failed")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("failed to read sentiment model response")?;
        if !status.is_success() {
            return Err(self
                .diagnostics("http", format!("status={status}"), Some(body))
                .into());
        }

        parse_candidates(&body)
            .and_then(select_score)
            .map_err(|err| self.diagnostics("decode", format!("{err:#}"), Some(body)).into())
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

// The endpoint answers [[{label, score}, ...]] for a single input; some
// deployments flatten the outer list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

fn parse_candidates(body: &str) -> Result<Vec<LabelScore>> {
    let parsed = serde_json::from_str::<InferenceResponse>(body)
        .context("sentiment response is not a label/score list")?;

    Ok(match parsed {
        InferenceResponse::Nested(mut rows) => {
            if rows.is_empty() {
                Vec::new()
            } else {
                rows.swap_remove(0)
            }
        }
        InferenceResponse::Flat(row) => row,
    })
}

fn select_score(candidates: Vec<LabelScore>) -> Result<ModelScore> {
    let top = candidates
        .into_iter()
        .max_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .context("sentiment response carried no label candidates")?;

    let label = match top.label.to_ascii_uppercase().as_str() {
        "POSITIVE" => ModelLabel::Positive,
        "NEGATIVE" => ModelLabel::Negative,
        other => anyhow::bail!("unexpected label {other:?} from a two-class model"),
    };

    Ok(ModelScore {
        label,
        confidence: top.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_response_shape() {
        let body = r#"[[{"label":"POSITIVE","score":0.9987},{"label":"NEGATIVE","score":0.0013}]]"#;
        let score = parse_candidates(body).and_then(select_score).unwrap();
        assert_eq!(score.label, ModelLabel::Positive);
        assert!((score.confidence - 0.9987).abs() < 1e-12);
    }

    #[test]
    fn parses_flat_response_shape() {
        let body = r#"[{"label":"NEGATIVE","score":0.72},{"label":"POSITIVE","score":0.28}]"#;
        let score = parse_candidates(body).and_then(select_score).unwrap();
        assert_eq!(score.label, ModelLabel::Negative);
        assert!((score.confidence - 0.72).abs() < 1e-12);
    }

    #[test]
    fn takes_the_highest_scoring_candidate() {
        let body = r#"[[{"label":"NEGATIVE","score":0.31},{"label":"POSITIVE","score":0.69}]]"#;
        let score = parse_candidates(body).and_then(select_score).unwrap();
        assert_eq!(score.label, ModelLabel::Positive);
    }

    #[test]
    fn lowercase_labels_are_accepted() {
        let body = r#"[[{"label":"positive","score":0.8}]]"#;
        let score = parse_candidates(body).and_then(select_score).unwrap();
        assert_eq!(score.label, ModelLabel::Positive);
    }

    #[test]
    fn rejects_unknown_labels() {
        let body = r#"[[{"label":"LABEL_2","score":0.8}]]"#;
        let err = parse_candidates(body)
            .and_then(select_score)
            .unwrap_err()
            .to_string();
        assert!(err.contains("LABEL_2"));
    }

    #[test]
    fn rejects_empty_candidate_list() {
        assert!(parse_candidates("[]").and_then(select_score).is_err());
        assert!(parse_candidates("[[]]").and_then(select_score).is_err());
    }

    #[test]
    fn rejects_error_object_body() {
        let body = r#"{"error":"Model is currently loading","estimated_time":20.0}"#;
        assert!(parse_candidates(body).is_err());
    }

    #[test]
    fn request_body_asks_the_endpoint_to_wait_for_the_model() {
        let req = InferenceRequest {
            inputs: "Meta beats earnings",
            options: InferenceOptions {
                wait_for_model: true,
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["inputs"], "Meta beats earnings");
        assert_eq!(json["options"]["wait_for_model"], true);
    }
}
