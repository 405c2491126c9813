use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ClassifierDiagnosticsError {
    pub model: String,
    pub stage: &'static str,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}

impl fmt::Display for ClassifierDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classifier error (model={}, stage={}): {}",
            self.model, self.stage, self.detail
        )
    }
}

impl std::error::Error for ClassifierDiagnosticsError {}
