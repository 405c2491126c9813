pub mod classify;
pub mod domain;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod text;

pub mod config {
    use anyhow::Context;

    // Template values left over from .env.example, not credentials.
    const PLACEHOLDER_MARKERS: [&str; 7] = [
        "your_",
        "your ",
        "replace",
        "example",
        "placeholder",
        "xxx",
        "test_",
    ];

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub finnhub_api_key: Option<String>,
        pub ticker: Option<String>,
        pub keyword: Option<String>,
        pub sentiment_api_token: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                finnhub_api_key: read_trimmed("FINNHUB_API_KEY"),
                ticker: read_trimmed("TICKER"),
                keyword: read_trimmed("KEYWORD"),
                sentiment_api_token: read_trimmed("SENTIMENT_API_TOKEN"),
                sentry_dsn: read_trimmed("SENTRY_DSN"),
            })
        }

        pub fn require_finnhub_api_key(&self) -> anyhow::Result<&str> {
            self.finnhub_api_key
                .as_deref()
                .context("FINNHUB_API_KEY is required")
        }
    }

    fn read_trimmed(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    #[derive(Debug, Clone)]
    pub struct RunInputs {
        pub ticker: String,
        pub keyword: String,
    }

    impl RunInputs {
        pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
            let mut invalid = Vec::new();

            let api_key = settings.finnhub_api_key.as_deref().unwrap_or("");
            if api_key.is_empty() || looks_like_placeholder(api_key) {
                invalid.push("FINNHUB_API_KEY");
            }

            let ticker = settings.ticker.as_deref().unwrap_or("");
            if ticker.is_empty() || ticker.starts_with('#') {
                invalid.push("TICKER");
            }

            let keyword = settings.keyword.as_deref().unwrap_or("");
            if keyword.is_empty() || keyword.starts_with('#') {
                invalid.push("KEYWORD");
            }

            anyhow::ensure!(
                invalid.is_empty(),
                "missing or invalid environment variables: {}\n\
                 Set real values in the environment or a .env file:\n\
                 \x20 FINNHUB_API_KEY=<your Finnhub API key>\n\
                 \x20 TICKER=META\n\
                 \x20 KEYWORD=Meta Platforms",
                invalid.join(", ")
            );

            Ok(Self {
                ticker: ticker.to_string(),
                keyword: keyword.to_string(),
            })
        }
    }

    fn looks_like_placeholder(value: &str) -> bool {
        let lowered = value.to_lowercase();
        PLACEHOLDER_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    }

}
