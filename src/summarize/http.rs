//! HTTP-backed summarizer for a Gemini-style `generateContent` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SummaryPair, Summarizer, SummarizerError};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Summarizer that calls a generative-model HTTP API.
///
/// Requests are synchronous from the pipeline's point of view: the extract
/// stage awaits the call inline and no other stage runs concurrently.
/// Failures are reported as [`SummarizerError`] and handled by the caller's
/// degraded mode; this type does not retry.
pub struct HttpSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl HttpSummarizer {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds a summarizer from `HIREFLOW_SUMMARIZER_*` environment
    /// variables. A missing API key is reported as
    /// [`SummarizerError::Unavailable`].
    pub fn from_env() -> Result<Self, SummarizerError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("HIREFLOW_SUMMARIZER_API_KEY").map_err(|_| {
            SummarizerError::Unavailable {
                reason: "HIREFLOW_SUMMARIZER_API_KEY is not set".to_string(),
            }
        })?;
        let endpoint = std::env::var("HIREFLOW_SUMMARIZER_URL")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let model = std::env::var("HIREFLOW_SUMMARIZER_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(endpoint, model, api_key))
    }

    async fn generate(&self, prompt: String) -> Result<String, SummarizerError> {
        let url = format!("{}/{}:generateContent", self.endpoint, self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let response: GenerateResponse = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| SummarizerError::Malformed {
                detail: "response carried no candidate text".to_string(),
            })
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<SummaryPair, SummarizerError> {
        let resume_summary = self
            .generate(format!(
                "Summarize this resume into skills, experience and education:\n\n{resume_text}"
            ))
            .await?;
        let jd_summary = self
            .generate(format!(
                "Summarize this job description into required skills, experience and \
                 education:\n\n{jd_text}"
            ))
            .await?;
        Ok(SummaryPair {
            resume_summary,
            jd_summary,
        })
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}
