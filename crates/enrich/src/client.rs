//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::error::EnrichError;
use crate::gateway::EnrichmentGateway;
use crate::types::{EnrichmentOutcome, GeneratedQa, JudgeReport};

/// Default per-request timeout. Enrichment calls run for seconds, not
/// minutes; anything longer is treated as a failed attempt.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Sampling temperature for analysis and generation.
const ANALYZE_TEMPERATURE: f64 = 0.3;

/// Sampling temperature for judging (stricter).
const JUDGE_TEMPERATURE: f64 = 0.2;

/// How much of the document the judge sees as context.
const SUMMARY_MAX_CHARS: usize = 2_000;

const ANALYZE_SYSTEM_PROMPT: &str = "\
You are a knowledge-base assistant for AI/ML topics. Analyze the submitted \
question/answer pair and output structured JSON with these fields:\n\
1. answer: the original answer polished and completed, in Markdown (LaTeX \
formulas wrapped in $ or $$).\n\
2. answer_brief: a 2-3 sentence summary of the answer.\n\
3. question_en, answer_en, answer_brief_en: English translations when the \
source language is not English, otherwise omit.\n\
4. tags: 2-5 technical-term tags, reusing the provided existing tags where \
they fit.\n\
5. categories: 1-2 broad categories.\n\
6. references: 1-3 related papers (arXiv) or technical blog posts, each \
with kind (\"paper\", \"blog\" or \"other\"), title, and url.\n\
7. images: relevant figures if any, each with url, caption, and source.\n\
Output JSON only, nothing else.";

const GENERATE_SYSTEM_PROMPT: &str = "\
You are a technical educator for AI/ML topics. Read the document and \
extract its core knowledge points as high-quality QA pairs.\n\
Requirements:\n\
1. Each pair has: question, answer (Markdown, LaTeX in $ or $$), tags (2-5 \
technical terms), categories (1-2), confidence (0-1).\n\
2. Questions must read like something a real user would ask, natural and \
situated, not stitched together from headings.\n\
3. Answers must stand alone: complete and accurate without the original \
document.\n\
4. Scale the count to document length (roughly 1-2 pairs per 1000 words).\n\
5. Reuse the provided existing tags where they fit.\n\
Output JSON only: { \"qa_pairs\": [...] }";

const JUDGE_SYSTEM_PROMPT: &str = "\
You are a QA quality reviewer. Score each candidate pair on eight 1-5 \
dimensions.\n\
Question scores: naturalness (reads like a real user), context_relevance \
(meaningful away from the source), knowledge_clarity (clear what knowledge \
is tested), phrasing (appropriate framing).\n\
Answer scores: accuracy, completeness, mastery (reader truly understands \
afterwards), independence (no reliance on the source context).\n\
For each pair: give the scores, the average of the eight dimensions, a \
verdict of \"pass\" when the average is at least 3.5 and \"fail\" \
otherwise, plus question_suggestion and answer_suggestion.\n\
Output JSON only: { \"results\": [...], \"summary\": { \"total\": N, \
\"passed\": N, \"failed\": N } }";

/// Connection settings for the analysis endpoint.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier to request.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl EnrichConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `AI_API_BASE_URL`     | **yes**  | --      |
    /// | `AI_API_KEY`          | **yes**  | --      |
    /// | `AI_MODEL`            | **yes**  | --      |
    /// | `AI_TIMEOUT_SECS`     | no       | `120`   |
    pub fn from_env() -> Result<Self, EnrichError> {
        let base_url = std::env::var("AI_API_BASE_URL")
            .map_err(|_| EnrichError::Config("AI_API_BASE_URL is not set".into()))?;
        let api_key = std::env::var("AI_API_KEY")
            .map_err(|_| EnrichError::Config("AI_API_KEY is not set".into()))?;
        let model = std::env::var("AI_MODEL")
            .map_err(|_| EnrichError::Config("AI_MODEL is not set".into()))?;
        let timeout_secs = std::env::var("AI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        if base_url.trim().is_empty() || api_key.trim().is_empty() || model.trim().is_empty() {
            return Err(EnrichError::Config(
                "AI_API_BASE_URL, AI_API_KEY and AI_MODEL must be non-empty".into(),
            ));
        }

        Ok(Self {
            base_url,
            api_key,
            model,
            timeout_secs,
        })
    }
}

/// [`EnrichmentGateway`] implementation over HTTP.
pub struct HttpEnrichmentClient {
    http: reqwest::Client,
    config: EnrichConfig,
}

impl HttpEnrichmentClient {
    pub fn new(config: EnrichConfig) -> Result<Self, EnrichError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// POST one chat-completion request and parse the JSON content of
    /// the first choice into `T`.
    async fn chat<T: serde::de::DeserializeOwned>(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
    ) -> Result<T, EnrichError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "model": self.config.model,
                "messages": [
                    { "role": "system", "content": system_prompt },
                    { "role": "user", "content": user_prompt },
                ],
                "temperature": temperature,
                "response_format": { "type": "json_object" },
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(EnrichError::EmptyResponse)?;

        serde_json::from_str(&content)
            .map_err(|e| EnrichError::InvalidPayload(format!("unparseable model output: {e}")))
    }
}

#[async_trait]
impl EnrichmentGateway for HttpEnrichmentClient {
    async fn analyze(
        &self,
        question: &str,
        answer_raw: &str,
        existing_tags: &[String],
    ) -> Result<EnrichmentOutcome, EnrichError> {
        let system = format!(
            "{ANALYZE_SYSTEM_PROMPT}\n\nExisting tags: {}",
            existing_tags.join(", ")
        );
        let user = format!("Question: {question}\n\nOriginal answer:\n{answer_raw}");

        let outcome: EnrichmentOutcome = self.chat(&system, &user, ANALYZE_TEMPERATURE).await?;
        outcome.validate()
    }

    async fn generate_qa_pairs(
        &self,
        document_text: &str,
        existing_tags: &[String],
    ) -> Result<Vec<GeneratedQa>, EnrichError> {
        #[derive(Deserialize)]
        struct QaEnvelope {
            #[serde(default)]
            qa_pairs: Vec<GeneratedQa>,
        }

        let system = format!(
            "{GENERATE_SYSTEM_PROMPT}\n\nExisting tags: {}",
            existing_tags.join(", ")
        );
        let user = format!("Document content:\n\n{document_text}");

        let envelope: QaEnvelope = self.chat(&system, &user, ANALYZE_TEMPERATURE).await?;
        Ok(envelope.qa_pairs)
    }

    async fn judge_qa_pairs(
        &self,
        pairs: &[GeneratedQa],
        document_summary: &str,
    ) -> Result<JudgeReport, EnrichError> {
        let summary: String = document_summary.chars().take(SUMMARY_MAX_CHARS).collect();
        let listing = pairs
            .iter()
            .enumerate()
            .map(|(i, qa)| {
                format!(
                    "--- QA {} ---\nQuestion: {}\nAnswer: {}",
                    i + 1,
                    qa.question,
                    qa.answer
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        let user = format!("Document summary:\n{summary}\n\nCandidate QA pairs:\n{listing}");

        let report: JudgeReport = self
            .chat(JUDGE_SYSTEM_PROMPT, &user, JUDGE_TEMPERATURE)
            .await?;

        if report.results.len() != pairs.len() {
            return Err(EnrichError::InvalidPayload(format!(
                "judge returned {} results for {} candidates",
                report.results.len(),
                pairs.len()
            )));
        }
        Ok(report)
    }
}

/// Wire format of the chat-completions response (the parts we read).
#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}
