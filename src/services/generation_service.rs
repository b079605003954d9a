//! Idea generation stage: build the prompt, call the Gemini completion
//! endpoint with bounded retries, and recover structured ideas from the
//! reply.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde_json::json;
use tracing::{error, info, warn};

use crate::config::AiConfig;
use crate::errors::{Endpoint, PipelineError};
use crate::models::{Finding, GeneratedIdea};
use crate::utils::{generate_ideas_prompt, parse_json_array};

/// The completion call behind the retry loop.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<String, PipelineError>;
}

/// Backoff waits. The production impl is tokio's sleep; dropping the request
/// future cancels a wait in progress.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Retry knobs for rate-limited completion calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(5000),
        }
    }
}

/// Call the model, retrying only on rate limiting.
///
/// The backoff doubles between attempts and no wait happens after the last
/// one. Any other error class propagates immediately; exhausting the attempts
/// yields [`PipelineError::QuotaExceeded`].
pub async fn generate_content_with_retry(
    model: &dyn TextModel,
    prompt: &str,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<String, PipelineError> {
    let mut delay = policy.initial_backoff;
    for attempt in 1..=policy.max_attempts {
        match model.generate_content(prompt).await {
            Ok(text) => return Ok(text),
            Err(PipelineError::RateLimited { status }) => {
                if attempt == policy.max_attempts {
                    break;
                }
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    status,
                    backoff_ms = delay.as_millis() as u64,
                    "AI endpoint rate limited, backing off"
                );
                sleeper.sleep(delay).await;
                delay *= 2;
            }
            Err(err) => return Err(err),
        }
    }
    Err(PipelineError::QuotaExceeded {
        attempts: policy.max_attempts,
    })
}

/// REST client for Google's generative language API.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, endpoint: &str, model: &str, api_key: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, PipelineError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await
            .map_err(|e| PipelineError::network(Endpoint::Ai, e))?;

        let status = response.status().as_u16();
        if status == 429 {
            return Err(PipelineError::RateLimited { status });
        }
        if !response.status().is_success() {
            return Err(PipelineError::Upstream {
                endpoint: Endpoint::Ai,
                status,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PipelineError::network(Endpoint::Ai, e))?;

        let text = body
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(PipelineError::MalformedOutput {
                reason: "completion response contained no candidate text".to_string(),
            });
        }

        Ok(text)
    }
}

/// Generation pipeline stage.
///
/// `generate_ideas` never fails: unrecoverable trouble degrades to a single
/// explanatory placeholder idea. The auxiliary completions (`complete`)
/// propagate errors for their handlers to map.
#[derive(Clone)]
pub struct GenerationService {
    http: reqwest::Client,
    endpoint: String,
    model_name: String,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl GenerationService {
    pub fn new(config: &AiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model_name: config.model_name.clone(),
            retry: RetryPolicy {
                max_attempts: config.max_retries,
                initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            },
            sleeper: Arc::new(TokioSleeper),
        })
    }

    fn client_for(&self, api_key: &str) -> GeminiClient {
        GeminiClient::new(self.http.clone(), &self.endpoint, &self.model_name, api_key)
    }

    /// Generate idea candidates from the selected findings.
    ///
    /// An empty credential short-circuits to the placeholder without touching
    /// the network.
    pub async fn generate_ideas(
        &self,
        findings: &[Finding],
        context: &str,
        api_key: &str,
    ) -> Vec<GeneratedIdea> {
        if api_key.trim().is_empty() {
            warn!("no AI credential configured, returning placeholder idea");
            return vec![GeneratedIdea::missing_credential()];
        }

        let model = self.client_for(api_key);
        match self.generate_with_model(&model, findings, context).await {
            Ok(ideas) => ideas,
            Err(err) => {
                error!(error = %err, "idea generation failed");
                vec![GeneratedIdea::generation_failed(&err.to_string())]
            }
        }
    }

    /// Fallible core of [`Self::generate_ideas`], driven by any [`TextModel`].
    async fn generate_with_model(
        &self,
        model: &dyn TextModel,
        findings: &[Finding],
        context: &str,
    ) -> Result<Vec<GeneratedIdea>, PipelineError> {
        let prompt = generate_ideas_prompt(findings, context);
        let text =
            generate_content_with_retry(model, &prompt, &self.retry, self.sleeper.as_ref()).await?;

        let mut ideas: Vec<GeneratedIdea> = parse_json_array(&text)?;
        let mut rng = rand::thread_rng();
        for idea in &mut ideas {
            idea.score = rng.gen_range(80..100);
        }

        info!(count = ideas.len(), "ideas generated");
        Ok(ideas)
    }

    /// One-shot completion for the auxiliary prompts (random topic, patent
    /// drafting). Unlike idea generation this propagates failures, including
    /// a missing credential.
    pub(crate) async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, PipelineError> {
        if api_key.trim().is_empty() {
            return Err(PipelineError::MissingCredential);
        }
        let model = self.client_for(api_key);
        generate_content_with_retry(&model, prompt, &self.retry, self.sleeper.as_ref()).await
    }
}
