use thiserror::Error;

/// Which outbound dependency a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Ai,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Search => write!(f, "search"),
            Endpoint::Ai => write!(f, "AI"),
        }
    }
}

/// Failures produced by the research and generation pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("network failure reaching the {endpoint} endpoint: {message}")]
    Network { endpoint: Endpoint, message: String },

    #[error("{endpoint} endpoint returned HTTP {status}")]
    Upstream { endpoint: Endpoint, status: u16 },

    #[error("AI endpoint rate limited (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("AI generation retries exhausted after {attempts} attempts")]
    QuotaExceeded { attempts: usize },

    #[error("AI response is not a valid JSON idea array: {reason}")]
    MalformedOutput { reason: String },

    #[error("no Gemini API key configured")]
    MissingCredential,
}

impl PipelineError {
    pub(crate) fn network(endpoint: Endpoint, err: reqwest::Error) -> Self {
        PipelineError::Network {
            endpoint,
            message: err.to_string(),
        }
    }
}
