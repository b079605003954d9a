use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Finding, GeneratedIdea};

/// Body of `POST /api/start`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartResearchRequest {
    #[validate(length(min = 1, max = 500, message = "Query must be between 1 and 500 characters"))]
    pub query: String,
}

/// Research stage reply: findings for the caller to pick from.
#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub stage: String,
    pub message: String,
    pub data: Vec<Finding>,
}

impl ResearchResponse {
    pub fn findings(data: Vec<Finding>) -> Self {
        Self {
            stage: "findings".to_string(),
            message: "Research complete. Please select findings to generate ideas.".to_string(),
            data,
        }
    }
}

/// Body of `POST /api/generate-ideas`. Field names follow the client wire
/// format, hence the camelCase rename.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIdeasRequest {
    #[validate(length(min = 1, message = "Select at least one finding"))]
    pub selected_findings: Vec<Finding>,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct IdeasResponse {
    pub ideas: Vec<GeneratedIdea>,
}

/// Body of `POST /api/evaluate-ideas`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EvaluateIdeasRequest {
    #[validate(length(min = 1, message = "Provide at least one idea"))]
    pub ideas: Vec<GeneratedIdea>,
}

/// Reply to `POST /api/random-topic`: the suggested topic plus the findings
/// already researched for it.
#[derive(Debug, Serialize)]
pub struct RandomTopicResponse {
    pub topic: String,
    pub data: Vec<Finding>,
}

/// Body of `POST /api/draft-patent`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PatentDraftRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be between 1 and 300 characters"))]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,
    #[serde(default)]
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct PatentDraftResponse {
    pub draft: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub ai_configured: bool,
    pub uptime_seconds: u64,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_reads_camel_case_fields() {
        let request: GenerateIdeasRequest = serde_json::from_str(
            r#"{
                "selectedFindings": [
                    {"id": 1, "title": "t", "snippet": "s", "url": "https://a.com", "source": "a.com"}
                ],
                "context": "wearables"
            }"#,
        )
        .unwrap();

        assert_eq!(request.selected_findings.len(), 1);
        assert_eq!(request.context, "wearables");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn generate_request_context_defaults_to_empty() {
        let request: GenerateIdeasRequest =
            serde_json::from_str(r#"{"selectedFindings": []}"#).unwrap();

        assert!(request.context.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn start_request_rejects_empty_and_oversized_queries() {
        let empty = StartResearchRequest {
            query: String::new(),
        };
        assert!(empty.validate().is_err());

        let oversized = StartResearchRequest {
            query: "q".repeat(501),
        };
        assert!(oversized.validate().is_err());

        let ok = StartResearchRequest {
            query: "ai tutoring".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn error_response_omits_absent_details() {
        let json = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
        assert_eq!(json["error"], "nope");
        assert!(json.get("details").is_none());

        let json = serde_json::to_value(ErrorResponse::with_details("nope", "why")).unwrap();
        assert_eq!(json["details"], "why");
    }

    #[test]
    fn research_response_uses_findings_stage() {
        let response = ResearchResponse::findings(Vec::new());
        assert_eq!(response.stage, "findings");
        assert_eq!(
            response.message,
            "Research complete. Please select findings to generate ideas."
        );
    }
}
