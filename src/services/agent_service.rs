//! Orchestrates the research, generation, and evaluation stages.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::errors::PipelineError;
use crate::models::{Finding, GeneratedIdea, PatentDraftRequest};
use crate::services::{
    DuckDuckGoSource, EvaluationService, GenerationService, ResearchService,
};
use crate::utils::{draft_patent_prompt, RANDOM_TOPIC_PROMPT};

#[derive(Clone)]
pub struct AgentService {
    research: ResearchService,
    generation: GenerationService,
    evaluation: EvaluationService,
}

impl AgentService {
    pub fn new(config: &Config) -> Result<Self> {
        let source = Arc::new(DuckDuckGoSource::new(&config.search)?);
        Ok(Self {
            research: ResearchService::new(source, config.search.max_results),
            generation: GenerationService::new(&config.ai)?,
            evaluation: EvaluationService,
        })
    }

    /// Research stage. Always returns findings, fallbacks included.
    pub async fn run_research(&self, query: &str) -> Vec<Finding> {
        info!(query, "starting research");
        self.research.run(query).await
    }

    /// Generation stage. Degrades to placeholders instead of failing.
    pub async fn generate_ideas(
        &self,
        findings: &[Finding],
        context: &str,
        api_key: &str,
    ) -> Vec<GeneratedIdea> {
        info!(selected = findings.len(), "generating ideas from selected findings");
        self.generation.generate_ideas(findings, context, api_key).await
    }

    /// Legacy evaluation pass over a caller-supplied idea list.
    pub fn evaluate_ideas(&self, ideas: Vec<GeneratedIdea>) -> Vec<GeneratedIdea> {
        self.evaluation.evaluate(ideas)
    }

    /// Ask the model for a trending topic, then research it in the same call.
    pub async fn random_topic(&self, api_key: &str) -> Result<(String, Vec<Finding>), PipelineError> {
        let raw = self.generation.complete(api_key, RANDOM_TOPIC_PROMPT).await?;
        let topic = raw.trim().trim_matches('"').to_string();
        info!(%topic, "random topic suggested");

        let findings = self.research.run(&topic).await;
        Ok((topic, findings))
    }

    /// Draft a patent application for an idea.
    pub async fn draft_patent(
        &self,
        request: &PatentDraftRequest,
        api_key: &str,
    ) -> Result<String, PipelineError> {
        let prompt = draft_patent_prompt(
            &request.title,
            &request.subtitle,
            &request.description,
            &request.analysis,
        );
        let draft = self.generation.complete(api_key, &prompt).await?;
        Ok(draft.trim().to_string())
    }
}
