use actix_web::{web, HttpResponse, Result};
use tracing::error;
use validator::Validate;

use crate::models::{ErrorResponse, RandomTopicResponse, ResearchResponse, StartResearchRequest};
use crate::AppState;

use super::pipeline_error_response;

pub async fn start_research(
    state: web::Data<AppState>,
    req: web::Json<StartResearchRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    let findings = state.agent.run_research(&req.query).await;
    Ok(HttpResponse::Ok().json(ResearchResponse::findings(findings)))
}

pub async fn random_topic(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.agent.random_topic(&state.config.ai.api_key).await {
        Ok((topic, data)) => Ok(HttpResponse::Ok().json(RandomTopicResponse { topic, data })),
        Err(e) => {
            error!("Random topic error: {:?}", e);
            Ok(pipeline_error_response(&e))
        }
    }
}
