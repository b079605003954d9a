use actix_web::{web, HttpResponse, Result};
use tracing::error;
use validator::Validate;

use crate::models::{
    ErrorResponse, EvaluateIdeasRequest, GenerateIdeasRequest, IdeasResponse, PatentDraftRequest,
    PatentDraftResponse,
};
use crate::AppState;

use super::pipeline_error_response;

pub async fn generate_ideas(
    state: web::Data<AppState>,
    req: web::Json<GenerateIdeasRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    let request = req.into_inner();
    let ideas = state
        .agent
        .generate_ideas(
            &request.selected_findings,
            &request.context,
            &state.config.ai.api_key,
        )
        .await;
    Ok(HttpResponse::Ok().json(IdeasResponse { ideas }))
}

pub async fn evaluate_ideas(
    state: web::Data<AppState>,
    req: web::Json<EvaluateIdeasRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    let ideas = state.agent.evaluate_ideas(req.into_inner().ideas);
    Ok(HttpResponse::Ok().json(IdeasResponse { ideas }))
}

pub async fn draft_patent(
    state: web::Data<AppState>,
    req: web::Json<PatentDraftRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    let request = req.into_inner();
    match state
        .agent
        .draft_patent(&request, &state.config.ai.api_key)
        .await
    {
        Ok(draft) => Ok(HttpResponse::Ok().json(PatentDraftResponse { draft })),
        Err(e) => {
            error!("Patent draft error: {:?}", e);
            Ok(pipeline_error_response(&e))
        }
    }
}
