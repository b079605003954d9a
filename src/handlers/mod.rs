pub mod health;
pub mod ideas;
pub mod research;

pub use health::*;
pub use ideas::*;
pub use research::*;

use actix_web::HttpResponse;

use crate::errors::PipelineError;
use crate::models::ErrorResponse;

// Auxiliary AI operations surface their failures: 503 for a missing
// credential, 502 for anything upstream.
pub(crate) fn pipeline_error_response(err: &PipelineError) -> HttpResponse {
    match err {
        PipelineError::MissingCredential => HttpResponse::ServiceUnavailable().json(
            ErrorResponse::with_details("AI credential not configured", err.to_string()),
        ),
        _ => HttpResponse::BadGateway().json(ErrorResponse::with_details(
            "AI request failed",
            err.to_string(),
        )),
    }
}
