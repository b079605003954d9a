use actix_web::{web, Scope};

use crate::handlers;

pub fn config() -> Scope {
    web::scope("/api")
        .route("/health", web::get().to(handlers::health_check))
        .route("/ready", web::get().to(handlers::ready_check))
        .route("/start", web::post().to(handlers::start_research))
        .route("/random-topic", web::post().to(handlers::random_topic))
        .route("/generate-ideas", web::post().to(handlers::generate_ideas))
        .route("/evaluate-ideas", web::post().to(handlers::evaluate_ideas))
        .route("/draft-patent", web::post().to(handlers::draft_patent))
}
