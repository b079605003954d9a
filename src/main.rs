mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use handlers::health::not_found;
use routes::api;
use services::AgentService;

#[derive(Clone)]
pub struct AppState {
    pub agent: AgentService,
    pub config: Config,
    pub start_time: Instant,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.ai.api_key.trim().is_empty() {
        warn!("GEMINI_API_KEY is not set; idea generation will serve placeholder output");
    }

    let agent = match AgentService::new(&config) {
        Ok(agent) => agent,
        Err(e) => {
            error!("Failed to initialize pipeline services: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        agent,
        config: config.clone(),
        start_time: Instant::now(),
    };

    info!(
        "Starting idea pipeline service on {}:{}",
        config.server.host, config.server.port
    );

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .service(api::config())
            .default_service(web::route().to(not_found))
    })
    .bind(format!("{}:{}", config.server.host, config.server.port))?;

    info!(
        "Server started successfully at http://{}:{}",
        config.server.host, config.server.port
    );

    server.workers(config.server.workers).run().await
}
