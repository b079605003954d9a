use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ai: AiConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub api_key: String,
    pub model_name: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                workers: num_cpus::get(),
            },
            ai: AiConfig {
                api_key: String::new(),
                model_name: "gemini-2.0-flash".to_string(),
                endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                timeout_secs: 30,
                max_retries: 3,
                initial_backoff_ms: 5000,
            },
            search: SearchConfig {
                endpoint: "https://html.duckduckgo.com/html/".to_string(),
                timeout_secs: 12,
                // Browser user agent keeps the HTML endpoint from serving a
                // bot challenge page.
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
                max_results: 6,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        // Server configuration
        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.server.port = port.parse()?;
        }
        if let Ok(workers) = env::var("WORKERS") {
            config.server.workers = workers.parse()?;
        }

        // AI configuration
        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            config.ai.api_key = api_key;
        }
        if let Ok(model_name) = env::var("GEMINI_MODEL") {
            config.ai.model_name = model_name;
        }
        if let Ok(endpoint) = env::var("AI_ENDPOINT") {
            config.ai.endpoint = endpoint;
        }
        if let Ok(timeout) = env::var("AI_TIMEOUT_SECS") {
            config.ai.timeout_secs = timeout.parse()?;
        }
        if let Ok(retries) = env::var("AI_MAX_RETRIES") {
            config.ai.max_retries = retries.parse()?;
        }
        if let Ok(backoff) = env::var("AI_INITIAL_BACKOFF_MS") {
            config.ai.initial_backoff_ms = backoff.parse()?;
        }

        // Search configuration
        if let Ok(endpoint) = env::var("SEARCH_ENDPOINT") {
            config.search.endpoint = endpoint;
        }
        if let Ok(timeout) = env::var("SEARCH_TIMEOUT_SECS") {
            config.search.timeout_secs = timeout.parse()?;
        }
        if let Ok(user_agent) = env::var("SEARCH_USER_AGENT") {
            config.search.user_agent = user_agent;
        }
        if let Ok(max_results) = env::var("SEARCH_MAX_RESULTS") {
            config.search.max_results = max_results.parse()?;
        }

        Ok(config)
    }
}
