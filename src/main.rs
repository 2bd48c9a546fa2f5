mod carousel;
mod chat;
mod config;
mod content;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::chat::completion::{
    CompletionClient, HttpCompletionClient, LlmCompletionClient, UnavailableCompletionClient,
};
use crate::chat::session::{SESSION_SWEEP_INTERVAL, SessionLimits, SessionSweeper};
use crate::chat::{CannedResponses, QueryRouter, SessionStore};
use crate::llm::LlmChat;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    // Initialize LLM client (non-fatal: completion disabled if config missing).
    let (llm, max_tokens): (Option<Arc<dyn LlmChat>>, u32) = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), max_tokens = client.max_tokens(), "LLM client initialized");
            let max_tokens = client.max_tokens();
            let client: Arc<dyn LlmChat> = Arc::new(client);
            (Some(client), max_tokens)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, completion proxy disabled");
            (None, llm::config::DEFAULT_LLM_MAX_TOKENS)
        }
    };

    let canned = match &config.canned_responses_path {
        Some(path) => CannedResponses::from_yaml_file(path).expect("failed to load canned responses"),
        None => CannedResponses::default(),
    };
    if canned.is_empty() {
        tracing::warn!("canned response table is empty, every message goes to the completion service");
    }

    let client: Arc<dyn CompletionClient> = match (&config.completion_url, &llm) {
        (Some(url), _) => {
            let client = HttpCompletionClient::new(url.as_str(), config.completion_timeout)
                .expect("failed to build completion client");
            tracing::info!(url = client.url(), "chat: using remote completion endpoint");
            Arc::new(client)
        }
        (None, Some(llm)) => Arc::new(LlmCompletionClient::new(llm.clone(), max_tokens)),
        (None, None) => {
            tracing::warn!("no completion backend, non-canned messages get the apology reply");
            Arc::new(UnavailableCompletionClient)
        }
    };
    let router = QueryRouter::new(Arc::new(canned), client);
    tracing::info!(canned_triggers = router.canned().len(), "chat router ready");

    let sessions = SessionStore::new(SessionLimits {
        idle_timeout: config.chat_session_idle,
        max_sessions: config.chat_max_sessions,
    });
    let _sweeper = SessionSweeper::spawn(sessions.clone(), SESSION_SWEEP_INTERVAL);

    let carousel = carousel::CarouselState::new(content::PROJECTS.len(), config.carousel_transition)
        .expect("project list is empty");
    let _autoplay = carousel::Autoplay::spawn(carousel.clone(), config.carousel_interval);

    let mailer = services::contact::ContactMailer::from_env();
    if mailer.is_none() {
        tracing::warn!("contact mailer not configured, /api/contact answers 503");
    }

    let proxy = state::CompletionProxy { llm, max_tokens, stub: config.completion_stub };
    let state = state::AppState::new(proxy, router, sessions, carousel, mailer);

    let app = routes::app(state, &config.website_dir);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, website_dir = %config.website_dir.display(), "portfolio-bot listening");
    axum::serve(listener, app).await.expect("server failed");
}
