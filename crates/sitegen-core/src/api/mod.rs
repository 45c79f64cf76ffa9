//! HTTP API
//!
//! Builds the axum router for the frontend. Handlers validate the request
//! shape through extractors, call into `commands`, and map errors to status
//! codes via `ApiError`.

pub mod ai;
pub mod deploy;
pub mod error;
pub mod health;
pub mod projects;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::commands::project::ProjectRepository;
use crate::config::{Config, ServerConfig};
use crate::deploy::Deployer;
use crate::error::{Error, Result};
use crate::llm::{GeminiClient, TextGenerator};
use crate::storage::JsonFileProjectRepository;

pub use error::ApiError;

/// Shared state passed to all request handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub projects: Arc<dyn ProjectRepository>,
    pub deployer: Arc<Deployer>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        projects: Arc<dyn ProjectRepository>,
        deployer: Deployer,
    ) -> Self {
        Self {
            generator,
            projects,
            deployer: Arc::new(deployer),
        }
    }

    /// Wire the production collaborators from configuration
    ///
    /// Fails when the API key is not available.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .llm
            .require_api_key()
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        let client = GeminiClient::new(config.llm.clone(), api_key)?;
        let projects = JsonFileProjectRepository::new(&config.storage.projects_file);

        Ok(Self::new(
            Arc::new(client),
            Arc::new(projects),
            Deployer::new(config.deploy.clone()),
        ))
    }
}

/// Build the router with all endpoints
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/api/ai-chat", post(ai::ai_chat))
        .route("/api/enhance-prompt", post(ai::enhance_prompt))
        .route("/api/gen-ai-code", post(ai::generate_code))
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/api/deploy-project", post(deploy::deploy_project))
        .with_state(state)
        .layer(cors_layer(&server.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured frontend origins
///
/// `"*"` allows any origin without credentials; otherwise credentials are allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
