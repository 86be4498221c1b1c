use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    db::CatalogSource,
    error::{AppError, AppResult},
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{KeywordMatcher, SimilarityRecommender},
};

pub mod recommendations;
pub mod templates;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub matcher: KeywordMatcher,
    pub recommender: SimilarityRecommender,
    pub max_limit: usize,
    pub jitter_seed: Option<u64>,
}

impl AppState {
    /// State with default weights and a random tie-breaker
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            matcher: KeywordMatcher::default(),
            recommender: SimilarityRecommender::default(),
            max_limit: 50,
            jitter_seed: None,
        }
    }

    pub fn from_config(config: &Config, catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            matcher: KeywordMatcher::new(config.match_weights()),
            recommender: SimilarityRecommender::new(config.recommend_weights()),
            max_limit: config.max_limit,
            jitter_seed: config.jitter_seed,
        }
    }

    /// Fixes the tie-breaker seed so responses are reproducible
    pub fn with_jitter_seed(mut self, seed: u64) -> Self {
        self.jitter_seed = Some(seed);
        self
    }

    /// Fresh tie-breaker source for one request
    pub fn rng(&self) -> StdRng {
        match self.jitter_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Applies the default and rejects sizes above `max_limit`
    pub fn resolve_limit(&self, requested: Option<usize>, default: usize) -> AppResult<usize> {
        let limit = requested.unwrap_or(default);
        if limit > self.max_limit {
            return Err(AppError::InvalidInput(format!(
                "limit must be at most {}, got {}",
                self.max_limit, limit
            )));
        }
        Ok(limit)
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(Arc::new(state))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/templates/match", get(templates::match_templates))
        .route("/templates/category/:category", get(templates::by_category))
        .route("/recommendations", get(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
