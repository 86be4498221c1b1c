use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{ScoredTemplate, Template},
    routes::AppState,
    services::{self, DEFAULT_MATCH_LIMIT},
};

#[derive(Debug, Deserialize)]
pub struct MatchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
    /// Drops matches scoring below this value; unset keeps every match
    pub min_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub limit: Option<usize>,
}

/// A ranked template as returned to the client
#[derive(Debug, Serialize)]
pub struct TemplateMatch {
    pub template: Template,
    pub score: f64,
}

impl From<ScoredTemplate<'_>> for TemplateMatch {
    fn from(scored: ScoredTemplate<'_>) -> Self {
        Self {
            template: scored.template.clone(),
            score: scored.score,
        }
    }
}

/// Handler for free-text template matching
pub async fn match_templates(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<MatchParams>,
) -> AppResult<Json<Vec<TemplateMatch>>> {
    let limit = state.resolve_limit(params.limit, DEFAULT_MATCH_LIMIT)?;

    if params.q.trim().is_empty() {
        tracing::debug!(request_id = %request_id, "Blank query, nothing to match");
        return Ok(Json(Vec::new()));
    }

    let catalog = state.catalog.fetch_catalog().await?;
    let mut rng = state.rng();

    let matches: Vec<TemplateMatch> = state
        .matcher
        .score_all(&catalog, &params.q, &mut rng)
        .into_iter()
        .take(limit)
        .filter(|scored| params.min_score.map_or(true, |min| scored.score >= min))
        .map(TemplateMatch::from)
        .collect();

    tracing::info!(
        request_id = %request_id,
        source = state.catalog.name(),
        catalog_size = catalog.len(),
        limit,
        returned = matches.len(),
        "Matched templates against query"
    );

    Ok(Json(matches))
}

/// Handler for listing templates in a category (or carrying it as a tag)
pub async fn by_category(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(category): Path<String>,
    Query(params): Query<CategoryParams>,
) -> AppResult<Json<Vec<Template>>> {
    let limit = state.resolve_limit(params.limit, DEFAULT_MATCH_LIMIT)?;
    let catalog = state.catalog.fetch_catalog().await?;

    let templates: Vec<Template> = services::by_category(&catalog, &category, limit)
        .into_iter()
        .cloned()
        .collect();

    tracing::info!(
        request_id = %request_id,
        category = %category,
        returned = templates.len(),
        "Listed templates by category"
    );

    Ok(Json(templates))
}
