use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::Template,
    routes::AppState,
    services::DEFAULT_RECOMMEND_COUNT,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub count: Option<usize>,
}

/// Handler for the "recommended for you" list
///
/// Computed fresh from the current catalog on every call; an empty catalog yields
/// an empty list and the client decides whether to show the section.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<Vec<Template>>> {
    let count = state.resolve_limit(params.count, DEFAULT_RECOMMEND_COUNT)?;
    let catalog = state.catalog.fetch_catalog().await?;
    let mut rng = state.rng();

    let recommendations: Vec<Template> = state
        .recommender
        .recommend(&catalog, count, &mut rng)
        .into_iter()
        .cloned()
        .collect();

    tracing::info!(
        request_id = %request_id,
        catalog_size = catalog.len(),
        count,
        returned = recommendations.len(),
        "Recommendations generated"
    );

    Ok(Json(recommendations))
}
