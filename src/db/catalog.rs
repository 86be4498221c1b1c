//! Catalog sources
//!
//! The marketplace catalog is owned elsewhere (the admin CMS writes it); this module
//! only fetches read-only snapshots of it for scoring.

use std::path::Path;

use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    models::{Template, TemplateRow},
};

/// Supplies the full template catalog for one scoring call
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every published template, in catalog order
    async fn fetch_catalog(&self) -> AppResult<Vec<Template>>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Reads the catalog from the marketplace `templates` table
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogSource for PostgresCatalog {
    async fn fetch_catalog(&self) -> AppResult<Vec<Template>> {
        let rows: Vec<TemplateRow> = sqlx::query_as(
            "SELECT id, title, category, tags, is_pro, image, builder \
             FROM templates ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Catalog query failed");
            e
        })?;

        tracing::debug!(templates = rows.len(), "Fetched catalog from database");

        Ok(rows.into_iter().map(Template::from).collect())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

/// A fixed catalog snapshot held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    templates: Vec<Template>,
}

impl InMemoryCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Loads a snapshot from a JSON array of templates
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let templates: Vec<Template> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Catalog(format!("Invalid catalog in {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            templates = templates.len(),
            "Loaded catalog snapshot"
        );

        Ok(Self::new(templates))
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_catalog(&self) -> AppResult<Vec<Template>> {
        Ok(self.templates.clone())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
