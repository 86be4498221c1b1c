//! Template recommendation service for the WordPress template marketplace.
//!
//! Ranks the catalog against free-text intent ([`services::KeywordMatcher`]) and
//! builds a catalog-driven "recommended for you" list
//! ([`services::SimilarityRecommender`]). Both are pure functions over a catalog
//! snapshot; the HTTP layer in [`routes`] only fetches the snapshot and serializes.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
