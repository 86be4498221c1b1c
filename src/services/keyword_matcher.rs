use rand::Rng;

use crate::models::{ScoredTemplate, Template};

use super::scoring::{jitter, MatchWeights};
use super::taxonomy::{keywords_for, Taxonomy, CATEGORY_KEYWORDS};

/// Number of templates returned when the caller gives no limit
pub const DEFAULT_MATCH_LIMIT: usize = 6;

/// Ranks catalog templates against free-text intent
///
/// Each template's score is the sum of independent substring signals found in the
/// case-folded query (title, tags, category, and category synonyms from the
/// taxonomy), plus a bounded random tie-breaker.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    weights: MatchWeights,
    taxonomy: Taxonomy,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(MatchWeights::default())
    }
}

impl KeywordMatcher {
    pub fn new(weights: MatchWeights) -> Self {
        Self {
            weights,
            taxonomy: CATEGORY_KEYWORDS,
        }
    }

    /// Replaces the built-in category keyword table
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Scores every template and returns them best first.
    ///
    /// A blank query or an empty catalog carries no intent and yields nothing.
    pub fn score_all<'a, R: Rng + ?Sized>(
        &self,
        catalog: &'a [Template],
        query: &str,
        rng: &mut R,
    ) -> Vec<ScoredTemplate<'a>> {
        if query.trim().is_empty() || catalog.is_empty() {
            return Vec::new();
        }

        let query = query.to_lowercase();
        let mut scored: Vec<ScoredTemplate<'a>> = catalog
            .iter()
            .map(|template| ScoredTemplate {
                template,
                score: self.base_score(template, &query) + jitter(rng, self.weights.jitter),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            candidates = scored.len(),
            top_score = scored.first().map(|s| s.score),
            "Scored catalog against query"
        );

        scored
    }

    /// Returns the `limit` templates that best match `query`
    pub fn match_templates<'a, R: Rng + ?Sized>(
        &self,
        catalog: &'a [Template],
        query: &str,
        limit: usize,
        rng: &mut R,
    ) -> Vec<&'a Template> {
        self.score_all(catalog, query, rng)
            .into_iter()
            .take(limit)
            .map(|scored| scored.template)
            .collect()
    }

    /// Score without the tie-breaker. `query` must already be case-folded.
    pub fn base_score(&self, template: &Template, query: &str) -> f64 {
        let mut score = 0.0;

        let title = template.title.trim().to_lowercase();
        if !title.is_empty() && query.contains(&title) {
            score += self.weights.title;
        }

        for tag in template.folded_tag_set() {
            if query.contains(&tag) {
                score += self.weights.tag;
            }
        }

        if let Some(category) = template.folded_category() {
            if query.contains(&category) {
                score += self.weights.category;
            }

            for keyword in keywords_for(self.taxonomy, &category) {
                if query.contains(keyword) {
                    score += self.weights.keyword;
                }
            }
        }

        score
    }
}

/// Templates in `category` (by category or by tag), in catalog order.
///
/// Comparison is case-insensitive and exact; no scoring is involved.
pub fn by_category<'a>(catalog: &'a [Template], category: &str, limit: usize) -> Vec<&'a Template> {
    let wanted = category.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|template| {
            template.folded_category().as_deref() == Some(wanted.as_str())
                || template.folded_tags().any(|tag| tag == wanted)
        })
        .take(limit)
        .collect()
}
