use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::models::Template;

use super::scoring::{jitter, RecommendWeights};

/// Number of templates returned when the caller gives no count
pub const DEFAULT_RECOMMEND_COUNT: usize = 6;

/// Builds a "recommended for you" list from the catalog alone
///
/// There is no user history, so the signal is the catalog's own shape: templates in
/// popular categories and carrying popular tags rank higher, while the greedy pick
/// spreads results across categories and keeps pro and free templates balanced.
#[derive(Debug, Clone, Default)]
pub struct SimilarityRecommender {
    weights: RecommendWeights,
}

struct Candidate<'a> {
    template: &'a Template,
    category: Option<String>,
    base: f64,
}

impl SimilarityRecommender {
    pub fn new(weights: RecommendWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RecommendWeights {
        &self.weights
    }

    /// Picks up to `count` distinct templates from `catalog`
    pub fn recommend<'a, R: Rng + ?Sized>(
        &self,
        catalog: &'a [Template],
        count: usize,
        rng: &mut R,
    ) -> Vec<&'a Template> {
        let mut candidates = self.candidates(catalog, rng);
        let mut picked: Vec<&'a Template> = Vec::with_capacity(count.min(candidates.len()));
        let mut per_category: HashMap<String, i32> = HashMap::new();
        let (mut pro_picks, mut free_picks) = (0usize, 0usize);

        while picked.len() < count && !candidates.is_empty() {
            let best = candidates
                .iter()
                .enumerate()
                .map(|(idx, candidate)| {
                    let seen = candidate
                        .category
                        .as_ref()
                        .and_then(|c| per_category.get(c))
                        .copied()
                        .unwrap_or(0);
                    let mut score = candidate.base * self.weights.diversity_decay.powi(seen);
                    let behind = if candidate.template.is_pro {
                        pro_picks < free_picks
                    } else {
                        free_picks < pro_picks
                    };
                    if behind {
                        score += self.weights.mix_bonus;
                    }
                    (idx, score)
                })
                // First maximum wins so equal scores keep catalog order
                .fold(None, |best: Option<(usize, f64)>, (idx, score)| match best {
                    Some((_, top)) if top >= score => best,
                    _ => Some((idx, score)),
                });

            let Some((idx, _)) = best else { break };
            let candidate = candidates.remove(idx);

            if let Some(category) = candidate.category {
                *per_category.entry(category).or_insert(0) += 1;
            }
            if candidate.template.is_pro {
                pro_picks += 1;
            } else {
                free_picks += 1;
            }
            picked.push(candidate.template);
        }

        tracing::debug!(
            catalog_size = catalog.len(),
            requested = count,
            returned = picked.len(),
            pro = pro_picks,
            free = free_picks,
            "Built recommendations"
        );

        picked
    }

    /// Deduplicated candidates with their popularity-based base score
    fn candidates<'a, R: Rng + ?Sized>(
        &self,
        catalog: &'a [Template],
        rng: &mut R,
    ) -> Vec<Candidate<'a>> {
        let mut seen_ids = HashSet::new();
        let unique: Vec<&'a Template> = catalog
            .iter()
            .filter(|template| seen_ids.insert(template.id))
            .collect();

        if unique.is_empty() {
            return Vec::new();
        }

        let total = unique.len() as f64;
        let mut category_counts: HashMap<String, usize> = HashMap::new();
        let mut tag_counts: HashMap<String, usize> = HashMap::new();

        for template in &unique {
            if let Some(category) = template.folded_category() {
                *category_counts.entry(category).or_insert(0) += 1;
            }
            for tag in template.folded_tag_set() {
                *tag_counts.entry(tag).or_insert(0) += 1;
            }
        }

        unique
            .into_iter()
            .map(|template| {
                let category = template.folded_category();
                let category_share = category
                    .as_ref()
                    .map(|c| category_counts[c] as f64 / total)
                    .unwrap_or(0.0);

                let tags = template.folded_tag_set();
                let tag_share = if tags.is_empty() {
                    0.0
                } else {
                    tags.iter().map(|t| tag_counts[t] as f64 / total).sum::<f64>()
                        / tags.len() as f64
                };

                let base = self.weights.category * category_share
                    + self.weights.tag * tag_share
                    + jitter(rng, self.weights.jitter);

                Candidate {
                    template,
                    category,
                    base,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn deterministic() -> SimilarityRecommender {
        SimilarityRecommender::new(RecommendWeights::without_jitter())
    }

    fn create_test_catalog() -> Vec<Template> {
        vec![
            Template::new(1, "Bistro", "Restaurant", &["food", "menu"]),
            Template::new(2, "Grill", "Restaurant", &["food"]).pro(),
            Template::new(3, "Bakery", "Restaurant", &["food", "cafe"]),
            Template::new(4, "Shopfront", "eCommerce", &["shop"]).pro(),
            Template::new(5, "Market", "eCommerce", &["shop", "food"]),
            Template::new(6, "Folio", "Portfolio", &[]),
            Template::new(7, "Untitled", "", &[]),
        ]
    }

    fn ids(templates: &[&Template]) -> Vec<i64> {
        templates.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn test_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(SimilarityRecommender::default().recommend(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn test_zero_count() {
        let catalog = create_test_catalog();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(deterministic().recommend(&catalog, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_length_bounded() {
        let catalog = create_test_catalog();
        let recommender = SimilarityRecommender::default();
        let mut rng = StdRng::seed_from_u64(3);
        for count in 0..10 {
            let result = recommender.recommend(&catalog, count, &mut rng);
            assert_eq!(result.len(), count.min(catalog.len()));
        }
    }

    #[test]
    fn test_no_duplicate_ids() {
        let mut catalog = create_test_catalog();
        catalog.push(Template::new(1, "Bistro Copy", "Restaurant", &["food"]));
        catalog.push(Template::new(4, "Shopfront Copy", "eCommerce", &["shop"]));

        let mut rng = StdRng::seed_from_u64(11);
        let result = SimilarityRecommender::default().recommend(&catalog, 20, &mut rng);

        let unique: HashSet<i64> = result.iter().map(|t| t.id.0).collect();
        assert_eq!(unique.len(), result.len());
        assert_eq!(result.len(), 7);
        // First occurrence of a duplicated id is the one kept
        assert!(result.iter().all(|t| t.title != "Bistro Copy"));
    }

    #[test]
    fn test_popular_category_leads() {
        let catalog = create_test_catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let result = deterministic().recommend(&catalog, 1, &mut rng);
        // Largest category plus the most widely shared tag
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_categories_are_spread() {
        let catalog = create_test_catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let result = deterministic().recommend(&catalog, 3, &mut rng);

        let categories: HashSet<&str> = result.iter().map(|t| t.category.as_str()).collect();
        assert!(categories.len() >= 2, "expected mixed categories, got {:?}", ids(&result));
    }

    #[test]
    fn test_pro_free_mix() {
        let catalog = vec![
            Template::new(1, "A", "Blog", &["news"]),
            Template::new(2, "B", "Blog", &["news"]),
            Template::new(3, "C", "Blog", &["news"]),
            Template::new(4, "D", "Blog", &["news"]).pro(),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let result = deterministic().recommend(&catalog, 2, &mut rng);
        assert_eq!(ids(&result), vec![1, 4]);
    }

    #[test]
    fn test_missing_category_and_tags_still_eligible() {
        let catalog = vec![Template::new(9, "Untitled", "", &[])];
        let mut rng = StdRng::seed_from_u64(1);
        let result = deterministic().recommend(&catalog, 3, &mut rng);
        assert_eq!(ids(&result), vec![9]);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let catalog = create_test_catalog();
        let recommender = SimilarityRecommender::default();
        let a = recommender.recommend(&catalog, 4, &mut StdRng::seed_from_u64(5));
        let b = recommender.recommend(&catalog, 4, &mut StdRng::seed_from_u64(5));
        assert_eq!(ids(&a), ids(&b));
    }
}
