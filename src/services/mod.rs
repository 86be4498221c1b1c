pub mod keyword_matcher;
pub mod scoring;
pub mod similarity;
pub mod taxonomy;

pub use keyword_matcher::{by_category, KeywordMatcher, DEFAULT_MATCH_LIMIT};
pub use scoring::{MatchWeights, RecommendWeights};
pub use taxonomy::{Taxonomy, CATEGORY_KEYWORDS};
pub use similarity::{SimilarityRecommender, DEFAULT_RECOMMEND_COUNT};
