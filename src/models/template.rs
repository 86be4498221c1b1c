use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

/// Identifier for a catalog template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub i64);

impl Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A WordPress template as published in the marketplace catalog
///
/// Owned by the catalog; the recommendation services only ever read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pro: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<String>,
}

impl Template {
    /// Creates a free template with no display metadata
    pub fn new(id: i64, title: &str, category: &str, tags: &[&str]) -> Self {
        Self {
            id: TemplateId(id),
            title: title.to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_pro: false,
            image: None,
            builder: None,
        }
    }

    /// Marks the template as a pro (paid) template
    pub fn pro(mut self) -> Self {
        self.is_pro = true;
        self
    }

    /// Case-folded category, or `None` when the template carries no category
    pub fn folded_category(&self) -> Option<String> {
        let category = self.category.trim();
        (!category.is_empty()).then(|| category.to_lowercase())
    }

    /// Case-folded, non-empty tags
    pub fn folded_tags(&self) -> impl Iterator<Item = String> + '_ {
        self.tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    /// Distinct case-folded, non-empty tags; tags are a set, so repeats count once
    pub fn folded_tag_set(&self) -> HashSet<String> {
        self.folded_tags().collect()
    }
}

/// A template paired with the score it received for a single scoring call
///
/// Scores only order templates within one call; they are not comparable across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTemplate<'a> {
    pub template: &'a Template,
    pub score: f64,
}

/// Raw row from the `templates` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TemplateRow {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_pro: bool,
    pub image: Option<String>,
    pub builder: Option<String>,
}

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        Template {
            id: TemplateId(row.id),
            title: row.title,
            category: row.category.unwrap_or_default(),
            tags: row.tags.unwrap_or_default(),
            is_pro: row.is_pro,
            image: row.image,
            builder: row.builder,
        }
    }
}

// Treats an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
