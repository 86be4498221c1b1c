pub mod template;

pub use template::{ScoredTemplate, Template, TemplateId, TemplateRow};
