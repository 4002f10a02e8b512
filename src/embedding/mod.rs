// Embedding backend contract and the on-disk embedding cache

pub mod cache;

#[cfg(feature = "fastembed")]
pub mod model;

use crate::dataset::Recipe;
use crate::error::Result;

pub use cache::EmbeddingCache;

#[cfg(feature = "fastembed")]
pub use model::FastEmbedBackend;

/// Batch text-embedding contract.
///
/// One fixed-length vector per input string, order-preserving, deterministic
/// for a fixed model version. Backend failures abort the calling operation;
/// no retry.
pub trait EmbeddingBackend {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// The text embedded for a recipe: name, ingredients and method concatenated.
pub fn recipe_text(recipe: &Recipe) -> String {
    format!(
        "{}\n{}\n{}",
        recipe.name, recipe.ingredients, recipe.method
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use super::EmbeddingBackend;
    use crate::error::{Error, Result};

    /// Deterministic backend for tests: each input is matched against a list
    /// of (keyword, vector) pairs, first hit wins, unknown text gets the
    /// fallback vector.
    pub(crate) struct KeywordBackend {
        pub rules: Vec<(String, Vec<f32>)>,
        pub fallback: Vec<f32>,
    }

    impl KeywordBackend {
        pub(crate) fn new(rules: Vec<(&str, Vec<f32>)>, fallback: Vec<f32>) -> Self {
            Self {
                rules: rules
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
                fallback,
            }
        }
    }

    impl EmbeddingBackend for KeywordBackend {
        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|text| {
                    self.rules
                        .iter()
                        .find(|(keyword, _)| text.contains(keyword))
                        .map(|(_, vector)| vector.clone())
                        .unwrap_or_else(|| self.fallback.clone())
                })
                .collect())
        }
    }

    /// Backend that always fails, for all-or-nothing cache tests.
    pub(crate) struct FailingBackend;

    impl EmbeddingBackend for FailingBackend {
        fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(Error::Embedding("backend unavailable".to_string()))
        }
    }
}
