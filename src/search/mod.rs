// Unified search engine: one interface, two backends (substring and
// semantic), selected by how the engine is constructed.

pub mod semantic;
pub mod substring;

// Re-exports
pub use semantic::{cosine_similarity, SearchHit, SemanticIndex};
pub use substring::{recommend_dishes, search_dish};

use crate::dataset::{Recipe, RecipeTable};
use crate::embedding::EmbeddingBackend;
use crate::error::{Error, Result};

/// Recipe lookup over a loaded table. The substring and ingredient paths are
/// always available; the semantic path needs an embedding matrix.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    table: RecipeTable,
    semantic: Option<SemanticIndex>,
}

impl SearchEngine {
    pub fn new(table: RecipeTable) -> Self {
        Self {
            table,
            semantic: None,
        }
    }

    /// Attach an embedding matrix for the semantic path. The matrix must
    /// have one row per recipe, in table order.
    pub fn with_semantic(table: RecipeTable, index: SemanticIndex) -> Result<Self> {
        if index.len() != table.len() {
            return Err(Error::Cache(format!(
                "embedding matrix has {} rows but the table has {} recipes",
                index.len(),
                table.len()
            )));
        }
        Ok(Self {
            table,
            semantic: Some(index),
        })
    }

    pub fn table(&self) -> &RecipeTable {
        &self.table
    }

    pub fn search_dish(&self, query: &str) -> Vec<&Recipe> {
        search_dish(query, &self.table)
    }

    pub fn recommend_dishes(&self, ingredients: &[String]) -> Vec<&Recipe> {
        recommend_dishes(ingredients, &self.table)
    }

    pub fn semantic_search(
        &self,
        query: &str,
        backend: &dyn EmbeddingBackend,
        top_k: usize,
    ) -> Result<Vec<SearchHit<'_>>> {
        self.semantic_index()?
            .search(query, backend, &self.table, top_k)
    }

    pub fn best_match(
        &self,
        query: &str,
        backend: &dyn EmbeddingBackend,
        threshold: f32,
    ) -> Result<Option<SearchHit<'_>>> {
        self.semantic_index()?
            .best_match(query, backend, &self.table, threshold)
    }

    fn semantic_index(&self) -> Result<&SemanticIndex> {
        self.semantic
            .as_ref()
            .ok_or_else(|| Error::Config("semantic search index not configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Recipe;
    use crate::embedding::testing::KeywordBackend;

    fn table() -> RecipeTable {
        RecipeTable::from_recipes(vec![
            Recipe {
                name: "ผัดกะเพราไก่".to_string(),
                ingredients: "- ไก่สับ\n- กะเพรา".to_string(),
                method: "ผัด".to_string(),
            },
            Recipe {
                name: "ต้มยำกุ้ง".to_string(),
                ingredients: "- กุ้ง\n- ข่า\n- ตะไคร้".to_string(),
                method: "ต้ม".to_string(),
            },
        ])
    }

    #[test]
    fn test_engine_without_semantic_index() {
        let engine = SearchEngine::new(table());

        assert_eq!(engine.search_dish("ต้มยำ").len(), 1);
        assert_eq!(engine.recommend_dishes(&["กุ้ง".to_string()]).len(), 1);

        let backend = KeywordBackend::new(vec![], vec![1.0, 0.0]);
        assert!(matches!(
            engine.semantic_search("กุ้ง", &backend, 1),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_engine_with_semantic_index() {
        let index = SemanticIndex::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let engine = SearchEngine::with_semantic(table(), index).unwrap();

        let backend = KeywordBackend::new(vec![("กุ้ง", vec![0.0, 1.0])], vec![1.0, 0.0]);
        let hits = engine.semantic_search("กุ้ง", &backend, 1).unwrap();
        assert_eq!(hits[0].recipe.name, "ต้มยำกุ้ง");

        let best = engine.best_match("กุ้ง", &backend, 0.3).unwrap();
        assert!(best.is_some());
    }

    #[test]
    fn test_engine_rejects_length_mismatch() {
        let index = SemanticIndex::new(vec![vec![1.0, 0.0]]);
        assert!(SearchEngine::with_semantic(table(), index).is_err());
    }
}
