use crate::dataset::{Recipe, RecipeTable};
use crate::embedding::EmbeddingBackend;
use crate::error::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// A ranked candidate: recipe reference plus cosine similarity in [-1, 1].
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub index: usize,
    pub score: f32,
    pub recipe: &'a Recipe,
}

/// Cosine similarity, defined as 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Embedding matrix ranked by cosine similarity against a query vector.
/// Row order matches the recipe table the matrix was built from.
#[derive(Debug, Clone)]
pub struct SemanticIndex {
    embeddings: Vec<Vec<f32>>,
}

impl SemanticIndex {
    pub fn new(embeddings: Vec<Vec<f32>>) -> Self {
        Self { embeddings }
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    fn dimension(&self) -> usize {
        self.embeddings.first().map(Vec::len).unwrap_or(0)
    }

    /// Rank every recipe against the query and return the `top_k` best hits
    /// in descending similarity order, ties broken by ascending row index.
    pub fn search<'a>(
        &self,
        query: &str,
        backend: &dyn EmbeddingBackend,
        table: &'a RecipeTable,
        top_k: usize,
    ) -> Result<Vec<SearchHit<'a>>> {
        if query.trim().is_empty() {
            return Err(Error::InvalidQuery(
                "query must not be empty or blank".to_string(),
            ));
        }

        if self.embeddings.len() != table.len() {
            return Err(Error::Cache(format!(
                "embedding matrix has {} rows but the table has {} recipes",
                self.embeddings.len(),
                table.len()
            )));
        }

        let mut query_vectors = backend.embed(&[query.to_string()])?;
        if query_vectors.len() != 1 {
            return Err(Error::Embedding(format!(
                "backend returned {} vectors for one query",
                query_vectors.len()
            )));
        }
        let query_vector = query_vectors.pop().unwrap();

        // Different dimensions mean the model changed between cache build
        // and query time.
        if !self.is_empty() && query_vector.len() != self.dimension() {
            return Err(Error::Embedding(format!(
                "query embedding has dimension {} but the index has dimension {}",
                query_vector.len(),
                self.dimension()
            )));
        }

        let mut hits: Vec<SearchHit<'a>> = self
            .embeddings
            .iter()
            .zip(table.iter())
            .enumerate()
            .map(|(index, (row, recipe))| SearchHit {
                index,
                score: cosine_similarity(&query_vector, row),
                recipe,
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
        hits.truncate(top_k);

        debug!(
            "Semantic search for {:?}: {} hits, best score {:?}",
            query,
            hits.len(),
            hits.first().map(|hit| hit.score)
        );

        Ok(hits)
    }

    /// Acceptance policy: the best hit counts only when its similarity is
    /// strictly greater than `threshold`; otherwise the caller presents a
    /// "no match" response rather than a confidently wrong recipe.
    pub fn best_match<'a>(
        &self,
        query: &str,
        backend: &dyn EmbeddingBackend,
        table: &'a RecipeTable,
        threshold: f32,
    ) -> Result<Option<SearchHit<'a>>> {
        let mut hits = self.search(query, backend, table, 1)?;
        match hits.pop() {
            Some(hit) if hit.score > threshold => Ok(Some(hit)),
            _ => Ok(None),
        }
    }
}
