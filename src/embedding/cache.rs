use crate::dataset::RecipeTable;
use crate::embedding::{recipe_text, EmbeddingBackend};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Serialized snapshot of the embedding matrix, keyed by a hash of the
/// normalized dataset so a changed dataset never serves stale vectors.
#[derive(Debug, Serialize, Deserialize)]
struct CacheArtifact {
    dataset_hash: String,
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

/// Long-lived cache object for per-recipe embeddings, persisted as a single
/// binary file. Read-only after creation; rebuilt when the dataset hash
/// changes or on an explicit `refresh`.
#[derive(Debug, Clone)]
pub struct EmbeddingCache {
    path: PathBuf,
}

impl EmbeddingCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached matrix when the artifact matches the current table,
    /// otherwise embed every recipe in one batched call and persist the
    /// result before returning it.
    pub fn get_or_build(
        &self,
        table: &RecipeTable,
        backend: &dyn EmbeddingBackend,
    ) -> Result<Vec<Vec<f32>>> {
        if self.path.exists() {
            match self.load() {
                Ok(artifact) => {
                    if artifact.dataset_hash == table.content_hash()
                        && artifact.vectors.len() == table.len()
                    {
                        debug!(
                            "Embedding cache hit: {} vectors from {:?}",
                            artifact.vectors.len(),
                            self.path
                        );
                        return Ok(artifact.vectors);
                    }
                    warn!("Embedding cache is stale, rebuilding");
                }
                Err(e) => {
                    warn!("Failed to read embedding cache: {e}, rebuilding");
                }
            }
        }

        self.refresh(table, backend)
    }

    /// Force a rebuild, overwriting any existing artifact.
    pub fn refresh(
        &self,
        table: &RecipeTable,
        backend: &dyn EmbeddingBackend,
    ) -> Result<Vec<Vec<f32>>> {
        let texts: Vec<String> = table.iter().map(recipe_text).collect();

        info!("Building embeddings for {} recipes", texts.len());
        let vectors = backend.embed(&texts)?;

        if vectors.len() != table.len() {
            return Err(Error::Embedding(format!(
                "backend returned {} vectors for {} inputs",
                vectors.len(),
                table.len()
            )));
        }

        let dimension = vectors.first().map(Vec::len).unwrap_or(0);
        if vectors.iter().any(|v| v.len() != dimension) {
            return Err(Error::Embedding(
                "backend returned vectors of mismatched dimensionality".to_string(),
            ));
        }

        let artifact = CacheArtifact {
            dataset_hash: table.content_hash(),
            dimension,
            vectors,
        };
        self.persist(&artifact)?;

        Ok(artifact.vectors)
    }

    /// Delete the artifact if present. Returns whether a file was removed.
    pub fn invalidate(&self) -> Result<bool> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            info!("Removed embedding cache at {:?}", self.path);
            return Ok(true);
        }
        Ok(false)
    }

    fn load(&self) -> Result<CacheArtifact> {
        let file = File::open(&self.path)?;
        bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| Error::Cache(format!("failed to read {:?}: {e}", self.path)))
    }

    // Write to a sibling temp file and rename so a failed build never leaves
    // a partial artifact behind.
    fn persist(&self, artifact: &CacheArtifact) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, artifact)
            .map_err(|e| Error::Cache(format!("failed to write {:?}: {e}", tmp_path)))?;
        std::io::Write::flush(&mut writer)?;
        drop(writer);

        std::fs::rename(&tmp_path, &self.path)?;
        debug!(
            "Persisted {} embeddings to {:?}",
            artifact.vectors.len(),
            self.path
        );

        Ok(())
    }
}
