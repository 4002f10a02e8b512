use crate::dataset::ColumnMapping;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub dataset: DatasetConfig,
    pub cache: CacheConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub columns: ColumnMapping,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub top_k: usize,
    pub similarity_threshold: f32,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let dataset_path = std::env::var("DATASET_PATH")
            .unwrap_or_else(|_| "thai_food_processed.csv".to_string())
            .into();

        let default_columns = ColumnMapping::default();
        let columns = ColumnMapping {
            name: std::env::var("DATASET_NAME_COLUMN").unwrap_or(default_columns.name),
            ingredients: std::env::var("DATASET_INGREDIENTS_COLUMN")
                .unwrap_or(default_columns.ingredients),
            method: std::env::var("DATASET_METHOD_COLUMN").unwrap_or(default_columns.method),
        };

        let cache_path = std::env::var("EMBEDDINGS_CACHE_PATH")
            .unwrap_or_else(|_| "embeddings.bin".to_string())
            .into();

        let top_k = std::env::var("SEARCH_TOP_K")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEARCH_TOP_K value".to_string()))?;

        let similarity_threshold = std::env::var("SIMILARITY_THRESHOLD")
            .unwrap_or_else(|_| "0.3".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SIMILARITY_THRESHOLD value".to_string()))?;

        Ok(Settings {
            dataset: DatasetConfig {
                path: dataset_path,
                columns,
            },
            cache: CacheConfig { path: cache_path },
            search: SearchConfig {
                top_k,
                similarity_threshold,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.search.top_k == 0 {
            return Err(Error::Config("top_k must be non-zero".to_string()));
        }

        if !(-1.0..=1.0).contains(&self.search.similarity_threshold) {
            return Err(Error::Config(
                "similarity threshold must be within [-1, 1]".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings {
            dataset: DatasetConfig {
                path: "/tmp/recipes.csv".into(),
                columns: ColumnMapping::default(),
            },
            cache: CacheConfig {
                path: "/tmp/embeddings.bin".into(),
            },
            search: SearchConfig {
                top_k: 5,
                similarity_threshold: 0.3,
            },
        };

        assert!(settings.validate().is_ok());

        settings.search.top_k = 0;
        assert!(settings.validate().is_err());

        settings.search.top_k = 5;
        settings.search.similarity_threshold = 1.5;
        assert!(settings.validate().is_err());
    }
}
