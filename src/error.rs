use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Embedding backend error: {0}")]
    Embedding(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// User-facing message for the interactive boundary.
    /// Dataset-shape errors keep their detail; embedding and cache failures
    /// degrade to an apologetic response instead of surfacing internals.
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingFile(path) => {
                format!("Error: Input file '{}' not found.", path.display())
            }
            Error::Schema { missing } => {
                format!("Error: Missing required columns: {}", missing.join(", "))
            }
            Error::InvalidQuery(_) => "Please enter a dish name or a question.".to_string(),
            Error::Embedding(_) | Error::Cache(_) => {
                "Sorry, could not find a recipe right now. Please try again.".to_string()
            }
            Error::Csv(e) => format!("Error reading dataset: {e}"),
            Error::Io(e) => format!("File error: {e}"),
            Error::Json(e) => format!("Output error: {e}"),
            Error::Config(msg) => format!("Configuration error: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_names_all_missing_columns() {
        let err = Error::Schema {
            missing: vec!["name".to_string(), "food_method".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("food_method"));
    }

    #[test]
    fn test_embedding_error_degrades_to_apology() {
        let err = Error::Embedding("model exploded".to_string());
        assert!(!err.user_message().contains("exploded"));
    }
}
