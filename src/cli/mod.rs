// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "krua")]
#[command(about = "Recipe lookup assistant for a Thai food dataset", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean, normalize and deduplicate a raw recipe dataset
    Preprocess {
        /// Input CSV file path
        #[arg(long, default_value = "thai_food_raw.csv")]
        input: String,

        /// Output CSV file path
        #[arg(long, default_value = "thai_food_processed.csv")]
        output: String,
    },

    /// Find recipes whose name contains the query
    Search {
        /// Dish name, or part of it
        query: String,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recommend dishes that use all of the given ingredients
    Recommend {
        /// Ingredients you have on hand
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask for a dish in free words (semantic search)
    Ask {
        /// What you feel like eating
        query: String,

        /// Number of candidates to rank
        #[arg(long)]
        top_k: Option<usize>,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },
}
