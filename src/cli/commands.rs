use crate::config::Settings;
use crate::dataset::{Recipe, RecipeTable};
use crate::embedding::{EmbeddingBackend, EmbeddingCache};
use crate::error::Result;
use crate::search::{SearchEngine, SemanticIndex};

/// Clean a raw dataset and write the processed CSV. A changed dataset makes
/// any existing embedding artifact stale, so it is deleted here and
/// regenerated on the next semantic query.
pub fn preprocess(settings: &Settings, input: &str, output: &str) -> Result<()> {
    let table = RecipeTable::load(input, &settings.dataset.columns)?;
    table.write_csv(output, &settings.dataset.columns)?;

    println!("Preprocessing completed. Saved to '{output}'");
    println!("Total recipes: {}", table.len());

    let cache = EmbeddingCache::new(&settings.cache.path);
    if cache.invalidate()? {
        println!("Removed existing embeddings cache. It will be regenerated on the next query.");
    }

    Ok(())
}

/// Substring name lookup.
pub fn search(settings: &Settings, query: &str, json: bool) -> Result<()> {
    let table = RecipeTable::load(&settings.dataset.path, &settings.dataset.columns)?;
    let engine = SearchEngine::new(table);

    let results = engine.search_dish(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No matching recipes found.");
        return Ok(());
    }

    for recipe in results {
        print_recipe(recipe);
    }

    Ok(())
}

/// Ingredient-based filtering.
pub fn recommend(settings: &Settings, ingredients: &[String], json: bool) -> Result<()> {
    let table = RecipeTable::load(&settings.dataset.path, &settings.dataset.columns)?;
    let engine = SearchEngine::new(table);

    let results = engine.recommend_dishes(ingredients);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No recipes can be made from those ingredients.");
        return Ok(());
    }

    for recipe in results {
        print_recipe(recipe);
    }

    Ok(())
}

/// Semantic search over cached embeddings.
pub fn ask(settings: &Settings, query: &str, top_k: Option<usize>, json: bool) -> Result<()> {
    let table = RecipeTable::load(&settings.dataset.path, &settings.dataset.columns)?;

    let backend = build_backend()?;
    let cache = EmbeddingCache::new(&settings.cache.path);
    let matrix = cache.get_or_build(&table, backend.as_ref())?;

    let engine = SearchEngine::with_semantic(table, SemanticIndex::new(matrix))?;

    let top_k = top_k.unwrap_or(settings.search.top_k);
    let threshold = settings.search.similarity_threshold;
    let hits = engine.semantic_search(query, backend.as_ref(), top_k)?;

    let accepted = hits
        .first()
        .is_some_and(|best| best.score > threshold);

    if json {
        let presented = if accepted { hits } else { Vec::new() };
        println!("{}", serde_json::to_string_pretty(&presented)?);
        return Ok(());
    }

    if !accepted {
        println!("Sorry, could not find a matching recipe. Try describing the dish differently.");
        return Ok(());
    }

    let best = &hits[0];
    println!("Best match (score {:.2}):", best.score);
    print_recipe(best.recipe);

    if hits.len() > 1 {
        println!("\nOther candidates:");
        for hit in &hits[1..] {
            println!("  {:.2}  {}", hit.score, hit.recipe.name);
        }
    }

    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    println!("\n{}", recipe.name);
    println!("  Ingredients:");
    for line in recipe.ingredients.lines() {
        println!("    {line}");
    }
    println!("  Method: {}", recipe.method);
}

#[cfg(feature = "fastembed")]
fn build_backend() -> Result<Box<dyn EmbeddingBackend>> {
    Ok(Box::new(crate::embedding::FastEmbedBackend::new()?))
}

#[cfg(not(feature = "fastembed"))]
fn build_backend() -> Result<Box<dyn EmbeddingBackend>> {
    Err(crate::error::Error::Config(
        "semantic search needs an embedding model; rebuild with --features fastembed".to_string(),
    ))
}
