use crate::dataset::{Recipe, RecipeTable};

/// Case-insensitive substring match of `query` against recipe names, in table
/// order. An empty query matches every row.
pub fn search_dish<'a>(query: &str, table: &'a RecipeTable) -> Vec<&'a Recipe> {
    let query = query.to_lowercase();
    table
        .iter()
        .filter(|recipe| recipe.name.to_lowercase().contains(&query))
        .collect()
}

/// Recipes whose ingredients contain every given substring, case-sensitive,
/// naive containment. An empty ingredient list matches every row.
pub fn recommend_dishes<'a>(ingredients: &[String], table: &'a RecipeTable) -> Vec<&'a Recipe> {
    table
        .iter()
        .filter(|recipe| {
            ingredients
                .iter()
                .all(|ingredient| recipe.ingredients.contains(ingredient.as_str()))
        })
        .collect()
}
