use std::collections::HashSet;

use crate::catalog::model::{IngredientCatalog, Recipe};

pub const MIN_QUERY_LEN: usize = 2;
pub const MAX_SUGGESTIONS: usize = 8;

const QUALIFIERS: &[&str] = &["easy", "quick", "vegetarian", "seasonal"];

/// Search-bar suggestions for `query`: recipe names containing it, then
/// ingredient names containing it, then `"<query> <qualifier>"` expansions.
/// Matching is case-insensitive; duplicates are dropped case-insensitively.
pub fn suggest(query: &str, recipes: &[Recipe], catalog: &IngredientCatalog) -> Vec<String> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let recipe_names = recipes.iter().map(|r| r.name.as_str());
    let ingredient_names = catalog.iter().map(|i| i.name.as_str());
    let candidates = recipe_names
        .chain(ingredient_names)
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(str::to_string)
        .chain(QUALIFIERS.iter().map(|q| format!("{} {}", query, q)));

    let mut seen = HashSet::new();
    candidates
        .filter(|s| seen.insert(s.to_lowercase()))
        .take(MAX_SUGGESTIONS)
        .collect()
}
