use serde::{Deserialize, Serialize};

use crate::catalog::model::{Difficulty, IngredientCatalog, IngredientId, Recipe, RecipeCategory};

/// Compound recipe filter. Every set criterion must hold (AND); unset
/// criteria match everything.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct SearchFilters {
    pub category: Option<RecipeCategory>,
    /// `None` means all difficulties.
    pub difficulty: Option<Difficulty>,
    pub prep_time_min: Option<u32>,
    pub prep_time_max: Option<u32>,
    pub cook_time_min: Option<u32>,
    pub cook_time_max: Option<u32>,
    pub favorites_only: bool,
    pub included_ingredients: Vec<IngredientId>,
    pub excluded_ingredients: Vec<IngredientId>,
    /// Case-insensitive text matched against the recipe name and the names
    /// of its ingredients.
    pub query: Option<String>,
}

fn ordered(min: Option<u32>, max: Option<u32>) -> (Option<u32>, Option<u32>) {
    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
        other => other,
    }
}

fn in_range(value: u32, min: Option<u32>, max: Option<u32>) -> bool {
    min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value <= hi)
}

impl SearchFilters {
    /// Swaps inverted time bounds, drops a blank query and trims/dedupes the
    /// ingredient id lists (sorted) so that equivalent filters compare equal.
    pub fn normalized(&self) -> SearchFilters {
        let (prep_time_min, prep_time_max) = ordered(self.prep_time_min, self.prep_time_max);
        let (cook_time_min, cook_time_max) = ordered(self.cook_time_min, self.cook_time_max);

        let clean_ids = |ids: &[IngredientId]| {
            let mut ids: Vec<IngredientId> = ids
                .iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect();
            ids.sort();
            ids.dedup();
            ids
        };

        SearchFilters {
            category: self.category,
            difficulty: self.difficulty,
            prep_time_min,
            prep_time_max,
            cook_time_min,
            cook_time_max,
            favorites_only: self.favorites_only,
            included_ingredients: clean_ids(&self.included_ingredients),
            excluded_ingredients: clean_ids(&self.excluded_ingredients),
            query: self
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_lowercase),
        }
    }

    /// Structural predicates: category, difficulty, time ranges, favorites
    /// and text query. Expects normalized filters.
    pub fn matches_structure(&self, recipe: &Recipe, catalog: &IngredientCatalog) -> bool {
        if self.category.map_or(false, |c| c != recipe.category) {
            return false;
        }
        if self.difficulty.map_or(false, |d| d != recipe.difficulty) {
            return false;
        }
        if !in_range(recipe.prep_time, self.prep_time_min, self.prep_time_max)
            || !in_range(recipe.cook_time, self.cook_time_min, self.cook_time_max)
        {
            return false;
        }
        if self.favorites_only && !recipe.is_favorite {
            return false;
        }
        match &self.query {
            Some(query) => matches_query(recipe, query, catalog),
            None => true,
        }
    }

    /// Recipe references every included id (required or optional).
    pub fn matches_inclusion(&self, recipe: &Recipe) -> bool {
        self.included_ingredients.iter().all(|id| recipe.references(id))
    }

    /// Recipe references none of the excluded ids.
    pub fn matches_exclusion(&self, recipe: &Recipe) -> bool {
        !self.excluded_ingredients.iter().any(|id| recipe.references(id))
    }
}

fn matches_query(recipe: &Recipe, query_lower: &str, catalog: &IngredientCatalog) -> bool {
    recipe.name.to_lowercase().contains(query_lower)
        || recipe.ingredients.iter().any(|line| {
            catalog
                .get(&line.ingredient_id)
                .map_or(false, |i| i.name.to_lowercase().contains(query_lower))
        })
}
