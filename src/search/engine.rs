use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::model::{Ingredient, IngredientCatalog, IngredientId, Recipe};
use crate::matching::{MatchResult, RecipeMatcher, SubstitutionTable};
use crate::search::cache::{NoopSearchCache, SearchCache, SearchKey};
use crate::search::filters::SearchFilters;
use crate::search::suggestions;

/// Filters, scores and orders `recipes` against `available`, without caching.
pub fn search_recipes(
    recipes: &[Recipe],
    available: &HashSet<IngredientId>,
    filters: &SearchFilters,
    catalog: &IngredientCatalog,
) -> Vec<MatchResult> {
    run_search(&RecipeMatcher::new(catalog), recipes, available, &filters.normalized())
}

/// Recipes that can be made entirely from `available_ingredients`, best
/// match first.
pub fn find_makeable_recipes(
    recipes: &[Recipe],
    available_ingredients: &[Ingredient],
    catalog: &IngredientCatalog,
) -> Vec<MatchResult> {
    let available = ids_of(available_ingredients);
    keep_makeable(search_recipes(recipes, &available, &SearchFilters::default(), catalog))
}

fn ids_of(ingredients: &[Ingredient]) -> HashSet<IngredientId> {
    ingredients.iter().map(|i| i.id.clone()).collect()
}

fn keep_makeable(results: Vec<MatchResult>) -> Vec<MatchResult> {
    results.into_iter().filter(|r| r.can_make).collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Percentage descending, then name ascending. Stable.
pub fn sort_results(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.match_percentage
            .cmp(&a.match_percentage)
            .then_with(|| compare_names(&a.recipe.name, &b.recipe.name))
    });
}

fn run_search(
    matcher: &RecipeMatcher<'_>,
    recipes: &[Recipe],
    available: &HashSet<IngredientId>,
    filters: &SearchFilters,
) -> Vec<MatchResult> {
    let catalog = matcher.catalog();
    let mut results: Vec<MatchResult> = recipes
        .iter()
        .filter(|recipe| filters.matches_structure(recipe, catalog))
        .filter(|recipe| filters.matches_inclusion(recipe))
        .filter(|recipe| filters.matches_exclusion(recipe))
        .map(|recipe| matcher.match_recipe(recipe, available))
        .collect();

    sort_results(&mut results);
    debug!(
        recipes = recipes.len(),
        matched = results.len(),
        available = available.len(),
        "recipe search"
    );
    results
}

/// Search entry point holding the ingredient catalog and an optional
/// result cache.
pub struct RecipeSearch {
    catalog: IngredientCatalog,
    substitutions: SubstitutionTable,
    cache: Arc<dyn SearchCache>,
    month: Option<u32>,
}

impl RecipeSearch {
    pub fn new(catalog: IngredientCatalog) -> Self {
        Self {
            catalog,
            substitutions: SubstitutionTable::default(),
            cache: Arc::new(NoopSearchCache),
            month: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn SearchCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_substitutions(mut self, substitutions: SubstitutionTable) -> Self {
        self.substitutions = substitutions;
        self.cache.invalidate();
        self
    }

    /// Pins the month used for seasonal bonuses instead of the clock.
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn catalog(&self) -> &IngredientCatalog {
        &self.catalog
    }

    /// Swaps in a new catalog snapshot and drops every cached result.
    pub fn set_catalog(&mut self, catalog: IngredientCatalog) {
        self.catalog = catalog;
        self.cache.invalidate();
    }

    /// Must be called whenever the recipe collection changes.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    fn matcher(&self) -> RecipeMatcher<'_> {
        let matcher = RecipeMatcher::new(&self.catalog).with_substitutions(&self.substitutions);
        match self.month {
            Some(month) => matcher.with_month(month),
            None => matcher,
        }
    }

    pub fn search_recipes(
        &self,
        recipes: &[Recipe],
        available: &HashSet<IngredientId>,
        filters: &SearchFilters,
    ) -> Vec<MatchResult> {
        let matcher = self.matcher();
        let filters = filters.normalized();

        let mut available_ids: Vec<IngredientId> = available.iter().cloned().collect();
        available_ids.sort();
        let key = SearchKey {
            recipe_ids: recipes.iter().map(|r| r.id.clone()).collect(),
            filters,
            available: available_ids,
            month: matcher.month(),
        };

        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }
        let results = run_search(&matcher, recipes, available, &key.filters);
        self.cache.set(key, results.clone());
        results
    }

    pub fn find_makeable_recipes(
        &self,
        recipes: &[Recipe],
        available_ingredients: &[Ingredient],
    ) -> Vec<MatchResult> {
        let available = ids_of(available_ingredients);
        keep_makeable(self.search_recipes(recipes, &available, &SearchFilters::default()))
    }

    pub fn suggest(&self, query: &str, recipes: &[Recipe]) -> Vec<String> {
        suggestions::suggest(query, recipes, &self.catalog)
    }
}
