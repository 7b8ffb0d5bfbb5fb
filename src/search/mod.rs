pub mod cache;
pub mod engine;
pub mod filters;
pub mod ingredients;
pub mod suggestions;

pub use cache::{NoopSearchCache, SearchCache, SearchKey, TtlSearchCache, DEFAULT_CACHE_TTL};
pub use engine::{find_makeable_recipes, search_recipes, sort_results, RecipeSearch};
pub use filters::SearchFilters;
pub use ingredients::{filter_ingredients, IngredientFilter};
pub use suggestions::{suggest, MAX_SUGGESTIONS, MIN_QUERY_LEN};
