pub mod data_loader;
pub mod model;

pub use data_loader::{
    load_ingredient_catalog, load_recipes, parse_favorites, parse_recipes_json,
    read_ingredient_catalog,
};
pub use model::{
    Difficulty, Ingredient, IngredientCatalog, IngredientCategory, IngredientId, Recipe,
    RecipeCategory, RecipeId, RecipeIngredient, Seasonality,
};
