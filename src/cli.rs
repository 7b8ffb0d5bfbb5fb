use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::catalog::model::{Difficulty, IngredientCategory, RecipeCategory};
use crate::search::{IngredientFilter, SearchFilters};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the recipes JSON file (defaults to PANTRY_RECIPES_PATH)
    #[arg(short, long, global = true)]
    pub recipes: Option<PathBuf>,

    /// Path to the ingredient catalog CSV (defaults to PANTRY_INGREDIENTS_PATH)
    #[arg(short, long, global = true)]
    pub ingredients: Option<PathBuf>,

    /// File listing favorite ingredient ids, one per line
    #[arg(long, global = true)]
    pub favorites: Option<PathBuf>,

    /// Month used for seasonal checks (defaults to the current month)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter and rank recipes against what is available
    Search(SearchArgs),
    /// List recipes that can be made with the available ingredients
    Makeable {
        /// Available ingredient ids, comma separated
        #[arg(short, long, value_delimiter = ',')]
        available: Vec<String>,
    },
    /// Search-bar suggestions for a partial query
    Suggest { query: String },
    /// Build a shopping list for the missing ingredients of some recipes
    ShoppingList {
        /// Recipe ids to shop for
        #[arg(long = "recipe", required = true)]
        recipe_ids: Vec<String>,
        /// Available ingredient ids, comma separated
        #[arg(short, long, value_delimiter = ',')]
        available: Vec<String>,
        /// Scale every recipe to this many servings first
        #[arg(long)]
        servings: Option<u32>,
        /// Also list missing optional ingredients
        #[arg(long)]
        with_optional: bool,
    },
    /// Browse the ingredient catalog
    Ingredients(IngredientArgs),
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Available ingredient ids, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub available: Vec<String>,
    #[arg(long, value_enum)]
    pub difficulty: Option<DifficultyArg>,
    #[arg(long, value_enum)]
    pub category: Option<RecipeCategoryArg>,
    #[arg(long)]
    pub min_prep: Option<u32>,
    #[arg(long)]
    pub max_prep: Option<u32>,
    #[arg(long)]
    pub min_cook: Option<u32>,
    #[arg(long)]
    pub max_cook: Option<u32>,
    #[arg(long)]
    pub favorites_only: bool,
    /// Recipes must use this ingredient (repeatable)
    #[arg(long = "include")]
    pub included: Vec<String>,
    /// Recipes must not use this ingredient (repeatable)
    #[arg(long = "exclude")]
    pub excluded: Vec<String>,
    #[arg(short, long)]
    pub query: Option<String>,
}

impl SearchArgs {
    pub fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            category: self.category.map(Into::into),
            difficulty: self.difficulty.and_then(DifficultyArg::to_difficulty),
            prep_time_min: self.min_prep,
            prep_time_max: self.max_prep,
            cook_time_min: self.min_cook,
            cook_time_max: self.max_cook,
            favorites_only: self.favorites_only,
            included_ingredients: self.included.clone(),
            excluded_ingredients: self.excluded.clone(),
            query: self.query.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct IngredientArgs {
    #[arg(short, long)]
    pub query: Option<String>,
    #[arg(long, value_enum)]
    pub category: Option<IngredientCategoryArg>,
    /// Only ingredients in season for --month (or the current month)
    #[arg(long)]
    pub in_season: bool,
    #[arg(long)]
    pub favorites_only: bool,
    #[arg(long)]
    pub user_created_only: bool,
}

impl IngredientArgs {
    pub fn to_filter(&self, month: u32) -> IngredientFilter {
        IngredientFilter {
            query: self.query.clone(),
            category: self.category.map(Into::into),
            in_season: self.in_season.then_some(month),
            favorites_only: self.favorites_only,
            user_created_only: self.user_created_only,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyArg {
    All,
    Easy,
    Medium,
    Hard,
}

impl DifficultyArg {
    pub fn to_difficulty(self) -> Option<Difficulty> {
        match self {
            DifficultyArg::All => None,
            DifficultyArg::Easy => Some(Difficulty::Easy),
            DifficultyArg::Medium => Some(Difficulty::Medium),
            DifficultyArg::Hard => Some(Difficulty::Hard),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecipeCategoryArg {
    Entree,
    Plat,
    Dessert,
}

impl From<RecipeCategoryArg> for RecipeCategory {
    fn from(arg: RecipeCategoryArg) -> Self {
        match arg {
            RecipeCategoryArg::Entree => RecipeCategory::Entree,
            RecipeCategoryArg::Plat => RecipeCategory::Plat,
            RecipeCategoryArg::Dessert => RecipeCategory::Dessert,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngredientCategoryArg {
    Vegetables,
    Fruits,
    Meat,
    Fish,
    Dairy,
    Grains,
    Spices,
    Condiments,
    Other,
}

impl From<IngredientCategoryArg> for IngredientCategory {
    fn from(arg: IngredientCategoryArg) -> Self {
        match arg {
            IngredientCategoryArg::Vegetables => IngredientCategory::Vegetables,
            IngredientCategoryArg::Fruits => IngredientCategory::Fruits,
            IngredientCategoryArg::Meat => IngredientCategory::Meat,
            IngredientCategoryArg::Fish => IngredientCategory::Fish,
            IngredientCategoryArg::Dairy => IngredientCategory::Dairy,
            IngredientCategoryArg::Grains => IngredientCategory::Grains,
            IngredientCategoryArg::Spices => IngredientCategory::Spices,
            IngredientCategoryArg::Condiments => IngredientCategory::Condiments,
            IngredientCategoryArg::Other => IngredientCategory::Other,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
