pub mod recipe_matcher;
pub mod substitutions;

pub use recipe_matcher::{
    current_month, match_recipe, MatchResult, RecipeMatcher, SEASONAL_BONUS_POINTS,
};
pub use substitutions::{Substitution, SubstitutionOption, SubstitutionTable, MAX_SUBSTITUTIONS};
