use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::warn;

use crate::catalog::model::{IngredientCatalog, IngredientId, Recipe, RecipeIngredient};
use crate::matching::substitutions::{Substitution, SubstitutionTable};

/// Flat points added per required ingredient at its seasonal peak.
pub const SEASONAL_BONUS_POINTS: u32 = 5;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchResult {
    pub recipe: Recipe,
    /// 0..=100, from required ingredients only.
    pub match_percentage: u8,
    pub available: Vec<RecipeIngredient>,
    pub missing: Vec<RecipeIngredient>,
    pub optional_missing: Vec<RecipeIngredient>,
    pub can_make: bool,
    pub seasonal_bonus: u32,
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
}

impl MatchResult {
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }
}

pub fn current_month() -> u32 {
    chrono::Local::now().month()
}

fn default_substitutions() -> &'static SubstitutionTable {
    static TABLE: OnceLock<SubstitutionTable> = OnceLock::new();
    TABLE.get_or_init(SubstitutionTable::default)
}

/// Scores `recipe` against `available` using the built-in substitution
/// table and the current month for seasonal bonuses.
pub fn match_recipe(
    recipe: &Recipe,
    available: &HashSet<IngredientId>,
    catalog: &IngredientCatalog,
) -> MatchResult {
    RecipeMatcher::new(catalog).match_recipe(recipe, available)
}

/// Matching configuration bound to one catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RecipeMatcher<'a> {
    catalog: &'a IngredientCatalog,
    substitutions: &'a SubstitutionTable,
    month: u32,
}

impl<'a> RecipeMatcher<'a> {
    pub fn new(catalog: &'a IngredientCatalog) -> Self {
        Self {
            catalog,
            substitutions: default_substitutions(),
            month: current_month(),
        }
    }

    /// Pins the reference month (1..=12) used for peak-season checks.
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = month;
        self
    }

    pub fn with_substitutions(mut self, substitutions: &'a SubstitutionTable) -> Self {
        self.substitutions = substitutions;
        self
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn catalog(&self) -> &'a IngredientCatalog {
        self.catalog
    }

    pub fn match_recipe(&self, recipe: &Recipe, available: &HashSet<IngredientId>) -> MatchResult {
        let mut total_required = 0usize;
        let mut available_required = 0usize;
        let mut seasonal_bonus = 0u32;
        let mut available_list = Vec::new();
        let mut missing = Vec::new();
        let mut optional_missing = Vec::new();

        // Each line is scored on its own, so a repeated id counts once per occurrence.
        for line in &recipe.ingredients {
            let Some(ingredient) = self.catalog.get(&line.ingredient_id) else {
                warn!(
                    recipe = %recipe.id,
                    ingredient = %line.ingredient_id,
                    "ingredient not in catalog, skipped"
                );
                continue;
            };
            let have = available.contains(&line.ingredient_id);

            if line.optional {
                if have {
                    available_list.push(line.clone());
                } else {
                    optional_missing.push(line.clone());
                }
                continue;
            }

            total_required += 1;
            if ingredient.is_peak_season(self.month) {
                seasonal_bonus += SEASONAL_BONUS_POINTS;
            }
            if have {
                available_required += 1;
                available_list.push(line.clone());
            } else {
                missing.push(line.clone());
            }
        }

        let match_percentage = if total_required == 0 {
            100
        } else {
            ((available_required as f64 / total_required as f64) * 100.0).round() as u8
        };

        let substitutions = missing
            .iter()
            .filter_map(|line| {
                self.substitutions.suggest(&line.ingredient_id, self.catalog, |id| {
                    available.contains(id)
                })
            })
            .collect();

        MatchResult {
            recipe: recipe.clone(),
            match_percentage,
            available: available_list,
            missing,
            optional_missing,
            can_make: available_required == total_required,
            seasonal_bonus,
            substitutions,
        }
    }
}
