use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::catalog::model::{
    IngredientCatalog, IngredientCategory, IngredientId, Recipe, RecipeIngredient,
};
use crate::matching::MatchResult;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShoppingListItem {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub category: IngredientCategory,
    pub quantity: f32,
    pub unit: String,
    /// Names of the recipes that need this item, in the order first seen.
    pub recipes: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Items grouped by aisle category, categories in enum order.
    pub fn by_category(&self) -> BTreeMap<IngredientCategory, Vec<&ShoppingListItem>> {
        let mut groups: BTreeMap<IngredientCategory, Vec<&ShoppingListItem>> = BTreeMap::new();
        for item in &self.items {
            groups.entry(item.category).or_default().push(item);
        }
        groups
    }
}

/// Returns `recipe` with quantities rescaled to `servings`. Recipes with no
/// servings, or a zero target, come back unchanged.
pub fn scale_recipe(recipe: &Recipe, servings: u32) -> Recipe {
    if recipe.servings == 0 || servings == 0 || servings == recipe.servings {
        return recipe.clone();
    }
    let factor = servings as f32 / recipe.servings as f32;
    let mut scaled = recipe.clone();
    scaled.servings = servings;
    for line in scaled.ingredients.iter_mut() {
        line.quantity *= factor;
    }
    scaled
}

/// Aggregates what is still missing across `results` into one list.
/// Lines sharing ingredient and unit are summed; ingredients unknown to the
/// catalog are left out.
pub fn build_shopping_list(
    results: &[MatchResult],
    catalog: &IngredientCatalog,
    include_optional: bool,
) -> ShoppingList {
    let mut positions: HashMap<(IngredientId, String), usize> = HashMap::new();
    let mut items: Vec<ShoppingListItem> = Vec::new();

    for result in results {
        let optional: &[RecipeIngredient] = if include_optional {
            &result.optional_missing
        } else {
            &[]
        };
        for line in result.missing.iter().chain(optional) {
            let Some(ingredient) = catalog.get(&line.ingredient_id) else {
                continue;
            };
            let unit = line.unit.trim().to_lowercase();
            let key = (line.ingredient_id.clone(), unit.clone());

            match positions.get(&key) {
                Some(&pos) => {
                    let item = &mut items[pos];
                    item.quantity += line.quantity;
                    if !item.recipes.contains(&result.recipe.name) {
                        item.recipes.push(result.recipe.name.clone());
                    }
                }
                None => {
                    positions.insert(key, items.len());
                    items.push(ShoppingListItem {
                        ingredient_id: ingredient.id.clone(),
                        name: ingredient.name.clone(),
                        category: ingredient.category,
                        quantity: line.quantity,
                        unit,
                        recipes: vec![result.recipe.name.clone()],
                    });
                }
            }
        }
    }

    items.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.unit.cmp(&b.unit))
    });
    ShoppingList { items }
}
