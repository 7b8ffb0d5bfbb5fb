use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

pub type IngredientId = String;
pub type RecipeId = String;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
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

impl IngredientCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Vegetables => "vegetables",
            IngredientCategory::Fruits => "fruits",
            IngredientCategory::Meat => "meat",
            IngredientCategory::Fish => "fish",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Grains => "grains",
            IngredientCategory::Spices => "spices",
            IngredientCategory::Condiments => "condiments",
            IngredientCategory::Other => "other",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IngredientCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vegetables" | "vegetable" | "legumes" => Ok(IngredientCategory::Vegetables),
            "fruits" | "fruit" => Ok(IngredientCategory::Fruits),
            "meat" | "viandes" => Ok(IngredientCategory::Meat),
            "fish" | "poissons" => Ok(IngredientCategory::Fish),
            "dairy" | "produits_laitiers" => Ok(IngredientCategory::Dairy),
            "grains" | "cereales" => Ok(IngredientCategory::Grains),
            "spices" | "epices" => Ok(IngredientCategory::Spices),
            "condiments" => Ok(IngredientCategory::Condiments),
            "other" | "autres" | "" => Ok(IngredientCategory::Other),
            other => Err(other.to_string()),
        }
    }
}

/// Months (1..=12) an ingredient is sold in, and the subset where it peaks.
/// An empty `months` list means the ingredient is available all year.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Seasonality {
    #[serde(default)]
    pub months: Vec<u32>,
    #[serde(default)]
    pub peak_months: Vec<u32>,
}

impl Seasonality {
    pub fn is_in_season(&self, month: u32) -> bool {
        self.months.is_empty() || self.months.contains(&month) || self.is_peak(month)
    }

    pub fn is_peak(&self, month: u32) -> bool {
        self.peak_months.contains(&month)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub category: IngredientCategory,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<Seasonality>,
    #[serde(default)]
    pub user_created: bool,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Ingredient {
    pub fn new(id: &str, name: &str, category: IngredientCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            subcategory: String::new(),
            seasonality: None,
            user_created: false,
            is_favorite: false,
        }
    }

    pub fn with_seasonality(mut self, months: &[u32], peak_months: &[u32]) -> Self {
        self.seasonality = Some(Seasonality {
            months: months.to_vec(),
            peak_months: peak_months.to_vec(),
        });
        self
    }

    pub fn is_in_season(&self, month: u32) -> bool {
        self.seasonality.as_ref().map_or(true, |s| s.is_in_season(month))
    }

    pub fn is_peak_season(&self, month: u32) -> bool {
        self.seasonality.as_ref().map_or(false, |s| s.is_peak(month))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub ingredient_id: IngredientId,
    pub quantity: f32,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub optional: bool,
}

impl RecipeIngredient {
    pub fn required(ingredient_id: &str, quantity: f32, unit: &str) -> Self {
        Self {
            ingredient_id: ingredient_id.to_string(),
            quantity,
            unit: unit.to_string(),
            optional: false,
        }
    }

    pub fn optional(ingredient_id: &str, quantity: f32, unit: &str) -> Self {
        Self {
            optional: true,
            ..Self::required(ingredient_id, quantity, unit)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    #[serde(alias = "starter")]
    Entree,
    #[serde(alias = "plats", alias = "main")]
    Plat,
    Dessert,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub category: RecipeCategory,
    pub difficulty: Difficulty,
    /// Minutes.
    #[serde(default)]
    pub prep_time: u32,
    /// Minutes.
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub is_favorite: bool,
}

fn default_servings() -> u32 {
    4
}

impl Recipe {
    /// True if any ingredient line, required or optional, uses `ingredient_id`.
    pub fn references(&self, ingredient_id: &str) -> bool {
        self.ingredients.iter().any(|ri| ri.ingredient_id == ingredient_id)
    }
}

/// Lookup view over the ingredient records supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    ingredients: Vec<Ingredient>,
    index: HashMap<IngredientId, usize>,
}

impl IngredientCatalog {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let mut index = HashMap::with_capacity(ingredients.len());
        for (pos, ingredient) in ingredients.iter().enumerate() {
            // first record wins on duplicate ids
            index.entry(ingredient.id.clone()).or_insert(pos);
        }
        Self { ingredients, index }
    }

    pub fn get(&self, id: &str) -> Option<&Ingredient> {
        self.index.get(id).map(|&pos| &self.ingredients[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter()
    }

    pub fn as_slice(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Sets `is_favorite` from the caller's favorites set; every other
    /// ingredient is reset to not-favorite.
    pub fn apply_favorites(&mut self, favorites: &HashSet<IngredientId>) {
        for ingredient in self.ingredients.iter_mut() {
            ingredient.is_favorite = favorites.contains(&ingredient.id);
        }
    }
}

impl From<Vec<Ingredient>> for IngredientCatalog {
    fn from(ingredients: Vec<Ingredient>) -> Self {
        Self::new(ingredients)
    }
}
