use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::model::{IngredientCatalog, IngredientId};

/// Upper bound on alternatives suggested for a single missing ingredient.
pub const MAX_SUBSTITUTIONS: usize = 3;

const DEFAULT_SUBSTITUTIONS: &[(&str, &[&str])] = &[
    ("butter", &["margarine", "coconut-oil", "olive-oil"]),
    ("milk", &["oat-milk", "soy-milk", "almond-milk", "cream"]),
    ("cream", &["creme-fraiche", "greek-yogurt", "milk"]),
    ("creme-fraiche", &["cream", "greek-yogurt", "sour-cream"]),
    ("yogurt", &["greek-yogurt", "creme-fraiche", "sour-cream"]),
    ("egg", &["flax-seed", "banana", "applesauce"]),
    ("sugar", &["brown-sugar", "honey", "maple-syrup"]),
    ("honey", &["maple-syrup", "sugar"]),
    ("flour", &["buckwheat-flour", "almond-flour", "cornstarch"]),
    ("lemon", &["lime", "white-vinegar"]),
    ("onion", &["shallot", "leek", "spring-onion"]),
    ("shallot", &["onion", "spring-onion"]),
    ("garlic", &["shallot", "garlic-powder"]),
    ("rice", &["quinoa", "bulgur", "couscous"]),
    ("pasta", &["rice", "noodles"]),
    ("parmesan", &["pecorino", "gruyere", "comte"]),
    ("basil", &["parsley", "oregano"]),
    ("parsley", &["coriander", "chives"]),
    ("beef-stock", &["chicken-stock", "vegetable-stock"]),
    ("chicken-stock", &["vegetable-stock", "beef-stock"]),
    ("white-wine", &["white-vinegar", "chicken-stock"]),
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubstitutionOption {
    pub ingredient_id: IngredientId,
    pub name: String,
    /// Already in the availability set used for the match.
    pub available: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Substitution {
    pub missing_ingredient_id: IngredientId,
    pub alternatives: Vec<SubstitutionOption>,
}

/// Static ingredient id → ordered alternatives mapping.
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    entries: HashMap<IngredientId, Vec<IngredientId>>,
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        let entries: HashMap<IngredientId, Vec<IngredientId>> = DEFAULT_SUBSTITUTIONS
            .iter()
            .map(|(id, alts)| {
                (id.to_string(), alts.iter().map(|a| a.to_string()).collect::<Vec<_>>())
            })
            .collect();
        Self { entries }
    }
}

impl SubstitutionTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Replaces the alternatives for `ingredient_id`.
    pub fn insert(&mut self, ingredient_id: &str, alternatives: &[&str]) {
        self.entries.insert(
            ingredient_id.to_string(),
            alternatives.iter().map(|a| a.to_string()).collect(),
        );
    }

    pub fn alternatives(&self, ingredient_id: &str) -> &[IngredientId] {
        self.entries.get(ingredient_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Suggestions for one missing ingredient: only alternatives present in
    /// the catalog, available ones first (table order otherwise), capped at
    /// [`MAX_SUBSTITUTIONS`]. `None` when nothing applies.
    pub fn suggest(
        &self,
        missing_id: &str,
        catalog: &IngredientCatalog,
        is_available: impl Fn(&str) -> bool,
    ) -> Option<Substitution> {
        let mut options: Vec<SubstitutionOption> = self
            .alternatives(missing_id)
            .iter()
            .filter(|alt| alt.as_str() != missing_id)
            .filter_map(|alt| catalog.get(alt))
            .map(|ingredient| SubstitutionOption {
                ingredient_id: ingredient.id.clone(),
                name: ingredient.name.clone(),
                available: is_available(ingredient.id.as_str()),
            })
            .collect();

        if options.is_empty() {
            return None;
        }
        // stable: table order is kept inside each group
        options.sort_by_key(|opt| !opt.available);
        options.truncate(MAX_SUBSTITUTIONS);

        Some(Substitution {
            missing_ingredient_id: missing_id.to_string(),
            alternatives: options,
        })
    }
}
