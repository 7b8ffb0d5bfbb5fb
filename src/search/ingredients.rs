use serde::{Deserialize, Serialize};

use crate::catalog::model::{Ingredient, IngredientCatalog, IngredientCategory};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IngredientFilter {
    pub query: Option<String>,
    pub category: Option<IngredientCategory>,
    /// Keep only ingredients in season during this month (1..=12).
    pub in_season: Option<u32>,
    pub favorites_only: bool,
    pub user_created_only: bool,
}

/// Ingredients passing every set criterion, in catalog order.
pub fn filter_ingredients<'a>(
    catalog: &'a IngredientCatalog,
    filter: &IngredientFilter,
) -> Vec<&'a Ingredient> {
    let query = filter
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    catalog
        .iter()
        .filter(|i| filter.category.map_or(true, |c| i.category == c))
        .filter(|i| filter.in_season.map_or(true, |m| i.is_in_season(m)))
        .filter(|i| !filter.favorites_only || i.is_favorite)
        .filter(|i| !filter.user_created_only || i.user_created)
        .filter(|i| {
            query.as_deref().map_or(true, |q| {
                i.name.to_lowercase().contains(q) || i.subcategory.to_lowercase().contains(q)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn catalog() -> IngredientCatalog {
        let mut custom =
            Ingredient::new("yuzu-paste", "Yuzu paste", IngredientCategory::Condiments);
        custom.user_created = true;
        let mut catalog = IngredientCatalog::new(vec![
            Ingredient::new("strawberry", "Strawberry", IngredientCategory::Fruits)
                .with_seasonality(&[5, 6, 7], &[6]),
            Ingredient::new("apple", "Apple", IngredientCategory::Fruits),
            Ingredient::new("pumpkin", "Pumpkin", IngredientCategory::Vegetables)
                .with_seasonality(&[9, 10, 11], &[10]),
            custom,
        ]);
        let favorites: HashSet<String> = ["apple".to_string()].into_iter().collect();
        catalog.apply_favorites(&favorites);
        catalog
    }

    fn ids(found: Vec<&Ingredient>) -> Vec<&str> {
        found.into_iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_default_filter_keeps_catalog_order() {
        let cat = catalog();
        assert_eq!(
            ids(filter_ingredients(&cat, &IngredientFilter::default())),
            vec!["strawberry", "apple", "pumpkin", "yuzu-paste"]
        );
    }

    #[test]
    fn test_category_and_season() {
        let cat = catalog();
        let june_fruit = IngredientFilter {
            category: Some(IngredientCategory::Fruits),
            in_season: Some(6),
            ..Default::default()
        };
        assert_eq!(ids(filter_ingredients(&cat, &june_fruit)), vec!["strawberry", "apple"]);

        let january = IngredientFilter { in_season: Some(1), ..Default::default() };
        assert_eq!(ids(filter_ingredients(&cat, &january)), vec!["apple", "yuzu-paste"]);
    }

    #[test]
    fn test_query_favorites_and_user_created() {
        let cat = catalog();
        let q = IngredientFilter { query: Some(" PUMP".into()), ..Default::default() };
        assert_eq!(ids(filter_ingredients(&cat, &q)), vec!["pumpkin"]);

        let favs = IngredientFilter { favorites_only: true, ..Default::default() };
        assert_eq!(ids(filter_ingredients(&cat, &favs)), vec!["apple"]);

        let mine = IngredientFilter { user_created_only: true, ..Default::default() };
        assert_eq!(ids(filter_ingredients(&cat, &mine)), vec!["yuzu-paste"]);
    }
}
