use pantry_match::catalog::{
    read_ingredient_catalog, Difficulty, Ingredient, IngredientCatalog, IngredientCategory,
    IngredientId, Recipe, RecipeCategory, RecipeIngredient,
};
use pantry_match::matching::{match_recipe, RecipeMatcher};
use pantry_match::search::{
    find_makeable_recipes, search_recipes, RecipeSearch, SearchFilters, TtlSearchCache,
};
use pantry_match::shopping_list::build_shopping_list;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;

const CATALOG_CSV: &str = "\
id,name,category,subcategory,months,peak_months,user_created
a,Asparagus,vegetables,,4;5;6,5,false
b,Butter,dairy,,,,false
c,Chives,spices,herbs,,,false
egg,Egg,dairy,,,,false
milk,Milk,dairy,,,,false
flour,Flour,grains,,,,false
sugar,Sugar,condiments,,,,false
tomato,Tomato,vegetables,,6;7;8;9,7;8,false
basil,Basil,spices,herbs,5;6;7;8,7,false
nuts,Hazelnuts,other,,,,false
";

fn catalog() -> IngredientCatalog {
    IngredientCatalog::new(read_ingredient_catalog(CATALOG_CSV.as_bytes()).expect("fixture parses"))
}

fn recipe(id: &str, name: &str, required: &[&str], optional: &[&str]) -> Recipe {
    let mut ingredients: Vec<RecipeIngredient> = required
        .iter()
        .map(|i| RecipeIngredient::required(i, 1.0, "unit"))
        .collect();
    ingredients.extend(optional.iter().map(|i| RecipeIngredient::optional(i, 1.0, "unit")));
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        category: RecipeCategory::Plat,
        difficulty: Difficulty::Easy,
        prep_time: 15,
        cook_time: 20,
        servings: 4,
        ingredients,
        is_favorite: false,
    }
}

fn avail(ids: &[&str]) -> HashSet<IngredientId> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn ten_recipes() -> Vec<Recipe> {
    let pool = ["a", "b", "c", "egg", "milk", "flour", "sugar", "tomato", "basil"];
    (0..10)
        .map(|i| {
            let required: Vec<&str> =
                pool.iter().cycle().skip(i).take(1 + i % 3).copied().collect();
            let mut r = recipe(&format!("r{}", i), &format!("Recipe {:02}", i), &required, &[]);
            r.is_favorite = i == 3 || i == 7;
            r
        })
        .collect()
}

#[test]
fn test_scenario_half_match_with_optional_missing() {
    let cat = catalog();
    let r = recipe("r", "R", &["a", "b"], &["c"]);
    let result = match_recipe(&r, &avail(&["a"]), &cat);

    assert_eq!(result.match_percentage, 50);
    let missing: Vec<&str> = result.missing.iter().map(|l| l.ingredient_id.as_str()).collect();
    let optional_missing: Vec<&str> =
        result.optional_missing.iter().map(|l| l.ingredient_id.as_str()).collect();
    assert_eq!(missing, vec!["b"]);
    assert_eq!(optional_missing, vec!["c"]);
    assert!(!result.can_make);
}

#[test]
fn test_scenario_full_match_with_extra_availability() {
    let cat = catalog();
    let r = recipe("r", "R", &["a", "b"], &[]);
    let result = match_recipe(&r, &avail(&["a", "b", "c"]), &cat);
    assert_eq!(result.match_percentage, 100);
    assert!(result.can_make);
    assert!(result.missing.is_empty());
}

#[test]
fn test_scenario_favorites_only_returns_the_two_favorites() {
    let cat = catalog();
    let recipes = ten_recipes();
    let available = avail(&["egg", "milk", "flour"]);
    let filters = SearchFilters {
        favorites_only: true,
        ..Default::default()
    };

    let results = search_recipes(&recipes, &available, &filters, &cat);
    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(result.recipe.is_favorite);
        let expected = match_recipe(&result.recipe, &available, &cat);
        assert_eq!(result.match_percentage, expected.match_percentage);
        assert_eq!(result.missing, expected.missing);
        assert_eq!(result.can_make, expected.can_make);
    }
}

#[test]
fn test_percentage_is_monotonic_in_availability() {
    let cat = catalog();
    let ids: Vec<String> = cat.iter().map(|i| i.id.clone()).collect();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let size = rng.gen_range(0..6);
        let required: Vec<&str> = ids.choose_multiple(&mut rng, size).map(String::as_str).collect();
        let r = recipe("r", "R", &required, &[]);

        let mut order = ids.clone();
        order.shuffle(&mut rng);
        let mut available = HashSet::new();
        let mut previous = match_recipe(&r, &available, &cat).match_percentage;
        for id in order {
            available.insert(id);
            let result = match_recipe(&r, &available, &cat);
            assert!(result.match_percentage <= 100);
            assert!(result.match_percentage >= previous);
            assert_eq!(result.can_make, result.missing.is_empty());
            previous = result.match_percentage;
        }
        assert_eq!(previous, 100);
    }
}

#[test]
fn test_excluded_ingredient_removes_recipe_regardless_of_other_filters() {
    let cat = catalog();
    let recipes = vec![
        recipe("cake", "Cake", &["egg", "flour"], &["nuts"]),
        recipe("omelette", "Omelette", &["egg"], &["c"]),
    ];
    let filters = SearchFilters {
        excluded_ingredients: vec!["nuts".to_string()],
        difficulty: Some(Difficulty::Easy),
        ..Default::default()
    };
    let results = search_recipes(&recipes, &avail(&["egg", "flour", "nuts"]), &filters, &cat);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe.id, "omelette");
}

#[test]
fn test_excluded_required_ingredient_removes_recipe() {
    let cat = catalog();
    let mut cake = recipe("cake", "Cake", &["egg", "flour", "sugar"], &[]);
    cake.is_favorite = true;
    let mut omelette = recipe("omelette", "Omelette", &["egg", "milk"], &[]);
    omelette.is_favorite = true;
    let recipes = vec![cake, omelette];

    let filters = SearchFilters {
        excluded_ingredients: vec!["flour".to_string()],
        favorites_only: true,
        difficulty: Some(Difficulty::Easy),
        ..Default::default()
    };
    let available = avail(&["egg", "flour", "sugar", "milk"]);
    let results = search_recipes(&recipes, &available, &filters, &cat);
    let ids: Vec<&str> = results.iter().map(|r| r.recipe.id.as_str()).collect();
    assert_eq!(ids, vec!["omelette"]);

    let cached = RecipeSearch::new(catalog()).with_cache(Arc::new(TtlSearchCache::default()));
    for _ in 0..2 {
        let results = cached.search_recipes(&recipes, &available, &filters);
        assert!(results.iter().all(|r| r.recipe.id != "cake"));
    }
}

#[test]
fn test_included_ingredients_all_required() {
    let cat = catalog();
    let recipes = vec![
        recipe("salad", "Salad", &["tomato"], &["basil"]),
        recipe("sauce", "Sauce", &["tomato", "b"], &[]),
        recipe("pesto", "Pesto", &["basil"], &[]),
    ];
    let filters = SearchFilters {
        included_ingredients: vec!["tomato".to_string(), "basil".to_string()],
        ..Default::default()
    };
    let results = search_recipes(&recipes, &avail(&[]), &filters, &cat);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe.id, "salad");
}

#[test]
fn test_ordering_by_percentage_then_name() {
    let cat = catalog();
    let recipes = vec![
        recipe("r80c", "Zucchini bake", &["egg", "milk", "flour", "b", "sugar"], &[]),
        recipe("r80b", "Beta", &["egg", "milk", "flour", "b", "a"], &[]),
        recipe("r80a", "alpha", &["egg", "milk", "flour", "b", "c"], &[]),
    ];
    let filters = SearchFilters::default();
    let results = search_recipes(&recipes, &avail(&["egg", "milk", "flour", "b"]), &filters, &cat);
    let order: Vec<(&str, u8)> = results
        .iter()
        .map(|r| (r.recipe.id.as_str(), r.match_percentage))
        .collect();
    assert_eq!(order, vec![("r80a", 80), ("r80b", 80), ("r80c", 80)]);

    let results = search_recipes(&recipes[..1], &avail(&["egg", "milk", "flour"]), &filters, &cat);
    assert_eq!(results[0].match_percentage, 60);
}

#[test]
fn test_inverted_time_bounds_are_normalized_not_rejected() {
    let cat = catalog();
    let recipes = ten_recipes();
    let inverted = SearchFilters {
        prep_time_min: Some(30),
        prep_time_max: Some(10),
        ..Default::default()
    };
    let ordered = SearchFilters {
        prep_time_min: Some(10),
        prep_time_max: Some(30),
        ..Default::default()
    };
    let available = avail(&["egg"]);
    assert_eq!(
        search_recipes(&recipes, &available, &inverted, &cat),
        search_recipes(&recipes, &available, &ordered, &cat)
    );
    assert_eq!(search_recipes(&recipes, &available, &ordered, &cat).len(), 10);
}

#[test]
fn test_find_makeable_recipes() {
    let cat = catalog();
    let recipes = vec![
        recipe("crepes", "Crepes", &["egg", "milk", "flour"], &["sugar"]),
        recipe("eggs", "Eggs", &["egg"], &[]),
        recipe("cake", "Cake", &["egg", "flour", "sugar", "b"], &[]),
    ];
    let pantry: Vec<Ingredient> = ["egg", "milk", "flour"]
        .iter()
        .filter_map(|id| cat.get(id).cloned())
        .collect();
    let results = find_makeable_recipes(&recipes, &pantry, &cat);
    let names: Vec<&str> = results.iter().map(|r| r.recipe.name.as_str()).collect();
    assert_eq!(names, vec!["Crepes", "Eggs"]);
    assert!(results.iter().all(|r| r.can_make));
}

#[test]
fn test_cache_does_not_change_results() {
    let recipes = ten_recipes();
    let filters_list = vec![
        SearchFilters::default(),
        SearchFilters { favorites_only: true, ..Default::default() },
        SearchFilters { excluded_ingredients: vec!["egg".into()], ..Default::default() },
        SearchFilters { query: Some("recipe 0".into()), ..Default::default() },
    ];
    let available = avail(&["egg", "milk", "tomato", "basil"]);

    let cached = RecipeSearch::new(catalog())
        .with_month(7)
        .with_cache(Arc::new(TtlSearchCache::default()));
    let plain = RecipeSearch::new(catalog()).with_month(7);

    for _ in 0..2 {
        for filters in &filters_list {
            assert_eq!(
                cached.search_recipes(&recipes, &available, filters),
                plain.search_recipes(&recipes, &available, filters)
            );
        }
    }
}

#[test]
fn test_seasonal_bonus_depends_on_month_only() {
    let cat = catalog();
    let r = recipe("caprese", "Caprese", &["tomato", "basil"], &[]);
    let july = RecipeMatcher::new(&cat).with_month(7).match_recipe(&r, &avail(&[]));
    let june = RecipeMatcher::new(&cat).with_month(6).match_recipe(&r, &avail(&[]));
    assert_eq!(july.seasonal_bonus, 10);
    assert_eq!(june.seasonal_bonus, 0);
    assert_eq!(july.match_percentage, 0);
}

#[test]
fn test_shopping_list_from_search_results() {
    let cat = catalog();
    let recipes = vec![
        recipe("crepes", "Crepes", &["egg", "milk", "flour"], &[]),
        recipe("cake", "Cake", &["egg", "flour", "sugar"], &[]),
    ];
    let results = search_recipes(&recipes, &avail(&["egg"]), &SearchFilters::default(), &cat);
    let list = build_shopping_list(&results, &cat, false);

    let flour = list.items.iter().find(|i| i.ingredient_id == "flour").expect("flour listed");
    assert_eq!(flour.quantity, 2.0);
    assert_eq!(flour.recipes.len(), 2);
    assert_eq!(list.by_category().get(&IngredientCategory::Dairy).map(Vec::len), Some(1));
    assert!(list.items.iter().all(|i| i.ingredient_id != "egg"));
}
