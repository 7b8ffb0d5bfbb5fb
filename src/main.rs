use anyhow::{Context, Result};
use pantry_match::catalog::{
    load_ingredient_catalog, load_recipes, parse_favorites, IngredientCatalog, Recipe,
};
use pantry_match::cli::{parse_args, Cli, Command};
use pantry_match::config::Config;
use pantry_match::matching::{current_month, MatchResult};
use pantry_match::search::{filter_ingredients, RecipeSearch, SearchFilters, TtlSearchCache};
use pantry_match::shopping_list::{build_shopping_list, scale_recipe, ShoppingList};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // stderr keeps --json output on stdout clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn load_catalog(path: &Path, favorites: Option<&Path>) -> Result<IngredientCatalog> {
    let ingredients = load_ingredient_catalog(path)
        .with_context(|| format!("Failed to load ingredient catalog from '{}'", path.display()))?;
    let mut catalog = IngredientCatalog::new(ingredients);

    if let Some(fav_path) = favorites {
        let favs = fs::read_to_string(fav_path)
            .await
            .with_context(|| format!("Failed to read favorites file '{}'", fav_path.display()))?;
        catalog.apply_favorites(&parse_favorites(&favs));
    }
    Ok(catalog)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_results(results: &[MatchResult], catalog: &IngredientCatalog) {
    if results.is_empty() {
        println!("No recipe found.");
        return;
    }
    let name_of = |id: &str| catalog.get(id).map_or(id.to_string(), |i| i.name.clone());
    for result in results {
        let bonus = if result.seasonal_bonus > 0 {
            format!(" (+{} seasonal)", result.seasonal_bonus)
        } else {
            String::new()
        };
        println!(
            "{:>3}% {} {}{}",
            result.match_percentage,
            if result.can_make { "✓" } else { " " },
            result.recipe.name,
            bonus
        );
        if !result.missing.is_empty() {
            let missing: Vec<String> =
                result.missing.iter().map(|l| name_of(&l.ingredient_id)).collect();
            println!("       missing: {}", missing.join(", "));
        }
        for sub in &result.substitutions {
            let alts: Vec<&str> = sub.alternatives.iter().map(|a| a.name.as_str()).collect();
            println!(
                "       instead of {}: {}",
                name_of(&sub.missing_ingredient_id),
                alts.join(" / ")
            );
        }
    }
}

fn print_shopping_list(list: &ShoppingList) {
    if list.is_empty() {
        println!("Nothing to buy.");
        return;
    }
    for (category, items) in list.by_category() {
        println!("{}", category);
        for item in items {
            println!(
                "  - {} {} {} ({})",
                item.quantity,
                item.unit,
                item.name,
                item.recipes.join(", ")
            );
        }
    }
}

fn availability(ids: &[String]) -> HashSet<String> {
    ids.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG may come from .env
    dotenv::dotenv().ok();
    init_logging();
    let config = Config::load();
    let cli: Cli = parse_args();

    let recipes_path = cli
        .recipes
        .clone()
        .unwrap_or_else(|| config.recipes_path.clone());
    let ingredients_path = cli
        .ingredients
        .clone()
        .unwrap_or_else(|| config.ingredients_path.clone());
    let month = cli.month.unwrap_or_else(current_month);

    let catalog = load_catalog(&ingredients_path, cli.favorites.as_deref()).await?;
    info!(
        ingredients = catalog.len(),
        path = %ingredients_path.display(),
        "ingredient catalog loaded"
    );

    if let Command::Ingredients(args) = &cli.command {
        let found = filter_ingredients(&catalog, &args.to_filter(month));
        if cli.json {
            return print_json(&found);
        }
        for ingredient in found {
            println!("{:<24} {:<12} {}", ingredient.name, ingredient.category, ingredient.id);
        }
        return Ok(());
    }

    let recipes = load_recipes(&recipes_path)
        .with_context(|| format!("Failed to load recipes from '{}'", recipes_path.display()))?;
    info!(
        recipes = recipes.len(),
        path = %recipes_path.display(),
        "recipes loaded"
    );

    let mut search = RecipeSearch::new(catalog).with_month(month);
    if config.cache_enabled {
        search = search.with_cache(Arc::new(TtlSearchCache::new(config.cache_ttl)));
    }

    match &cli.command {
        Command::Search(args) => {
            let available = availability(&args.available);
            let results = search.search_recipes(&recipes, &available, &args.to_filters());
            if cli.json {
                print_json(&results)?;
            } else {
                print_results(&results, search.catalog());
            }
        }
        Command::Makeable { available } => {
            let pantry: Vec<_> = availability(available)
                .iter()
                .filter_map(|id| search.catalog().get(id).cloned())
                .collect();
            let results = search.find_makeable_recipes(&recipes, &pantry);
            if cli.json {
                print_json(&results)?;
            } else {
                print_results(&results, search.catalog());
            }
        }
        Command::Suggest { query } => {
            let suggestions = search.suggest(query, &recipes);
            if cli.json {
                print_json(&suggestions)?;
            } else {
                suggestions.iter().for_each(|s| println!("{}", s));
            }
        }
        Command::ShoppingList { recipe_ids, available, servings, with_optional } => {
            let selected: Vec<Recipe> = recipe_ids
                .iter()
                .map(|id| {
                    recipes
                        .iter()
                        .find(|r| &r.id == id)
                        .map(|r| servings.map_or_else(|| r.clone(), |n| scale_recipe(r, n)))
                        .with_context(|| format!("Unknown recipe id '{}'", id))
                })
                .collect::<Result<_>>()?;
            let available = availability(available);
            let results = search.search_recipes(&selected, &available, &SearchFilters::default());
            let list = build_shopping_list(&results, search.catalog(), *with_optional);
            if cli.json {
                print_json(&list)?;
            } else {
                print_shopping_list(&list);
            }
        }
        Command::Ingredients(_) => {}
    }

    Ok(())
}
