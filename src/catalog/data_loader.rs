use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::catalog::model::{Ingredient, IngredientCategory, IngredientId, Recipe, Seasonality};
use crate::error::LoadError;

// Expected column headers
const ID_COL: &str = "id";
const NAME_COL: &str = "name";
const CATEGORY_COL: &str = "category";
const SUBCATEGORY_COL: &str = "subcategory";
const MONTHS_COL: &str = "months";
const PEAK_MONTHS_COL: &str = "peak_months";
const USER_CREATED_COL: &str = "user_created";

fn column(headers: &csv::StringRecord, name: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(LoadError::MissingColumn(name))
}

fn optional_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn parse_months(raw: &str, row: usize) -> Result<Vec<u32>, LoadError> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u32>() {
            Ok(m) if (1..=12).contains(&m) => Ok(m),
            _ => Err(LoadError::InvalidMonth {
                row,
                value: s.to_string(),
            }),
        })
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Reads an ingredient catalog in CSV form. Rows without an id or a name are
/// skipped; the `subcategory`, `months`, `peak_months` and `user_created`
/// columns may be absent.
pub fn read_ingredient_catalog<R: Read>(reader: R) -> Result<Vec<Ingredient>, LoadError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let id_idx = column(&headers, ID_COL)?;
    let name_idx = column(&headers, NAME_COL)?;
    let category_idx = column(&headers, CATEGORY_COL)?;
    let subcategory_idx = optional_column(&headers, SUBCATEGORY_COL);
    let months_idx = optional_column(&headers, MONTHS_COL);
    let peak_idx = optional_column(&headers, PEAK_MONTHS_COL);
    let user_created_idx = optional_column(&headers, USER_CREATED_COL);

    let mut ingredients = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result?;
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let id = field(Some(id_idx)).to_string();
        let name = field(Some(name_idx)).to_string();
        if id.is_empty() || name.is_empty() {
            warn!(row = row_index, "skipping ingredient row without id or name");
            continue;
        }

        let raw_category = field(Some(category_idx));
        let category = raw_category
            .parse::<IngredientCategory>()
            .map_err(|category| LoadError::InvalidCategory {
                row: row_index,
                category,
            })?;

        let months = parse_months(field(months_idx), row_index)?;
        let peak_months = parse_months(field(peak_idx), row_index)?;
        let seasonality = if months.is_empty() && peak_months.is_empty() {
            None
        } else {
            Some(Seasonality { months, peak_months })
        };

        ingredients.push(Ingredient {
            id,
            name,
            category,
            subcategory: field(subcategory_idx).to_string(),
            seasonality,
            user_created: parse_flag(field(user_created_idx)),
            is_favorite: false,
        });
    }

    if ingredients.is_empty() {
        return Err(LoadError::Empty("ingredients"));
    }
    debug!(count = ingredients.len(), "ingredient catalog read");
    Ok(ingredients)
}

pub fn load_ingredient_catalog(csv_path: &Path) -> Result<Vec<Ingredient>, LoadError> {
    if !csv_path.exists() {
        return Err(LoadError::NotFound(csv_path.to_path_buf()));
    }
    let file = std::fs::File::open(csv_path)?;
    read_ingredient_catalog(file)
}

/// Parses a JSON array of recipes. An empty array is a valid, empty collection.
pub fn parse_recipes_json(content: &str) -> Result<Vec<Recipe>, LoadError> {
    let recipes: Vec<Recipe> = serde_json::from_str(content)?;
    debug!(count = recipes.len(), "recipes parsed");
    Ok(recipes)
}

pub fn load_recipes(json_path: &Path) -> Result<Vec<Recipe>, LoadError> {
    if !json_path.exists() {
        return Err(LoadError::NotFound(json_path.to_path_buf()));
    }
    let content = std::fs::read_to_string(json_path)?;
    parse_recipes_json(&content)
}

/// One ingredient id per line; blank lines and `#` comments are ignored.
pub fn parse_favorites(content: &str) -> HashSet<IngredientId> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
