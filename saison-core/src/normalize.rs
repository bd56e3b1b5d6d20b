//! Normalization of model output into fully populated recipes.
//!
//! This is where untrusted model JSON becomes typed data. Individual fields are
//! never rejected: anything missing or malformed gets a default, so a partly
//! broken reply still yields a usable plan.

use serde_json::Value;

use crate::error::ShapeError;
use crate::types::{Ingredient, RawIngredient, RawRecipe, Recipe};

pub const DEFAULT_TITLE: &str = "Untitled Recipe";
pub const DEFAULT_SERVINGS: u32 = 2;
pub const DEFAULT_PREP_TIME: u32 = 15;
pub const DEFAULT_COOKING_TIME: u32 = 30;

/// Caller-supplied limits applied to every recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeConstraints {
    /// Upper bound for `prep_time + cooking_time`.
    pub max_total_minutes: Option<u32>,
    /// Overrides whatever servings the model chose.
    pub servings: Option<u32>,
    /// Accept a bare object as a one-recipe plan.
    pub accept_single_object: bool,
}

/// Normalize a parsed model reply into recipes.
///
/// Fails only when the value is not a non-empty array (or a bare object, when
/// `accept_single_object` is set).
pub fn normalize_recipes(
    value: Value,
    constraints: &NormalizeConstraints,
) -> Result<Vec<Recipe>, ShapeError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) if constraints.accept_single_object => vec![value],
        _ => return Err(ShapeError::NotAnArray),
    };

    if items.is_empty() {
        return Err(ShapeError::Empty);
    }

    Ok(items
        .into_iter()
        .map(|item| {
            let raw: RawRecipe = serde_json::from_value(item).unwrap_or_default();
            normalize_recipe(raw, constraints)
        })
        .collect())
}

/// Fill in defaults for a single recipe and apply the constraints.
pub fn normalize_recipe(raw: RawRecipe, constraints: &NormalizeConstraints) -> Recipe {
    let title = non_empty_string(raw.title.as_ref()).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = raw
        .description
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default();

    let servings = constraints.servings.unwrap_or_else(|| {
        as_minutes(raw.servings.as_ref())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_SERVINGS)
    });

    // Zero means the model left the field blank.
    let mut prep_time = as_minutes(raw.prep_time.as_ref())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_PREP_TIME);
    let mut cooking_time = as_minutes(raw.cooking_time.as_ref())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_COOKING_TIME);
    if let Some(max) = constraints.max_total_minutes {
        (prep_time, cooking_time) = rescale_times(prep_time, cooking_time, max);
    }

    let ingredients = match raw.ingredients {
        Some(Value::Array(items)) => items.into_iter().filter_map(ingredient_from_value).collect(),
        _ => Vec::new(),
    };

    let instructions = match raw.instructions {
        Some(Value::Array(steps)) => steps
            .into_iter()
            .filter_map(|step| match step {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    Recipe {
        title,
        description,
        servings,
        prep_time,
        cooking_time,
        ingredients,
        instructions,
        seasonal_note: non_empty_string(raw.seasonal_note.as_ref()),
    }
}

/// Shrink both times by the same ratio so their sum fits in `max`.
///
/// Each result is `floor(original * max / total)`, computed exactly in integers.
/// Times already within the limit are returned unchanged.
pub fn rescale_times(prep_time: u32, cooking_time: u32, max: u32) -> (u32, u32) {
    let total = u64::from(prep_time) + u64::from(cooking_time);
    if total <= u64::from(max) {
        return (prep_time, cooking_time);
    }

    let scale = |minutes: u32| (u64::from(minutes) * u64::from(max) / total) as u32;
    (scale(prep_time), scale(cooking_time))
}

/// Normalize an extracted ingredient list.
///
/// Returns `None` unless `value` is an array whose every element yields an
/// ingredient with a name.
pub fn normalize_ingredients(value: Value) -> Option<Vec<Ingredient>> {
    match value {
        Value::Array(items) => items.into_iter().map(ingredient_from_value).collect(),
        _ => None,
    }
}

fn ingredient_from_value(value: Value) -> Option<Ingredient> {
    if let Value::String(s) = &value {
        let name = s.trim();
        return (!name.is_empty()).then(|| Ingredient::new(name, "", ""));
    }

    let raw: RawIngredient = serde_json::from_value(value).ok()?;
    let name = non_empty_string(raw.name.as_ref())?;

    Some(Ingredient {
        name,
        quantity: scalar_string(raw.quantity.as_ref()),
        unit: scalar_string(raw.unit.as_ref()),
    })
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn scalar_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Read a non-negative whole number from a JSON number or from the leading
/// digits of a string ("20 minutes" -> 20).
fn as_minutes(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => {
            if let Some(n) = n.as_u64() {
                return u32::try_from(n).ok();
            }
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f.floor() as u32)
        }
        Value::String(s) => {
            let digits: String = s
                .trim_start()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}
