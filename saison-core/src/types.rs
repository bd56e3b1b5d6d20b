use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Cooking skill the household claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Household meal-planning preferences, as submitted by the preferences form.
///
/// The form posts numbers as strings (`"2"`, `"30"`), so the numeric fields
/// accept either representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub household_size: u32,
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub meals_per_day: u32,
    /// Maximum total prep + cooking minutes per recipe.
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub cooking_time: u32,
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub dietary_needs: Vec<String>,
}

/// A shopping-relevant ingredient.
///
/// `quantity` stays a string: merged entries carry expressions like `"200 + 150"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Ingredient {
    pub name: String,
    #[serde(default, deserialize_with = "string_from_scalar")]
    pub quantity: String,
    #[serde(default, deserialize_with = "string_from_scalar")]
    pub unit: String,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

/// A fully populated recipe. Only the normalizer produces these from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub servings: u32,
    pub prep_time: u32,
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_note: Option<String>,
}

impl Recipe {
    pub fn total_minutes(&self) -> u32 {
        self.prep_time.saturating_add(self.cooking_time)
    }
}

/// The part of a selected recipe that ingredient extraction looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecipeSummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
        }
    }
}

/// A recipe exactly as the model returned it: every field optional and untyped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub servings: Option<Value>,
    #[serde(default)]
    pub prep_time: Option<Value>,
    #[serde(default)]
    pub cooking_time: Option<Value>,
    #[serde(default)]
    pub ingredients: Option<Value>,
    #[serde(default)]
    pub instructions: Option<Value>,
    #[serde(default)]
    pub seasonal_note: Option<Value>,
}

/// An ingredient exactly as the model returned it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIngredient {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub unit: Option<Value>,
}

fn u32_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {:?}", s))),
    }
}

fn string_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}
