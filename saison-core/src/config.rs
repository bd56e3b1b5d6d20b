//! Planner configuration from environment variables.

use std::env;
use thiserror::Error;

use crate::llm::ModelSettings;
use crate::types::Preferences;

/// Default number of recipes per plan.
pub const DEFAULT_RECIPE_COUNT: u32 = 3;

/// Default number of planned days when the count is derived per meal.
pub const DEFAULT_DAYS_PLANNED: u32 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

/// How many recipes a plan asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeCount {
    Fixed(u32),
    /// `mealsPerDay × days`.
    PerMeal { days: u32 },
}

impl RecipeCount {
    pub fn resolve(&self, preferences: &Preferences) -> u32 {
        match *self {
            RecipeCount::Fixed(n) => n,
            RecipeCount::PerMeal { days } => preferences.meals_per_day.saturating_mul(days),
        }
    }
}

impl Default for RecipeCount {
    fn default() -> Self {
        RecipeCount::Fixed(DEFAULT_RECIPE_COUNT)
    }
}

/// Toggles covering the generation variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Include the literal JSON schema and the "JSON only" instruction in the prompt.
    pub strict_schema: bool,
    /// Shrink prep/cooking time proportionally to fit the preferred maximum.
    pub rescale_time: bool,
    pub recipe_count: RecipeCount,
    /// Replace the model's servings with the household size.
    pub scale_servings_to_household: bool,
    /// Treat a bare recipe object as a one-recipe plan instead of a shape error.
    pub accept_single_object: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            strict_schema: true,
            rescale_time: true,
            recipe_count: RecipeCount::default(),
            scale_servings_to_household: true,
            accept_single_object: false,
        }
    }
}

/// Everything the planner needs besides the provider itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub pipeline: PipelineOptions,
    pub generation: ModelSettings,
    pub extraction: ModelSettings,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineOptions::default(),
            generation: ModelSettings::generation(),
            extraction: ModelSettings::extraction(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `SAISON_RECIPE_COUNT`: a positive integer or "per-meal" (default: 3)
    /// - `SAISON_DAYS_PLANNED`: days for "per-meal" (default: 5)
    /// - `SAISON_STRICT_SCHEMA`, `SAISON_RESCALE_TIME`, `SAISON_SCALE_SERVINGS`
    ///   (default: true), `SAISON_ACCEPT_SINGLE_OBJECT` (default: false)
    /// - `SAISON_GENERATION_MODEL`, `SAISON_GENERATION_MAX_TOKENS`, `SAISON_GENERATION_TEMPERATURE`
    /// - `SAISON_EXTRACTION_MODEL`, `SAISON_EXTRACTION_MAX_TOKENS`, `SAISON_EXTRACTION_TEMPERATURE`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let days = parse_var(&lookup, "SAISON_DAYS_PLANNED", DEFAULT_DAYS_PLANNED)?;

        let recipe_count = match lookup("SAISON_RECIPE_COUNT") {
            None => RecipeCount::default(),
            Some(value) if value.trim().eq_ignore_ascii_case("per-meal") => {
                RecipeCount::PerMeal { days }
            }
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => RecipeCount::Fixed(n),
                _ => return Err(invalid("SAISON_RECIPE_COUNT", &value)),
            },
        };

        let defaults = PipelineOptions::default();
        let pipeline = PipelineOptions {
            strict_schema: bool_var(&lookup, "SAISON_STRICT_SCHEMA", defaults.strict_schema)?,
            rescale_time: bool_var(&lookup, "SAISON_RESCALE_TIME", defaults.rescale_time)?,
            recipe_count,
            scale_servings_to_household: bool_var(
                &lookup,
                "SAISON_SCALE_SERVINGS",
                defaults.scale_servings_to_household,
            )?,
            accept_single_object: bool_var(
                &lookup,
                "SAISON_ACCEPT_SINGLE_OBJECT",
                defaults.accept_single_object,
            )?,
        };

        Ok(Self {
            pipeline,
            generation: model_settings(&lookup, "GENERATION", ModelSettings::generation())?,
            extraction: model_settings(&lookup, "EXTRACTION", ModelSettings::extraction())?,
        })
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| invalid(name, &value)),
    }
}

fn bool_var<F>(lookup: &F, name: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).as_deref().map(str::trim) {
        None => Ok(default),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(invalid(name, other)),
    }
}

fn model_settings<F>(
    lookup: &F,
    stage: &str,
    defaults: ModelSettings,
) -> Result<ModelSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(ModelSettings {
        model: lookup(&format!("SAISON_{stage}_MODEL")).unwrap_or(defaults.model),
        max_tokens: parse_var(
            lookup,
            &format!("SAISON_{stage}_MAX_TOKENS"),
            defaults.max_tokens,
        )?,
        temperature: parse_var(
            lookup,
            &format!("SAISON_{stage}_TEMPERATURE"),
            defaults.temperature,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkillLevel;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<PlannerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlannerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.pipeline, PipelineOptions::default());
        assert_eq!(config.pipeline.recipe_count, RecipeCount::Fixed(3));
        assert_eq!(config.generation, ModelSettings::generation());
        assert_eq!(config.extraction, ModelSettings::extraction());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SAISON_RECIPE_COUNT", "per-meal"),
            ("SAISON_DAYS_PLANNED", "7"),
            ("SAISON_STRICT_SCHEMA", "false"),
            ("SAISON_RESCALE_TIME", "0"),
            ("SAISON_ACCEPT_SINGLE_OBJECT", "1"),
            ("SAISON_EXTRACTION_MODEL", "claude-3-5-haiku-20241022"),
            ("SAISON_GENERATION_MAX_TOKENS", "4000"),
        ])
        .unwrap();

        assert_eq!(config.pipeline.recipe_count, RecipeCount::PerMeal { days: 7 });
        assert!(!config.pipeline.strict_schema);
        assert!(!config.pipeline.rescale_time);
        assert!(config.pipeline.accept_single_object);
        assert_eq!(config.extraction.model, "claude-3-5-haiku-20241022");
        assert_eq!(config.generation.max_tokens, 4000);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            load(&[("SAISON_RECIPE_COUNT", "0")]).unwrap_err(),
            ConfigError::InvalidValue {
                name: "SAISON_RECIPE_COUNT".to_string(),
                value: "0".to_string()
            }
        );
        assert!(load(&[("SAISON_STRICT_SCHEMA", "maybe")]).is_err());
        assert!(load(&[("SAISON_GENERATION_TEMPERATURE", "hot")]).is_err());
    }

    #[test]
    fn test_recipe_count_resolve() {
        let prefs = Preferences {
            household_size: 2,
            meals_per_day: 3,
            cooking_time: 30,
            skill_level: SkillLevel::Beginner,
            dietary_needs: vec![],
        };
        assert_eq!(RecipeCount::Fixed(3).resolve(&prefs), 3);
        assert_eq!(RecipeCount::PerMeal { days: 5 }.resolve(&prefs), 15);
    }
}
