pub mod config;
pub mod consolidate;
pub mod error;
pub mod export;
pub mod llm;
pub mod normalize;
pub mod parse;
pub mod planner;
pub mod prompts;
pub mod retailers;
pub mod types;

pub use config::{ConfigError, PipelineOptions, PlannerConfig, RecipeCount};
pub use consolidate::consolidate;
pub use error::{ParseError, PlanError, ShapeError};
pub use export::render_shopping_list;
pub use llm::{create_provider_from_env, LlmError, LlmProvider, ModelSettings};
pub use normalize::{normalize_recipes, NormalizeConstraints};
pub use parse::parse_json_array;
pub use planner::{build_shopping_list, generate_recipes};
pub use retailers::{format_ingredient_for_search, retailer_links, shopping_items, RetailerLinks, ShoppingItem};
pub use types::{Ingredient, Preferences, Recipe, RecipeSummary, SkillLevel};
