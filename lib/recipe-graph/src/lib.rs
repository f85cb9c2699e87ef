#![doc = include_str!("../README.md")]

pub mod builder;
pub mod config;
pub mod diagram;
pub mod error;
pub mod generate;
pub mod io;
pub mod query;
pub mod record;
pub mod schema;
pub mod source;
pub mod vocab;

pub use builder::{MealInsertion, RecipeGraphBuilder};
pub use diagram::{DiagramFormat, RecipeDiagram};
pub use generate::{generate, GenerationSummary};
pub use query::{QueryOutcome, QueryRunner, RecipeQueryName};
pub use record::{IngredientEntry, MealRecord, RawMeal};
pub use source::{MealDbClient, MealSource};
