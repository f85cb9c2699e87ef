//! The fixed set of SPARQL queries evaluated against a generated recipe graph.

mod name;
mod report;
mod runner;

pub use name::{RecipeQueryName, UnknownQueryName};
pub use report::{write_json_report, write_text_report};
pub use runner::{QueryOutcome, QueryRunner};
