//! Default settings and the options of a generation run.

use std::path::PathBuf;
use std::time::Duration;

/// Number of meals requested when no count is given.
pub const DEFAULT_MEAL_COUNT: usize = 50;
/// File the generated graph is written to when no path is given.
pub const DEFAULT_GRAPH_FILE: &str = "recipe_knowledge_graph.ttl";
/// File the schema is written to when no path is given.
pub const DEFAULT_SCHEMA_FILE: &str = "recipe_schema.ttl";
/// Base URL of TheMealDB's public API (test key `1`).
pub const DEFAULT_API_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1/";
/// Pause between two requests to the API, in milliseconds.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;
/// Pause between two requests to the API.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(DEFAULT_REQUEST_DELAY_MS);
/// Number of failed records tolerated before a run is aborted.
pub const DEFAULT_MAX_FAILURES: usize = 10;

/// How meal records are requested from the API.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum FetchStrategy {
    /// One `random.php` request per meal.
    #[default]
    Random,
    /// One `search.php?f=<letter>` request per letter, from `a` to `z`, until enough meals
    /// have been collected.
    ByFirstLetter,
}

/// Options of a generation run.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Number of meal records to request.
    pub count: usize,
    /// Where the graph is written.
    pub output: PathBuf,
    /// How records are requested.
    pub strategy: FetchStrategy,
    /// Pause between two requests.
    pub delay: Duration,
    /// Number of failed records tolerated before the run is aborted.
    pub max_failures: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_MEAL_COUNT,
            output: PathBuf::from(DEFAULT_GRAPH_FILE),
            strategy: FetchStrategy::default(),
            delay: DEFAULT_REQUEST_DELAY,
            max_failures: DEFAULT_MAX_FAILURES,
        }
    }
}
