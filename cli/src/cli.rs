use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};
use recipe_graph::config::{
    FetchStrategy, DEFAULT_API_BASE_URL, DEFAULT_GRAPH_FILE, DEFAULT_MAX_FAILURES,
    DEFAULT_MEAL_COUNT, DEFAULT_REQUEST_DELAY_MS, DEFAULT_SCHEMA_FILE,
};
use recipe_graph::{DiagramFormat, RecipeQueryName};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "recipe-graph")]
/// Recipe knowledge graph generator and SPARQL query runner
pub struct Args {
    /// Log debug messages
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch meals from TheMealDB and write them as a Turtle knowledge graph
    Generate {
        /// Number of meals to fetch
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_MEAL_COUNT,
            env = "RECIPE_GRAPH_COUNT",
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        count: usize,
        /// File the graph is written to
        ///
        /// An existing file is replaced once the whole graph has been built.
        #[arg(short, long, default_value = DEFAULT_GRAPH_FILE, env = "RECIPE_GRAPH_OUTPUT", value_hint = ValueHint::FilePath)]
        output: PathBuf,
        /// How meals are picked
        #[arg(long, value_enum, default_value_t = Strategy::Random)]
        strategy: Strategy,
        /// Base URL of the TheMealDB JSON API
        #[arg(long, default_value = DEFAULT_API_BASE_URL, env = "RECIPE_GRAPH_API_URL", value_hint = ValueHint::Url)]
        api_url: String,
        /// Pause between two requests, in milliseconds
        #[arg(long, default_value_t = DEFAULT_REQUEST_DELAY_MS)]
        delay_ms: u64,
        /// Number of failed records tolerated before the run is aborted
        #[arg(long, default_value_t = DEFAULT_MAX_FAILURES)]
        max_failures: usize,
        /// Also write the schema alone to this file
        #[arg(long, value_hint = ValueHint::FilePath)]
        schema_output: Option<PathBuf>,
    },
    /// Load a generated graph and evaluate the predefined SPARQL queries on it
    Query {
        /// Turtle file to load
        #[arg(short, long, default_value = DEFAULT_GRAPH_FILE, env = "RECIPE_GRAPH_OUTPUT", value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Query to evaluate, can be repeated
        ///
        /// By default all queries are evaluated.
        #[arg(long = "query", value_name = "NAME", action = ArgAction::Append)]
        queries: Vec<RecipeQueryName>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write the RDFS schema of the recipe vocabulary
    Schema {
        /// File the schema is written to
        #[arg(short, long, default_value = DEFAULT_SCHEMA_FILE, value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },
    /// Export the meals of a generated graph and their links as a diagram
    Export {
        /// Turtle file to load
        #[arg(short, long, default_value = DEFAULT_GRAPH_FILE, env = "RECIPE_GRAPH_OUTPUT", value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Diagram syntax
        #[arg(long, value_enum, default_value_t = ExportFormat::Dot)]
        format: ExportFormat,
        /// File the diagram is written to, stdout if not set
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Strategy {
    /// Call the random meal endpoint once per meal
    Random,
    /// Search meals by first letter, from 'a' to 'z'
    Letter,
}

impl From<Strategy> for FetchStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Random => Self::Random,
            Strategy::Letter => Self::ByFirstLetter,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    /// SPARQL JSON results, one entry per query
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    /// Graphviz DOT
    Dot,
    /// Mermaid flowchart
    Mermaid,
}

impl From<ExportFormat> for DiagramFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Dot => Self::Dot,
            ExportFormat::Mermaid => Self::Mermaid,
        }
    }
}
