use oxigraph::io::RdfParseError;
use oxigraph::sparql::EvaluationError;
use oxigraph::store::{LoaderError, StorageError};
use std::io;
use std::path::PathBuf;

/// An error raised while retrieving a meal record from the recipe API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("Could not send request to '{url}'")]
    Transport {
        /// The requested URL.
        url: String,
        /// The underlying client error.
        #[source]
        error: reqwest::Error,
    },
    /// The API answered with a non-success status code.
    #[error("Response code for '{url}' was not OK. Actual: {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The status returned by the API.
        status: reqwest::StatusCode,
    },
    /// The body is not a valid meal payload.
    #[error("Malformed JSON payload from '{url}'")]
    Decode {
        /// The requested URL.
        url: String,
        /// The parsing error.
        #[source]
        error: serde_json::Error,
    },
    /// The payload did not contain any meal.
    #[error("The response from '{url}' contains no meal")]
    Empty {
        /// The requested URL.
        url: String,
    },
    /// The base URL of the API cannot be joined with an endpoint.
    #[error("Invalid API URL '{0}'")]
    InvalidUrl(String),
}

/// An error raised while turning a raw payload into a [`MealRecord`](crate::record::MealRecord).
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A field every meal must carry is absent or blank.
    #[error("Meal record {id} is missing the field '{field}'")]
    MissingField {
        /// The meal identifier, or `<unknown>` when the identifier itself is missing.
        id: String,
        /// The name of the field in the API payload.
        field: &'static str,
    },
}

/// Any failure that makes a single record unusable. Such failures are skipped during generation.
#[derive(Debug, thiserror::Error)]
pub enum RecordFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// An error raised while reading or writing a graph file.
#[derive(Debug, thiserror::Error)]
pub enum GraphFileError {
    /// The graph file does not exist.
    #[error("Graph file '{}' does not exist", .0.display())]
    Missing(PathBuf),
    /// The graph file exists but could not be read or written.
    #[error("Cannot access graph file '{}'", path.display())]
    Io {
        /// The path of the file.
        path: PathBuf,
        /// The I/O error.
        #[source]
        error: io::Error,
    },
    /// The graph file is not valid Turtle.
    #[error("Graph file '{}' is not valid Turtle", path.display())]
    Malformed {
        /// The path of the file.
        path: PathBuf,
        /// The parsing error.
        #[source]
        error: RdfParseError,
    },
    /// The in-memory store could not be created or filled.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl GraphFileError {
    /// Maps an error of the store loader for the file at `path`.
    pub(crate) fn from_loader(path: PathBuf, error: LoaderError) -> Self {
        match error {
            LoaderError::Parsing(error) => Self::Malformed { path, error },
            LoaderError::Storage(error) => Self::Storage(error),
            error => Self::Io {
                path,
                error: error.into(),
            },
        }
    }
}

/// An error raised while writing the recipe schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The bundled schema could not be parsed.
    #[error("The bundled recipe schema is invalid")]
    Parse(#[from] RdfParseError),
    #[error(transparent)]
    File(#[from] GraphFileError),
}

/// An error raised while evaluating one of the recipe queries.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Query '{name}' failed")]
    Evaluation {
        /// The name of the query.
        name: &'static str,
        /// The error returned by the SPARQL evaluator.
        #[source]
        error: EvaluationError,
    },
    #[error("Query '{0}' does not return solutions")]
    NotASelect(&'static str),
    #[error("Cannot serialize the results of query '{name}'")]
    Serialization {
        /// The name of the query.
        name: &'static str,
        /// The I/O error.
        #[source]
        error: io::Error,
    },
}

/// An error that aborts a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// More records failed than the configured threshold allows.
    #[error("Aborting: {failures} meal records failed, more than the allowed {max_failures}")]
    TooManyFailures {
        /// Number of records that failed so far.
        failures: usize,
        /// The configured threshold.
        max_failures: usize,
        /// The last failure observed.
        #[source]
        last: RecordFailure,
    },
    /// Not a single meal could be retrieved.
    #[error("No meal could be fetched ({requested} requested)")]
    NoMeals {
        /// The number of requested meals.
        requested: usize,
    },
    /// The bundled schema could not be parsed.
    #[error("The bundled recipe schema is invalid")]
    Schema(#[from] RdfParseError),
    #[error(transparent)]
    File(#[from] GraphFileError),
}
