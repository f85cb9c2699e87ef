use crate::error::{GraphFileError, QueryError};
use crate::io::load_store;
use crate::query::RecipeQueryName;
use oxigraph::model::Term;
use oxigraph::sparql::{QueryResults, QuerySolution, Variable};
use oxigraph::store::Store;
use std::path::Path;
use tracing::debug;

/// The solutions of one evaluated query.
#[derive(Debug)]
pub struct QueryOutcome {
    pub query: RecipeQueryName,
    /// The projected variables, in projection order.
    pub variables: Vec<Variable>,
    /// The solutions, in the order returned by the evaluator.
    pub rows: Vec<QuerySolution>,
}

impl QueryOutcome {
    /// Returns the value bound to `variable` in every row, skipping rows where it is unbound.
    pub fn column(&self, variable: &str) -> Vec<&Term> {
        self.rows
            .iter()
            .filter_map(|row| row.get(variable))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Evaluates recipe queries against a read-only store.
pub struct QueryRunner {
    store: Store,
}

impl QueryRunner {
    /// Loads the Turtle file at `path` into a new in-memory store.
    pub fn from_file(path: &Path) -> Result<Self, GraphFileError> {
        Ok(Self::from_store(load_store(path)?))
    }

    pub fn from_store(store: Store) -> Self {
        Self { store }
    }

    /// Number of triples in the loaded graph.
    pub fn triple_count(&self) -> Result<usize, GraphFileError> {
        Ok(self.store.len()?)
    }

    /// Evaluates `query` and collects all of its solutions.
    pub fn run(&self, query: RecipeQueryName) -> Result<QueryOutcome, QueryError> {
        let evaluation_error = |error| QueryError::Evaluation {
            name: query.name(),
            error,
        };

        let QueryResults::Solutions(solutions) =
            self.store.query(query.text()).map_err(evaluation_error)?
        else {
            return Err(QueryError::NotASelect(query.name()));
        };
        let variables = solutions.variables().to_vec();
        let rows = solutions
            .collect::<Result<Vec<_>, _>>()
            .map_err(evaluation_error)?;

        debug!(query = query.name(), rows = rows.len(), "Query evaluated");
        Ok(QueryOutcome {
            query,
            variables,
            rows,
        })
    }

    /// Evaluates `queries` in order. The first failing query aborts the evaluation.
    pub fn run_all(&self, queries: &[RecipeQueryName]) -> Result<Vec<QueryOutcome>, QueryError> {
        queries.iter().map(|query| self.run(*query)).collect()
    }
}
