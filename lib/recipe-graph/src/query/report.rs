use crate::error::QueryError;
use crate::query::QueryOutcome;
use oxigraph::model::Term;
use oxigraph::sparql::results::{QueryResultsFormat, QueryResultsSerializer};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

/// Writes a human readable report: a header per query, then one line per solution.
pub fn write_text_report<W: Write + ?Sized>(
    outcomes: &[QueryOutcome],
    writer: &mut W,
) -> io::Result<()> {
    for (index, outcome) in outcomes.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "=== {} ===", outcome.query.description())?;
        if outcome.is_empty() {
            writeln!(writer, "  (no results)")?;
        }
        for row in &outcome.rows {
            let line = row
                .values()
                .iter()
                .map(|value| value.as_ref().map_or_else(|| "-".to_owned(), display_value))
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(writer, "  {line}")?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport {
    triples: usize,
    queries: Vec<JsonQueryReport>,
}

#[derive(Serialize)]
struct JsonQueryReport {
    name: &'static str,
    description: &'static str,
    results: Value,
}

/// Writes a JSON object holding the number of `triples` of the queried graph and a `queries`
/// array with one entry per query. The `results` member of an entry is the
/// [SPARQL 1.1 JSON](https://www.w3.org/TR/sparql11-results-json/) document of the query.
pub fn write_json_report<W: Write>(
    outcomes: &[QueryOutcome],
    triples: usize,
    writer: W,
) -> Result<(), QueryError> {
    let queries = outcomes
        .iter()
        .map(|outcome| {
            Ok(JsonQueryReport {
                name: outcome.query.name(),
                description: outcome.query.description(),
                results: sparql_json(outcome).map_err(|error| QueryError::Serialization {
                    name: outcome.query.name(),
                    error,
                })?,
            })
        })
        .collect::<Result<Vec<_>, QueryError>>()?;

    serde_json::to_writer_pretty(writer, &JsonReport { triples, queries }).map_err(|error| {
        QueryError::Serialization {
            name: "report",
            error: error.into(),
        }
    })
}

fn sparql_json(outcome: &QueryOutcome) -> io::Result<Value> {
    let mut buffer = Vec::new();
    let mut serializer = QueryResultsSerializer::from_format(QueryResultsFormat::Json)
        .serialize_solutions_to_writer(&mut buffer, outcome.variables.clone())?;
    for row in &outcome.rows {
        serializer.serialize(row.iter())?;
    }
    serializer.finish()?;
    Ok(serde_json::from_slice(&buffer)?)
}

/// Literals are printed without quotes or datatype, IRIs without angle brackets.
fn display_value(term: &Term) -> String {
    match term {
        Term::Literal(literal) => literal.value().to_owned(),
        Term::NamedNode(node) => node.as_str().to_owned(),
        other => other.to_string(),
    }
}
