use crate::error::SchemaError;
use crate::io::write_graph_file;
use oxigraph::io::{RdfFormat, RdfParseError, RdfParser};
use oxigraph::model::{Graph, TripleRef};
use std::path::Path;

/// The RDFS declarations of the recipe vocabulary, in Turtle.
pub const SCHEMA_TURTLE: &str = include_str!("../schema/recipe_schema.ttl");

/// Parses [`SCHEMA_TURTLE`] into a graph.
pub fn schema_graph() -> Result<Graph, RdfParseError> {
    let mut graph = Graph::new();
    for quad in RdfParser::from_format(RdfFormat::Turtle).for_reader(SCHEMA_TURTLE.as_bytes()) {
        let quad = quad?;
        graph.insert(TripleRef::new(&quad.subject, &quad.predicate, &quad.object));
    }
    Ok(graph)
}

/// Writes the schema on its own to `path` and returns the number of triples written.
pub fn write_schema_file(path: &Path) -> Result<usize, SchemaError> {
    let graph = schema_graph()?;
    write_graph_file(&graph, path)?;
    Ok(graph.len())
}
