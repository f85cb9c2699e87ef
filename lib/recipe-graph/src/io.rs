//! Reading and writing recipe graphs as Turtle.

use crate::error::GraphFileError;
use crate::vocab::ns::PREFIXES;
use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::{Graph, GraphNameRef, TripleRef};
use oxigraph::store::Store;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Serializes `graph` as Turtle, declaring all recipe prefixes.
///
/// Triples are grouped by subject so that every node is written as a single block.
pub fn write_turtle<W: Write>(graph: &Graph, writer: W) -> io::Result<W> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle);
    for (prefix_name, prefix_iri) in PREFIXES {
        serializer = serializer
            .with_prefix(prefix_name, prefix_iri)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    }

    let mut triples = graph.iter().collect::<Vec<TripleRef<'_>>>();
    triples.sort_by_cached_key(|triple| {
        (
            triple.subject.to_string(),
            triple.predicate.as_str().to_owned(),
            triple.object.to_string(),
        )
    });

    let mut serializer = serializer.for_writer(writer);
    for triple in triples {
        serializer.serialize_triple(triple)?;
    }
    serializer.finish()
}

/// Writes `graph` to `path`, replacing any existing file.
///
/// The content is first written to a temporary file next to `path` and then moved in place, so
/// `path` either holds the previous content or the complete new graph.
pub fn write_graph_file(graph: &Graph, path: &Path) -> Result<(), GraphFileError> {
    let io_error = |error| GraphFileError::Io {
        path: path.to_path_buf(),
        error,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp_file = NamedTempFile::new_in(directory).map_err(io_error)?;
    let writer = write_turtle(graph, BufWriter::new(temp_file)).map_err(io_error)?;
    let temp_file = writer
        .into_inner()
        .map_err(io::IntoInnerError::into_error)
        .map_err(io_error)?;
    temp_file.as_file().sync_all().map_err(io_error)?;
    temp_file
        .persist(path)
        .map_err(|error| io_error(error.error))?;

    debug!(path = %path.display(), triples = graph.len(), "Graph written");
    Ok(())
}

/// Parses the Turtle file at `path` into a graph.
pub fn read_graph_file(path: &Path) -> Result<Graph, GraphFileError> {
    let file = open_graph_file(path)?;
    let mut graph = Graph::new();
    for quad in RdfParser::from_format(RdfFormat::Turtle).for_reader(BufReader::new(file)) {
        let quad = quad.map_err(|error| GraphFileError::Malformed {
            path: path.to_path_buf(),
            error,
        })?;
        graph.insert(TripleRef::new(&quad.subject, &quad.predicate, &quad.object));
    }
    Ok(graph)
}

/// Loads the Turtle file at `path` into a new in-memory store.
pub fn load_store(path: &Path) -> Result<Store, GraphFileError> {
    let file = open_graph_file(path)?;
    let store = Store::new()?;
    store
        .load_from_reader(RdfFormat::Turtle, BufReader::new(file))
        .map_err(|error| GraphFileError::from_loader(path.to_path_buf(), error))?;
    debug!(path = %path.display(), "Graph loaded");
    Ok(store)
}

/// Copies `graph` into the default graph of a new in-memory store.
pub fn store_from_graph(graph: &Graph) -> Result<Store, GraphFileError> {
    let store = Store::new()?;
    for triple in graph {
        store.insert(triple.in_graph(GraphNameRef::DefaultGraph))?;
    }
    Ok(store)
}

fn open_graph_file(path: &Path) -> Result<File, GraphFileError> {
    File::open(path).map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            GraphFileError::Missing(PathBuf::from(path))
        } else {
            GraphFileError::Io {
                path: path.to_path_buf(),
                error,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RecipeGraphBuilder;
    use crate::record::MealRecord;
    use crate::schema::schema_graph;

    #[test]
    fn turtle_uses_recipe_prefixes() {
        let turtle = String::from_utf8(write_turtle(&schema_graph().unwrap(), Vec::new()).unwrap())
            .unwrap();
        assert!(turtle.contains("@prefix recipe: <http://example.org/recipe/>"));
        assert!(turtle.contains("recipe:Meal"));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ttl");

        let error = load_store(&path).err().unwrap();
        assert!(matches!(error, GraphFileError::Missing(ref missing) if missing == &path));
        assert!(error.to_string().contains("missing.ttl"));
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttl");
        std::fs::write(&path, "<http://example.org/s> <http://example.org/p> .").unwrap();

        assert!(matches!(
            load_store(&path),
            Err(GraphFileError::Malformed { .. })
        ));
        assert!(matches!(
            read_graph_file(&path),
            Err(GraphFileError::Malformed { .. })
        ));
    }

    #[test]
    fn written_file_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.ttl");
        std::fs::write(&path, "stale content").unwrap();

        let schema = schema_graph().unwrap();
        write_graph_file(&schema, &path).unwrap();
        write_graph_file(&schema, &path).unwrap();

        assert_eq!(read_graph_file(&path).unwrap(), schema);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn instance_data_survives_a_file_round_trip() {
        let mut builder = RecipeGraphBuilder::with_schema().unwrap();
        let mut dessert = MealRecord::new("52893", "Crème brûlée.", "Dessert", "French")
            .with_ingredient("Crème fraîche", Some("300 ml"))
            .with_ingredient("Salt & Pepper", None)
            .with_ingredient("Mixed Spice.", Some("½ tsp"))
            .with_ingredient("100% Cocoa", Some("\"a pinch\""));
        dessert.tags = vec!["Sweet".to_owned(), "Baking.".to_owned()];
        dessert.instructions = Some("Whisk.\nBake at 150°C;\tchill.".to_owned());
        builder.add_meal(&dessert);
        builder.add_meal(
            &MealRecord::new("52982", "Spaghetti Carbonara", "Pasta", "Italian")
                .with_ingredient("Egg Yolks", Some("6"))
                .with_ingredient("Salt & Pepper", Some("to taste")),
        );
        let graph = builder.into_graph();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.ttl");
        write_graph_file(&graph, &path).unwrap();

        assert_eq!(read_graph_file(&path).unwrap(), graph);
        assert_eq!(load_store(&path).unwrap().len().unwrap(), graph.len());
    }
}
