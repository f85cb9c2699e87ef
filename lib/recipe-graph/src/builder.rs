//! Maps meal records onto the recipe schema.

use crate::record::MealRecord;
use crate::schema::schema_graph;
use crate::vocab::{ns, recipe};
use oxigraph::io::RdfParseError;
use oxigraph::model::vocab::{rdf, rdfs, xsd};
use oxigraph::model::{Graph, Literal, LiteralRef, NamedNode, NamedNodeRef, TripleRef};
use std::collections::{HashMap, HashSet};

/// Whether [`RecipeGraphBuilder::add_meal`] created a new meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealInsertion {
    /// The meal was added to the graph.
    Added,
    /// A meal with the same identifier is already part of the graph. Nothing was changed.
    Duplicate,
}

/// Maps names to the node created for them within one namespace.
///
/// Names that differ but escape to the same IRI (e.g. `"Olive Oil"` and `"Olive_Oil"`) receive a
/// numeric suffix so that no two names ever share a node.
#[derive(Debug)]
struct Interner {
    namespace: &'static str,
    nodes: HashMap<String, NamedNode>,
    issued: HashSet<String>,
}

impl Interner {
    fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            nodes: HashMap::new(),
            issued: HashSet::new(),
        }
    }

    fn intern(&mut self, name: &str) -> NamedNode {
        if let Some(node) = self.nodes.get(name) {
            return node.clone();
        }

        let local_name = local_name(name);
        let mut iri = format!("{}{local_name}", self.namespace);
        let mut suffix = 1;
        while self.issued.contains(&iri) {
            suffix += 1;
            iri = format!("{}{local_name}_{suffix}", self.namespace);
        }

        self.issued.insert(iri.clone());
        let node = NamedNode::new_unchecked(iri);
        self.nodes.insert(name.to_owned(), node.clone());
        node
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Builds a recipe graph from meal records.
///
/// Meals are keyed by their API identifier. Categories, cuisines and ingredients are keyed by
/// name and reused across meals. The interning tables only live as long as the builder.
#[derive(Debug)]
pub struct RecipeGraphBuilder {
    graph: Graph,
    meals: HashSet<String>,
    categories: Interner,
    cuisines: Interner,
    ingredients: Interner,
}

impl Default for RecipeGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeGraphBuilder {
    /// Creates a builder with an empty graph.
    pub fn new() -> Self {
        Self::from_graph(Graph::new())
    }

    /// Creates a builder whose graph already contains the schema triples.
    pub fn with_schema() -> Result<Self, RdfParseError> {
        Ok(Self::from_graph(schema_graph()?))
    }

    fn from_graph(graph: Graph) -> Self {
        Self {
            graph,
            meals: HashSet::new(),
            categories: Interner::new(ns::CATEGORY),
            cuisines: Interner::new(ns::CUISINE),
            ingredients: Interner::new(ns::INGREDIENT),
        }
    }

    /// Adds `record` and the nodes it refers to.
    pub fn add_meal(&mut self, record: &MealRecord) -> MealInsertion {
        if self.meals.contains(&record.id) {
            return MealInsertion::Duplicate;
        }

        let meal_name = local_name(&record.id);
        let meal = node(ns::MEAL, &meal_name);
        let category = self.categories.intern(&record.category);
        let cuisine = self.cuisines.intern(&record.cuisine);
        let ingredients = record
            .ingredients
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let position = index + 1;
                let line = node(ns::MEAL, &format!("{meal_name}/ingredient/{position}"));
                (position, line, self.ingredients.intern(&entry.name), entry)
            })
            .collect::<Vec<_>>();

        let graph = &mut self.graph;
        graph.insert(TripleRef::new(&meal, rdf::TYPE, recipe::MEAL));
        graph.insert(TripleRef::new(
            &meal,
            recipe::HAS_NAME,
            LiteralRef::new_simple_literal(&record.name),
        ));
        let optional_attributes = [
            (recipe::HAS_INSTRUCTIONS, &record.instructions),
            (recipe::HAS_THUMBNAIL, &record.thumbnail),
            (recipe::HAS_YOUTUBE_LINK, &record.youtube),
            (recipe::HAS_SOURCE, &record.source),
        ];
        for (predicate, value) in optional_attributes {
            if let Some(value) = value {
                graph.insert(TripleRef::new(
                    &meal,
                    predicate,
                    LiteralRef::new_simple_literal(value),
                ));
            }
        }
        for tag in &record.tags {
            graph.insert(TripleRef::new(
                &meal,
                recipe::HAS_TAG,
                LiteralRef::new_simple_literal(tag),
            ));
        }

        // Labelled nodes are re-asserted on every use; inserting an existing triple is a no-op.
        insert_labelled(graph, &category, recipe::CATEGORY, &record.category);
        graph.insert(TripleRef::new(&meal, recipe::BELONGS_TO_CATEGORY, &category));
        insert_labelled(graph, &cuisine, recipe::CUISINE, &record.cuisine);
        graph.insert(TripleRef::new(&meal, recipe::BELONGS_TO_CUISINE, &cuisine));

        for (position, line, ingredient, entry) in &ingredients {
            insert_labelled(graph, ingredient, recipe::INGREDIENT, &entry.name);
            graph.insert(TripleRef::new(
                ingredient,
                recipe::INGREDIENT_NAME,
                LiteralRef::new_simple_literal(&entry.name),
            ));
            graph.insert(TripleRef::new(&meal, recipe::HAS_INGREDIENT, ingredient));

            graph.insert(TripleRef::new(line, rdf::TYPE, recipe::INGREDIENT_LINE));
            graph.insert(TripleRef::new(&meal, recipe::HAS_INGREDIENT_LINE, line));
            graph.insert(TripleRef::new(line, recipe::REFERS_TO_INGREDIENT, ingredient));
            graph.insert(TripleRef::new(
                line,
                recipe::POSITION,
                &Literal::new_typed_literal(position.to_string(), xsd::INTEGER),
            ));
            if let Some(measure) = &entry.measure {
                graph.insert(TripleRef::new(
                    line,
                    recipe::INGREDIENT_MEASURE,
                    LiteralRef::new_simple_literal(measure),
                ));
            }
        }

        self.meals.insert(record.id.clone());
        MealInsertion::Added
    }

    /// Number of distinct meals.
    pub fn meal_count(&self) -> usize {
        self.meals.len()
    }

    /// Number of distinct categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of distinct cuisines.
    pub fn cuisine_count(&self) -> usize {
        self.cuisines.len()
    }

    /// Number of distinct ingredients.
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// The graph built so far.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the builder and returns the graph. The interning tables are dropped.
    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

fn insert_labelled(graph: &mut Graph, node: &NamedNode, class: NamedNodeRef<'_>, label: &str) {
    graph.insert(TripleRef::new(node, rdf::TYPE, class));
    graph.insert(TripleRef::new(
        node,
        rdfs::LABEL,
        LiteralRef::new_simple_literal(label),
    ));
}

/// `local_name` must come from [`local_name`]: percent-encoding leaves only unreserved
/// characters, which are valid in any IRI path.
fn node(namespace: &str, local_name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{namespace}{local_name}"))
}

/// Spaces become underscores, everything else outside of the unreserved set is percent-encoded.
fn local_name(name: &str) -> String {
    urlencoding::encode(&name.trim().replace(' ', "_")).into_owned()
}
