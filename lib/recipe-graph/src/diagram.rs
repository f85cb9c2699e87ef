//! Diagram export of a recipe graph.
//!
//! Only meals, categories, cuisines and ingredients become diagram nodes. Type and label
//! triples, literal values and ingredient lines are left out; names are used as node labels.

use crate::vocab::{ns, recipe};
use oxigraph::model::vocab::{rdf, rdfs};
use oxigraph::model::{Graph, NamedNodeRef, SubjectRef, TermRef};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Labels longer than this are cut.
const MAX_LABEL_CHARS: usize = 20;

/// The kind of a diagram node, derived from the namespace of its IRI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Meal,
    Category,
    Cuisine,
    Ingredient,
}

impl NodeKind {
    fn of(iri: &str) -> Option<Self> {
        if let Some(local_name) = iri.strip_prefix(ns::MEAL) {
            // Ingredient lines share the meal namespace.
            return (!local_name.contains('/')).then_some(Self::Meal);
        }
        [
            (ns::CATEGORY, Self::Category),
            (ns::CUISINE, Self::Cuisine),
            (ns::INGREDIENT, Self::Ingredient),
        ]
        .into_iter()
        .find_map(|(namespace, kind)| iri.starts_with(namespace).then_some(kind))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Meal => "meal",
            Self::Category => "category",
            Self::Cuisine => "cuisine",
            Self::Ingredient => "ingredient",
        }
    }

    fn dot_color(self) -> &'static str {
        match self {
            Self::Meal => "lightblue",
            Self::Category => "lightgreen",
            Self::Cuisine => "lightsalmon",
            Self::Ingredient => "khaki",
        }
    }
}

/// Output syntax of [`RecipeDiagram::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramFormat {
    /// Graphviz DOT.
    Dot,
    /// Mermaid flowchart.
    Mermaid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    pub iri: String,
    pub kind: NodeKind,
    pub label: String,
}

/// The entity-level view of a recipe graph.
#[derive(Debug)]
pub struct RecipeDiagram {
    graph: DiGraph<DiagramNode, &'static str>,
}

impl RecipeDiagram {
    /// Extracts the diagram of `graph`. Nodes and edges are ordered by IRI.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut nodes = BTreeMap::new();
        let mut edges = Vec::new();
        for triple in graph {
            let SubjectRef::NamedNode(subject) = triple.subject else {
                continue;
            };
            let Some(kind) = NodeKind::of(subject.as_str()) else {
                continue;
            };
            let node = nodes.entry(subject.as_str()).or_insert_with(|| DiagramNode {
                iri: subject.as_str().to_owned(),
                kind,
                label: local_label(subject),
            });

            match triple.object {
                TermRef::Literal(literal) => {
                    if is_name(triple.predicate) {
                        node.label = truncate(literal.value());
                    }
                }
                TermRef::NamedNode(object) if triple.predicate != rdf::TYPE => {
                    if NodeKind::of(object.as_str()).is_some() {
                        edges.push((subject, object, edge_label(triple.predicate)));
                    }
                }
                _ => {}
            }
        }
        // Objects that are never used as subjects still become nodes.
        for (_, object, _) in &edges {
            if let Some(kind) = NodeKind::of(object.as_str()) {
                nodes.entry(object.as_str()).or_insert_with(|| DiagramNode {
                    iri: object.as_str().to_owned(),
                    kind,
                    label: local_label(*object),
                });
            }
        }

        let mut diagram = DiGraph::with_capacity(nodes.len(), edges.len());
        let indices = nodes
            .into_iter()
            .map(|(iri, node)| (iri, diagram.add_node(node)))
            .collect::<BTreeMap<_, _>>();
        edges.sort_by(|a, b| (a.0.as_str(), a.1.as_str()).cmp(&(b.0.as_str(), b.1.as_str())));
        for (subject, object, label) in edges {
            if let (Some(&from), Some(&to)) =
                (indices.get(subject.as_str()), indices.get(object.as_str()))
            {
                diagram.add_edge(from, to, label);
            }
        }
        Self { graph: diagram }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of nodes of the given kind.
    pub fn count(&self, kind: NodeKind) -> usize {
        self.graph
            .node_weights()
            .filter(|node| node.kind == kind)
            .count()
    }

    /// Sorted labels of the nodes `iri` points to through an edge named `edge`.
    pub fn targets(&self, iri: &str, edge: &str) -> Vec<&str> {
        let Some(from) = self.graph.node_indices().find(|i| self.graph[*i].iri == iri) else {
            return Vec::new();
        };
        let mut labels = self
            .graph
            .edges(from)
            .filter(|e| *e.weight() == edge)
            .map(|e| self.graph[e.target()].label.as_str())
            .collect::<Vec<_>>();
        labels.sort_unstable();
        labels
    }

    /// Writes the diagram in `format`.
    pub fn write<W: Write>(&self, format: DiagramFormat, mut writer: W) -> io::Result<()> {
        let text = match format {
            DiagramFormat::Dot => self.to_dot(),
            DiagramFormat::Mermaid => self.to_mermaid(),
        };
        writer.write_all(text.as_bytes())
    }

    fn to_dot(&self) -> String {
        let mut output = String::from("digraph recipes {\n    node [style=filled];\n");
        for index in self.graph.node_indices() {
            let node = &self.graph[index];
            let _ = writeln!(
                output,
                "    n{} [label=\"{}\", fillcolor={}];",
                index.index(),
                escape_dot(&node.label),
                node.kind.dot_color()
            );
        }
        for edge in self.graph.edge_references() {
            let _ = writeln!(
                output,
                "    n{} -> n{} [label=\"{}\"];",
                edge.source().index(),
                edge.target().index(),
                edge.weight()
            );
        }
        output.push_str("}\n");
        output
    }

    fn to_mermaid(&self) -> String {
        let mut output = String::from("flowchart LR\n");
        for index in self.graph.node_indices() {
            let node = &self.graph[index];
            let _ = writeln!(
                output,
                "    {}[\"{}\"]:::{}",
                node_id(index),
                node.label.replace('"', "#quot;"),
                node.kind.name()
            );
        }
        for edge in self.graph.edge_references() {
            let _ = writeln!(
                output,
                "    {} -->|{}| {}",
                node_id(edge.source()),
                edge.weight(),
                node_id(edge.target())
            );
        }
        for kind in [
            NodeKind::Meal,
            NodeKind::Category,
            NodeKind::Cuisine,
            NodeKind::Ingredient,
        ] {
            let _ = writeln!(
                output,
                "    classDef {} fill:{}",
                kind.name(),
                kind.dot_color()
            );
        }
        output
    }
}

fn node_id(index: NodeIndex) -> String {
    format!("n{}", index.index())
}

fn is_name(predicate: NamedNodeRef<'_>) -> bool {
    predicate == recipe::HAS_NAME
        || predicate == rdfs::LABEL
        || predicate == recipe::INGREDIENT_NAME
}

fn edge_label(predicate: NamedNodeRef<'_>) -> &'static str {
    match predicate {
        p if p == recipe::BELONGS_TO_CATEGORY => "belongsToCategory",
        p if p == recipe::BELONGS_TO_CUISINE => "belongsToCuisine",
        p if p == recipe::HAS_INGREDIENT => "hasIngredient",
        _ => "relatedTo",
    }
}

fn local_label(node: NamedNodeRef<'_>) -> String {
    let iri = node.as_str();
    truncate(iri.rsplit('/').next().unwrap_or(iri))
}

fn truncate(label: &str) -> String {
    label.chars().take(MAX_LABEL_CHARS).collect()
}

fn escape_dot(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
