use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::graph::{Edge, Graph, Node, NodeKind};

/// Node-kind predicate behind the view selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    #[default]
    All,
    Users,
    Roles,
    /// Tables and the databases that stand in for them.
    Tables,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 4] = [Self::All, Self::Users, Self::Roles, Self::Tables];

    pub fn admits(self, kind: NodeKind) -> bool {
        match self {
            Self::All => true,
            Self::Users => kind == NodeKind::User,
            Self::Roles => kind == NodeKind::Role,
            Self::Tables => matches!(kind, NodeKind::Table | NodeKind::Database),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Users => "users",
            Self::Roles => "roles",
            Self::Tables => "tables",
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown view filter {value:?}"))
    }
}

/// Projection of a [`Graph`] that survived a type filter and search term.
///
/// Holds indices into the shared graph; every listed edge has both endpoints
/// among the listed nodes.
#[derive(Clone, Debug)]
pub struct VisibleSubgraph {
    graph: Arc<Graph>,
    node_indices: Vec<usize>,
    edge_indices: Vec<usize>,
    position_by_id: HashMap<String, usize>,
}

impl VisibleSubgraph {
    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.node_indices
            .iter()
            .map(|&index| &self.graph.nodes()[index])
    }

    /// Visible edges in graph order; positions in this sequence are the edge
    /// keys used by the connectivity classification.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edge_indices
            .iter()
            .map(|&index| &self.graph.edges()[index])
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.position_by_id
            .get(id)
            .map(|&position| &self.graph.nodes()[self.node_indices[position]])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position_by_id.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.node_indices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_indices.is_empty()
    }
}

/// Case-insensitive substring match; an empty term matches everything.
///
/// Whitespace is part of the term since quoted identifiers may contain spaces.
pub fn name_matches(name: &str, search: &str) -> bool {
    search.is_empty() || name.to_lowercase().contains(&search.to_lowercase())
}

/// Recomputes the visible subgraph from scratch.
pub fn filter_graph(graph: &Arc<Graph>, type_filter: TypeFilter, search: &str) -> VisibleSubgraph {
    let mut node_indices = Vec::new();
    let mut position_by_id = HashMap::new();

    for (index, node) in graph.nodes().iter().enumerate() {
        if type_filter.admits(node.kind) && name_matches(&node.name, search) {
            position_by_id.insert(node.id.clone(), node_indices.len());
            node_indices.push(index);
        }
    }

    let edge_indices = graph
        .edges()
        .iter()
        .enumerate()
        .filter(|(_, edge)| {
            position_by_id.contains_key(&edge.source) && position_by_id.contains_key(&edge.target)
        })
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    tracing::trace!(
        filter = %type_filter,
        search,
        nodes = node_indices.len(),
        edges = edge_indices.len(),
        "filtered graph"
    );

    VisibleSubgraph {
        graph: Arc::clone(graph),
        node_indices,
        edge_indices,
        position_by_id,
    }
}
