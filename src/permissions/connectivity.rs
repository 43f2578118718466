use std::collections::HashSet;

use super::filter::VisibleSubgraph;
use super::graph::Edge;

/// How strongly a node is drawn relative to the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeEmphasis {
    /// No selection is active.
    Normal,
    Selected,
    Connected,
    Faded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEmphasis {
    Normal,
    Highlighted,
    Hidden,
}

/// One-hop classification of a visible subgraph around a selected node.
///
/// Edge flags are keyed by position in [`VisibleSubgraph::edges`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Connectivity {
    selected: Option<String>,
    connected_nodes: HashSet<String>,
    connected_edges: Vec<bool>,
}

impl Connectivity {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_cleared(&self) -> bool {
        self.selected.is_none()
    }

    pub fn node_is_connected(&self, id: &str) -> bool {
        self.selected.is_none() || self.connected_nodes.contains(id)
    }

    pub fn edge_is_connected(&self, position: usize) -> bool {
        self.selected.is_none() || self.connected_edges.get(position).copied().unwrap_or(false)
    }

    pub fn connected_node_count(&self) -> usize {
        self.connected_nodes.len()
    }

    pub fn node_emphasis(&self, id: &str) -> NodeEmphasis {
        match self.selected.as_deref() {
            None => NodeEmphasis::Normal,
            Some(selected) if selected == id => NodeEmphasis::Selected,
            Some(_) if self.connected_nodes.contains(id) => NodeEmphasis::Connected,
            Some(_) => NodeEmphasis::Faded,
        }
    }

    pub fn edge_emphasis(&self, position: usize) -> EdgeEmphasis {
        if self.selected.is_none() {
            EdgeEmphasis::Normal
        } else if self.edge_is_connected(position) {
            EdgeEmphasis::Highlighted
        } else {
            EdgeEmphasis::Hidden
        }
    }
}

/// Classifies every visible node and edge against `selection`.
///
/// A selection that is not part of `visible` yields the cleared state.
pub fn highlight_connected(visible: &VisibleSubgraph, selection: Option<&str>) -> Connectivity {
    let Some(selected) = selection.filter(|id| visible.contains(id)) else {
        return Connectivity::cleared();
    };

    let mut connected_nodes = HashSet::from([selected.to_owned()]);
    let connected_edges = visible
        .edges()
        .map(|edge| {
            let touches = edge.touches(selected);
            if touches {
                connected_nodes.insert(edge.source.clone());
                connected_nodes.insert(edge.target.clone());
            }
            touches
        })
        .collect();

    Connectivity {
        selected: Some(selected.to_owned()),
        connected_nodes,
        connected_edges,
    }
}

/// Visible edges touching `id`, in visible order.
pub fn connected_edges<'a>(visible: &'a VisibleSubgraph, id: &'a str) -> Vec<&'a Edge> {
    visible.edges().filter(|edge| edge.touches(id)).collect()
}
