use crate::permissions::Connectivity;

use super::{HighlightState, RenderGraph};

/// Projects the connectivity record onto render indices.
pub(super) fn build_highlight_state(
    cache: &RenderGraph,
    connectivity: &Connectivity,
) -> HighlightState {
    HighlightState {
        nodes: cache
            .nodes
            .iter()
            .map(|node| connectivity.node_emphasis(&node.id))
            .collect(),
        edges: cache
            .edges
            .iter()
            .map(|edge| connectivity.edge_emphasis(edge.visible_position))
            .collect(),
    }
}
