use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::permissions::{Node, VisibleSubgraph};
use crate::util::{short_label, stable_pair};

use super::super::render_utils::node_radius;
use super::super::{PhysicsScratch, RenderEdge, RenderGraph, RenderNode, ViewModel, ViewScratch};

const INITIAL_SPREAD: f32 = 260.0;

fn make_render_node(node: &Node, index: usize) -> RenderNode {
    let (jx, jy) = stable_pair(&node.id);
    let mut offset = vec2(jx, jy);
    if offset.length_sq() <= 0.0001 {
        let angle = ((index as f32) * 0.618_034 + 0.11) * std::f32::consts::TAU;
        offset = vec2(angle.cos(), angle.sin()) * 0.5;
    }

    RenderNode {
        id: node.id.clone(),
        label: short_label(&node.name),
        kind: node.kind,
        world_pos: offset * INITIAL_SPREAD,
        velocity: Vec2::ZERO,
        base_radius: node_radius(node.kind),
    }
}

fn collect_edges(
    visible: &VisibleSubgraph,
    index_by_id: &HashMap<String, usize>,
) -> Vec<RenderEdge> {
    visible
        .edges()
        .enumerate()
        .filter_map(|(visible_position, edge)| {
            let source = *index_by_id.get(&edge.source)?;
            let target = *index_by_id.get(&edge.target)?;
            Some(RenderEdge {
                source,
                target,
                kind: edge.kind,
                visible_position,
            })
        })
        .collect()
}

impl ViewModel {
    /// Rebuilds the render graph from the visible subgraph. Nodes that were
    /// already on screen keep their position and velocity.
    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        self.graph_dirty = false;

        let visible = self.view.visible();
        if visible.is_empty() {
            self.graph_cache = None;
            return;
        }

        let mut prior_nodes = self
            .graph_cache
            .take()
            .map(|cache| {
                cache
                    .nodes
                    .into_iter()
                    .map(|node| (node.id.clone(), node))
                    .collect::<HashMap<_, _>>()
            })
            .unwrap_or_default();

        let mut nodes = Vec::with_capacity(visible.node_count());
        let mut index_by_id = HashMap::with_capacity(visible.node_count());
        for (index, node) in visible.nodes().enumerate() {
            let render_node = match prior_nodes.remove(&node.id) {
                Some(mut prior) => {
                    prior.label = short_label(&node.name);
                    prior.kind = node.kind;
                    prior.base_radius = node_radius(node.kind);
                    prior
                }
                None => make_render_node(node, index),
            };
            index_by_id.insert(node.id.clone(), index);
            nodes.push(render_node);
        }

        let edges = collect_edges(visible, &index_by_id);
        tracing::trace!(
            nodes = nodes.len(),
            edges = edges.len(),
            "rebuilt render graph"
        );

        self.graph_cache = Some(RenderGraph {
            nodes,
            edges,
            physics_scratch: PhysicsScratch { forces: Vec::new() },
            view_scratch: ViewScratch {
                screen_positions: Vec::new(),
                screen_radii: Vec::new(),
            },
        });
    }
}
