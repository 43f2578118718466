use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, Vec2, vec2};

use crate::permissions::{EdgeEmphasis, NodeEmphasis, tooltip};

use super::super::highlight::build_highlight_state;
use super::super::physics::step_physics;
use super::super::render_utils::{
    FADED_OPACITY, HIGHLIGHTED_EDGE_WIDTH, NORMAL_EDGE_OPACITY, blend_color, draw_background,
    edge_color, edge_width, grayscale, node_color, with_opacity, world_to_screen,
};
use super::super::{PhysicsConfig, RenderGraph, ViewModel};

const SELECTED_RING: Color32 = Color32::from_rgb(245, 206, 93);

impl ViewModel {
    fn update_screen_space(rect: Rect, pan: Vec2, zoom: f32, cache: &mut RenderGraph) {
        let scratch = &mut cache.view_scratch;
        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        for node in &cache.nodes {
            scratch
                .screen_positions
                .push(world_to_screen(rect, pan, zoom, node.world_pos));
            scratch
                .screen_radii
                .push((node.base_radius * zoom.powf(0.5)).clamp(3.0, 40.0));
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let pan = self.pan;
        let zoom = self.zoom;
        let physics = PhysicsConfig {
            delta_seconds: ui
                .ctx()
                .input(|input| input.stable_dt)
                .clamp(1.0 / 240.0, 1.0 / 20.0),
            ..PhysicsConfig::default()
        };

        let Some(cache) = self.graph_cache.as_mut() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.locale.empty_view(),
                FontId::proportional(15.0),
                Color32::from_gray(180),
            );
            if response.clicked_by(egui::PointerButton::Primary) {
                self.set_selected(None);
            }
            return;
        };

        if self.live_physics && step_physics(cache, physics) {
            ui.ctx().request_repaint();
        }

        Self::update_screen_space(rect, pan, zoom, cache);
        let hovered = Self::hovered_index(
            ui,
            rect,
            &cache.view_scratch.screen_positions,
            &cache.view_scratch.screen_radii,
        );
        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        let highlight = build_highlight_state(cache, self.view.connectivity());
        let zoom_sqrt = zoom.sqrt();

        for (edge, emphasis) in cache.edges.iter().zip(&highlight.edges) {
            let start = cache.view_scratch.screen_positions[edge.source];
            let end = cache.view_scratch.screen_positions[edge.target];
            let (width, color) = match emphasis {
                EdgeEmphasis::Hidden => continue,
                EdgeEmphasis::Highlighted => (HIGHLIGHTED_EDGE_WIDTH, edge_color(edge.kind)),
                EdgeEmphasis::Normal => (
                    edge_width(edge.kind),
                    with_opacity(edge_color(edge.kind), NORMAL_EDGE_OPACITY),
                ),
            };
            painter.line_segment([start, end], Stroke::new(width * zoom_sqrt, color));
        }

        for (index, (node, emphasis)) in cache.nodes.iter().zip(&highlight.nodes).enumerate() {
            let position = cache.view_scratch.screen_positions[index];
            let radius = cache.view_scratch.screen_radii[index];
            let base = node_color(node.kind);

            let (fill, label_color) = match emphasis {
                NodeEmphasis::Faded => (
                    with_opacity(grayscale(base), FADED_OPACITY),
                    with_opacity(Color32::from_gray(230), FADED_OPACITY),
                ),
                _ if hovered == Some(index) => (
                    blend_color(base, Color32::WHITE, 0.25),
                    Color32::from_gray(250),
                ),
                _ => (base, Color32::from_gray(230)),
            };

            painter.circle_filled(position, radius, fill);
            match emphasis {
                NodeEmphasis::Selected => {
                    painter.circle_stroke(position, radius + 3.0, Stroke::new(2.5, SELECTED_RING));
                }
                NodeEmphasis::Faded => {}
                NodeEmphasis::Normal | NodeEmphasis::Connected => {
                    painter.circle_stroke(
                        position,
                        radius,
                        Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
                    );
                }
            }

            painter.text(
                position + vec2(0.0, radius + 4.0),
                Align2::CENTER_TOP,
                &node.label,
                FontId::proportional(11.0),
                label_color,
            );
        }

        if let Some(index) = hovered
            && let Some(node) = self.view.visible().node(&cache.nodes[index].id)
        {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                tooltip(node, self.locale).join("  |  "),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            let selected = hovered.map(|index| cache.nodes[index].id.clone());
            self.set_selected(selected);
        }
    }
}
