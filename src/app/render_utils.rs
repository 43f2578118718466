use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::permissions::{EdgeKind, NodeKind};

/// Opacity of nodes outside the selected neighborhood.
pub(super) const FADED_OPACITY: f32 = 0.1;
/// Opacity of edges when nothing is selected.
pub(super) const NORMAL_EDGE_OPACITY: f32 = 0.6;
pub(super) const HIGHLIGHTED_EDGE_WIDTH: f32 = 5.0;

pub(super) fn node_radius(kind: NodeKind) -> f32 {
    match kind {
        NodeKind::User => 15.0,
        NodeKind::Role => 12.0,
        NodeKind::Database => 18.0,
        NodeKind::Table => 10.0,
    }
}

pub(super) fn node_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::User => Color32::from_rgb(76, 154, 255),
        NodeKind::Role => Color32::from_rgb(255, 159, 67),
        NodeKind::Database => Color32::from_rgb(46, 204, 113),
        NodeKind::Table => Color32::from_rgb(155, 89, 182),
    }
}

pub(super) fn edge_color(kind: EdgeKind) -> Color32 {
    match kind {
        EdgeKind::Membership => Color32::from_rgb(130, 170, 220),
        EdgeKind::Grant => Color32::from_rgb(231, 76, 60),
    }
}

pub(super) fn edge_width(kind: EdgeKind) -> f32 {
    match kind {
        EdgeKind::Membership => 2.0,
        EdgeKind::Grant => 3.0,
    }
}

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

pub(super) fn grayscale(color: Color32) -> Color32 {
    let luma =
        (color.r() as f32 * 0.299) + (color.g() as f32 * 0.587) + (color.b() as f32 * 0.114);
    Color32::from_rgba_unmultiplied(luma as u8, luma as u8, luma as u8, color.a())
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(21, 24, 31));

    let step = (64.0 * zoom.clamp(0.6, 1.8)).max(24.0);
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(62, 70, 84, 60));

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn databases_are_the_largest_nodes() {
        let database = node_radius(NodeKind::Database);
        for kind in [NodeKind::User, NodeKind::Role, NodeKind::Table] {
            assert!(node_radius(kind) < database);
        }
    }

    #[test]
    fn grant_edges_are_wider_than_memberships() {
        assert!(edge_width(EdgeKind::Grant) > edge_width(EdgeKind::Membership));
    }

    #[test]
    fn faded_colors_lose_hue_and_opacity() {
        let faded = with_opacity(grayscale(node_color(NodeKind::Role)), FADED_OPACITY);
        assert_eq!(faded.r(), faded.g());
        assert_eq!(faded.g(), faded.b());
        assert_eq!(faded.a(), 25);
    }

    #[test]
    fn screen_and_world_transforms_invert() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        let pan = vec2(12.0, -30.0);
        let world = vec2(45.0, 80.0);
        let screen = world_to_screen(rect, pan, 1.5, world);
        let back = screen_to_world(rect, pan, 1.5, screen);
        assert!((back - world).length() < 1e-3);
    }
}
