use eframe::egui::{Vec2, vec2};

use super::{PhysicsConfig, RenderGraph};

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            link_distance: 100.0,
            charge: 300.0,
            collision_radius: 30.0,
            center_pull: 0.0012,
            velocity_damping: 0.86,
            delta_seconds: 1.0 / 60.0,
        }
    }
}

/// Advances the layout one frame. Returns whether anything is still moving.
pub(super) fn step_physics(cache: &mut RenderGraph, config: PhysicsConfig) -> bool {
    let node_count = cache.nodes.len();
    if node_count == 0 {
        return false;
    }

    let forces = &mut cache.physics_scratch.forces;
    forces.clear();
    forces.resize(node_count, Vec2::ZERO);

    let repulsion_strength = config.charge * 260.0;
    let spring_strength = 0.02;
    let spring_damping = 0.2;
    let softening = 400.0;
    let time_scale = (config.delta_seconds * 60.0).clamp(0.25, 3.0);

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = cache.nodes[i].world_pos - cache.nodes[j].world_pos;
            let distance_sq = delta.length_sq();
            let distance = distance_sq.sqrt();
            let direction = if distance > 0.0001 {
                delta / distance
            } else {
                let angle =
                    ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * std::f32::consts::TAU;
                vec2(angle.cos(), angle.sin())
            };

            let repulsion = repulsion_strength / (distance_sq + softening);
            forces[i] += direction * repulsion;
            forces[j] -= direction * repulsion;

            let min_distance = config.collision_radius * 2.0;
            if distance < min_distance {
                let overlap_push = (min_distance - distance) * 1.4;
                forces[i] += direction * overlap_push;
                forces[j] -= direction * overlap_push;
            }
        }
    }

    for edge in &cache.edges {
        let (from, to) = (edge.source, edge.target);
        if from >= node_count || to >= node_count || from == to {
            continue;
        }

        let delta = cache.nodes[from].world_pos - cache.nodes[to].world_pos;
        let distance = delta.length();
        if distance <= 0.0001 {
            continue;
        }
        let direction = delta / distance;

        let spring = (distance - config.link_distance) * spring_strength;
        let relative_velocity = cache.nodes[from].velocity - cache.nodes[to].velocity;
        let damping_force = relative_velocity.dot(direction) * spring_damping;
        let correction = direction * (spring + damping_force);

        forces[from] -= correction;
        forces[to] += correction;
    }

    for (force, node) in forces.iter_mut().zip(&cache.nodes) {
        *force -= node.world_pos * config.center_pull * 10.0;
    }

    let max_force = 200.0;
    let max_speed = 18.0;
    let mut moving = false;
    for (node, force) in cache.nodes.iter_mut().zip(forces.iter()) {
        let mut force = *force;
        let force_magnitude = force.length();
        if force_magnitude > max_force {
            force = force / force_magnitude * max_force;
        }

        let mut velocity = (node.velocity + force * 0.05 * time_scale) * config.velocity_damping;
        let speed = velocity.length();
        if speed > max_speed {
            velocity = velocity / speed * max_speed;
        }
        if speed < 0.02 && force_magnitude < 0.08 {
            velocity = Vec2::ZERO;
        }

        moving |= velocity != Vec2::ZERO;
        node.velocity = velocity;
        node.world_pos += velocity * time_scale;
    }

    moving
}
