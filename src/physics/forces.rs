use eframe::egui::{Vec2, vec2};

use crate::graph::KnowledgeGraph;

use super::LayoutParams;

/// Repulsion distances are floored here so coincident nodes get a strong but
/// finite push instead of a division blow-up.
const MIN_DISTANCE: f32 = 1.0;

/// Advances the layout by exactly one discrete step. Edges are read-only;
/// only node positions and velocities change.
pub fn step_layout(graph: &mut KnowledgeGraph, params: &LayoutParams, canvas: Vec2) {
    let node_count = graph.nodes.len();
    if node_count == 0 {
        return;
    }

    let mut forces = vec![Vec2::ZERO; node_count];

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = graph.nodes[i].position - graph.nodes[j].position;
            let distance = delta.length();
            let direction = if distance > f32::EPSILON {
                delta / distance
            } else {
                separation_direction(i, j)
            };

            let floored = distance.max(MIN_DISTANCE);
            let push = direction * (params.repulsion / (floored * floored));
            forces[i] += push;
            forces[j] -= push;
        }
    }

    // Pull along edges grows with distance but stays weak relative to
    // repulsion, so connected clusters tighten without collapsing.
    for edge in &graph.edges {
        let (Some(&source), Some(&target)) = (
            graph.index_by_id.get(&edge.source_id),
            graph.index_by_id.get(&edge.target_id),
        ) else {
            continue;
        };
        if source == target {
            continue;
        }

        let delta = graph.nodes[target].position - graph.nodes[source].position;
        let pull = delta * (edge.weight * params.attraction);
        forces[source] += pull;
        forces[target] -= pull;
    }

    let center = (canvas * 0.5).to_pos2();
    for (index, force) in forces.iter_mut().enumerate() {
        *force += (center - graph.nodes[index].position) * params.centering;
    }

    for (node, force) in graph.nodes.iter_mut().zip(forces) {
        node.velocity = (node.velocity + force) * params.damping;
        node.position += node.velocity;
        node.position.x = node
            .position
            .x
            .clamp(node.radius, (canvas.x - node.radius).max(node.radius));
        node.position.y = node
            .position
            .y
            .clamp(node.radius, (canvas.y - node.radius).max(node.radius));
    }
}

fn separation_direction(i: usize, j: usize) -> Vec2 {
    let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}
