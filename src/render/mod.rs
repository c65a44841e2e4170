mod surface;

pub use surface::{DrawOp, PainterSurface, RecordingSurface, Surface};

use std::collections::HashSet;

use eframe::egui::{Align2, Color32, Vec2, vec2};

use crate::graph::KnowledgeGraph;
use crate::util::truncate_label;

pub const LABEL_MIN_RADIUS: f32 = 8.0;
pub const LABEL_MAX_CHARS: usize = 18;

const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
const EDGE_COLOR: Color32 = Color32::from_rgb(72, 72, 72);
const EDGE_WIDTH: f32 = 1.0;
const LABEL_COLOR: Color32 = Color32::from_gray(238);
const LABEL_SIZE: f32 = 12.0;
const PLACEHOLDER_SIZE: f32 = 14.0;
const SELECTION_RING: Color32 = Color32::from_rgb(245, 206, 93);
const PLACEHOLDER: &str = "Nothing to show for the current filters";

/// Draws the filtered view: edges first, then nodes, then labels. Pure over
/// its inputs; nothing but the surface is mutated.
pub fn draw_graph(
    surface: &mut dyn Surface,
    graph: &KnowledgeGraph,
    visible: &[bool],
    canvas: Vec2,
    selected: Option<usize>,
    search_matches: Option<&HashSet<usize>>,
) {
    surface.clear(BACKGROUND);

    let shown = visible.iter().filter(|included| **included).count();
    if shown == 0 {
        surface.draw_text(
            (canvas * 0.5).to_pos2(),
            Align2::CENTER_CENTER,
            PLACEHOLDER,
            PLACEHOLDER_SIZE,
            LABEL_COLOR,
        );
        return;
    }

    let is_visible = |index: usize| visible.get(index).copied().unwrap_or(false);

    for edge in &graph.edges {
        let (Some(&source), Some(&target)) = (
            graph.index_by_id.get(&edge.source_id),
            graph.index_by_id.get(&edge.target_id),
        ) else {
            continue;
        };
        if !is_visible(source) || !is_visible(target) {
            continue;
        }

        surface.draw_line(
            graph.nodes[source].position,
            graph.nodes[target].position,
            EDGE_WIDTH,
            EDGE_COLOR,
        );
    }

    for (index, node) in graph.nodes.iter().enumerate() {
        if !is_visible(index) {
            continue;
        }

        let is_selected = selected == Some(index);
        let is_match = search_matches.is_some_and(|matches| matches.contains(&index));
        let dimmed = search_matches.is_some_and(|matches| !matches.contains(&index));

        if is_selected {
            surface.fill_circle(node.position, node.radius + 3.0, SELECTION_RING);
        }

        let color = if dimmed {
            dim_color(node.color, 0.35)
        } else {
            node.color
        };
        surface.fill_circle(node.position, node.radius, color);

        let labelled = node.radius >= LABEL_MIN_RADIUS || is_selected || is_match;
        if labelled && !node.label.is_empty() {
            surface.draw_text(
                node.position + vec2(node.radius + 5.0, 0.0),
                Align2::LEFT_CENTER,
                &truncate_label(&node.label, LABEL_MAX_CHARS),
                LABEL_SIZE,
                LABEL_COLOR,
            );
        }
    }
}

fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        color.a(),
    )
}
