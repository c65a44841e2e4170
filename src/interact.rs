use eframe::egui::Pos2;

use crate::data::{EntityCollections, Event, Note, Task};
use crate::graph::{GraphNode, SourceRef};

/// Extra pixel margin on top of a node's radius for forgiving pointer hits.
pub const HIT_SLOP: f32 = 4.0;

/// Finds the nearest visible node whose center lies within `radius + slop`
/// of the canvas-local pointer position.
pub fn hit_test(
    nodes: &[GraphNode],
    visible: &[bool],
    pointer: Pos2,
    slop: f32,
) -> Option<usize> {
    nodes
        .iter()
        .enumerate()
        .filter(|(index, _)| visible.get(*index).copied().unwrap_or(false))
        .filter_map(|(index, node)| {
            let distance = node.position.distance(pointer);
            (distance <= node.radius + slop).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// Borrowed view of a selected node's source entity. Built on demand from
/// the live collections; selection never owns or mutates anything.
#[derive(Clone, Copy, Debug)]
pub enum NodeDetails<'a> {
    Note(&'a Note),
    Task(&'a Task),
    Event(&'a Event),
    Tag { name: &'a str, note_count: usize },
}

pub fn details_for<'a>(
    node: &'a GraphNode,
    collections: &'a EntityCollections,
) -> Option<NodeDetails<'a>> {
    match &node.source {
        SourceRef::Note(id) => collections.note(*id).map(NodeDetails::Note),
        SourceRef::Task(id) => collections.task(*id).map(NodeDetails::Task),
        SourceRef::Event(id) => collections.event(*id).map(NodeDetails::Event),
        SourceRef::Tag(name) => {
            let note_count = collections
                .notes
                .iter()
                .filter(|note| note.tags.iter().any(|tag| tag == name))
                .count();
            Some(NodeDetails::Tag { name, note_count })
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Color32, pos2, vec2};

    use crate::data::{EntityCollections, Note};
    use crate::graph::{GraphNode, NodeKind, SourceRef};

    use super::{HIT_SLOP, NodeDetails, details_for, hit_test};

    fn node(id: &str, x: f32, y: f32, radius: f32) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            kind: NodeKind::Note,
            position: pos2(x, y),
            velocity: vec2(0.0, 0.0),
            radius,
            color: Color32::WHITE,
            source: SourceRef::Note(1),
            created_at: None,
        }
    }

    #[test]
    fn pointer_at_center_selects_the_node() {
        let nodes = vec![node("a", 100.0, 100.0, 10.0), node("b", 200.0, 200.0, 10.0)];
        let visible = vec![true, true];

        assert_eq!(
            hit_test(&nodes, &visible, pos2(100.0, 100.0), HIT_SLOP),
            Some(0)
        );
    }

    #[test]
    fn pointer_beyond_every_slop_selects_nothing() {
        let nodes = vec![node("a", 100.0, 100.0, 10.0)];
        let visible = vec![true];

        assert_eq!(hit_test(&nodes, &visible, pos2(130.0, 100.0), HIT_SLOP), None);
    }

    #[test]
    fn the_nearest_qualifying_node_wins() {
        let nodes = vec![node("a", 100.0, 100.0, 12.0), node("b", 110.0, 100.0, 12.0)];
        let visible = vec![true, true];

        assert_eq!(
            hit_test(&nodes, &visible, pos2(108.0, 100.0), HIT_SLOP),
            Some(1)
        );
    }

    #[test]
    fn slop_extends_the_hit_area() {
        let nodes = vec![node("a", 100.0, 100.0, 10.0)];
        let visible = vec![true];

        assert_eq!(
            hit_test(&nodes, &visible, pos2(113.0, 100.0), HIT_SLOP),
            Some(0)
        );
        assert_eq!(hit_test(&nodes, &visible, pos2(113.0, 100.0), 0.0), None);
    }

    #[test]
    fn filtered_out_nodes_are_not_hit() {
        let nodes = vec![node("a", 100.0, 100.0, 10.0)];
        let visible = vec![false];

        assert_eq!(hit_test(&nodes, &visible, pos2(100.0, 100.0), HIT_SLOP), None);
    }

    #[test]
    fn details_resolve_through_the_weak_reference() {
        let collections = EntityCollections {
            notes: vec![Note {
                id: 1,
                title: "groceries".to_string(),
                content: "milk, eggs".to_string(),
                tags: vec!["errands".to_string()],
                created_at: None,
            }],
            ..Default::default()
        };
        let graph_node = node("note-1", 0.0, 0.0, 8.0);

        match details_for(&graph_node, &collections) {
            Some(NodeDetails::Note(note)) => assert_eq!(note.title, "groceries"),
            other => panic!("expected note details, got {other:?}"),
        }
    }

    #[test]
    fn details_for_a_deleted_entity_resolve_to_none() {
        let collections = EntityCollections::default();
        let graph_node = node("note-1", 0.0, 0.0, 8.0);
        assert!(details_for(&graph_node, &collections).is_none());
    }
}
