use eframe::egui::vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::macros::datetime;

use tangleview::data::EntityCollections;
use tangleview::filter::{GraphFilter, KindFilter, visible_mask};
use tangleview::graph::{EdgeKind, NodeKind, build_graph};
use tangleview::interact::{HIT_SLOP, hit_test};
use tangleview::physics::{LayoutParams, ManualScheduler, Simulation};
use tangleview::render::{DrawOp, RecordingSurface, draw_graph};

const SNAPSHOT: &str = r#"{
    "notes": [
        {"id": 1, "title": "trip planning", "content": "pack list and bookings", "tags": ["travel", "family"], "createdAt": "2026-07-20T09:00:00"},
        {"id": 2, "title": "itinerary", "content": "day by day", "tags": ["travel"], "createdAt": "2026-07-21T10:30:00"},
        {"id": 3, "title": "old journal", "content": "archive", "tags": ["journal"], "createdAt": "2024-01-01T08:00:00"}
    ],
    "tasks": [
        {"id": 10, "title": "book flights", "status": "completed", "priority": "high", "noteId": 1, "createdAt": "2026-07-22T12:00:00"},
        {"id": 11, "title": "renew passports", "status": "pending", "priority": "urgent", "noteId": 1, "createdAt": "2026-07-23T12:00:00"},
        {"id": 12, "title": "orphaned chore", "status": "pending", "priority": "low", "noteId": 99, "createdAt": "not a timestamp"}
    ],
    "events": [
        {"id": 20, "title": "departure", "taskId": 10, "createdAt": "2026-07-30T06:00:00"},
        {"id": 21, "title": "standalone", "createdAt": "2026-07-30T07:00:00"}
    ]
}"#;

const NOW: time::OffsetDateTime = datetime!(2026-08-01 00:00:00 UTC);
const CANVAS: eframe::egui::Vec2 = vec2(1024.0, 768.0);

fn snapshot() -> EntityCollections {
    serde_json::from_str(SNAPSHOT).expect("snapshot fixture should parse")
}

#[test]
fn snapshot_builds_the_expected_graph() {
    let collections = snapshot();
    let graph = build_graph(&collections, CANVAS, &mut StdRng::seed_from_u64(11));

    // 3 notes + 3 tasks + 2 events + "travel" (the only tag on >= 2 notes).
    assert_eq!(graph.node_count(), 9);
    assert!(graph.node_by_id("tag-travel").is_some());
    assert!(graph.node_by_id("tag-family").is_none());
    assert!(graph.node_by_id("tag-journal").is_none());

    // task 12 points at a deleted note; its derived edge must not survive.
    let derived = graph
        .edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Derived)
        .count();
    let scheduled = graph
        .edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Scheduled)
        .count();
    let tagged = graph
        .edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Tagged)
        .count();
    assert_eq!((derived, scheduled, tagged), (2, 1, 2));

    for edge in &graph.edges {
        assert!(graph.index_by_id.contains_key(&edge.source_id));
        assert!(graph.index_by_id.contains_key(&edge.target_id));
    }

    // The unparseable task timestamp degrades to "absent".
    assert_eq!(graph.node_by_id("task-12").unwrap().created_at, None);
}

#[test]
fn simulation_runs_cooperatively_and_stays_clamped() {
    let collections = snapshot();
    let graph = build_graph(&collections, CANVAS, &mut StdRng::seed_from_u64(12));

    let mut scheduler = ManualScheduler::new();
    let mut simulation = Simulation::new(graph);
    let params = LayoutParams::default();

    simulation.start(&mut scheduler);
    for _ in 0..50 {
        let handle = scheduler.fire_next().expect("a tick should be pending");
        simulation.on_tick(handle, &params, CANVAS, &mut scheduler);
    }
    assert_eq!(simulation.ticks(), 50);

    for node in &simulation.graph.nodes {
        assert!(node.position.x >= node.radius);
        assert!(node.position.x <= CANVAS.x - node.radius);
        assert!(node.position.y >= node.radius);
        assert!(node.position.y <= CANVAS.y - node.radius);
    }

    // Stopping cancels the pending tick; a late firing must be a no-op.
    let stale = scheduler.fire_next();
    simulation.stop(&mut scheduler);
    if let Some(handle) = stale {
        simulation.on_tick(handle, &params, CANVAS, &mut scheduler);
    }
    assert_eq!(simulation.ticks(), 50);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn filtering_drives_rendering_and_hit_testing() {
    let collections = snapshot();
    let graph = build_graph(&collections, CANVAS, &mut StdRng::seed_from_u64(13));

    // Notes only, full lookback: note 3 is older than the window.
    let note_filter = GraphFilter {
        kind: KindFilter::Only(NodeKind::Note),
        ..Default::default()
    };
    let visible = visible_mask(&graph.nodes, &note_filter, NOW);
    let shown: Vec<&str> = graph
        .nodes
        .iter()
        .zip(&visible)
        .filter(|(_, included)| **included)
        .map(|(node, _)| node.id.as_str())
        .collect();
    assert_eq!(shown, vec!["note-1", "note-2"]);

    // Every edge touches a filtered-out endpoint, so only circles render.
    let mut surface = RecordingSurface::new();
    draw_graph(&mut surface, &graph, &visible, CANVAS, None, None);
    assert_eq!(surface.lines().count(), 0);
    assert_eq!(surface.circles().count(), 2);

    // Tag nodes carry no timestamp, so a narrow recency window keeps them.
    let tag_filter = GraphFilter {
        kind: KindFilter::Only(NodeKind::Tag),
        min_percent: 99.0,
        max_percent: 100.0,
    };
    let tag_visible = visible_mask(&graph.nodes, &tag_filter, NOW);
    assert_eq!(tag_visible.iter().filter(|included| **included).count(), 1);

    // A range in the far past empties the view and renders the placeholder.
    let empty_filter = GraphFilter {
        kind: KindFilter::Only(NodeKind::Event),
        min_percent: 0.0,
        max_percent: 1.0,
    };
    let empty_visible = visible_mask(&graph.nodes, &empty_filter, NOW);
    let mut surface = RecordingSurface::new();
    draw_graph(&mut surface, &graph, &empty_visible, CANVAS, None, None);
    assert_eq!(surface.circles().count(), 0);
    assert_eq!(
        surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .count(),
        1
    );

    // Hit-testing reads the same visibility the renderer used.
    let note_position = graph.node_by_id("note-1").unwrap().position;
    let hit = hit_test(&graph.nodes, &visible, note_position, HIT_SLOP);
    assert_eq!(hit.map(|index| graph.nodes[index].id.as_str()), Some("note-1"));

    let tag_position = graph.node_by_id("tag-travel").unwrap().position;
    let tag_hit = hit_test(&graph.nodes, &empty_visible, tag_position, HIT_SLOP);
    assert_eq!(tag_hit, None);
}
