use std::collections::{BTreeMap, HashMap};

use eframe::egui::{Color32, Pos2, Vec2, pos2};
use rand::Rng;

use crate::data::{EntityCollections, Note, Task, TaskPriority};

use super::{EdgeKind, GraphEdge, GraphNode, KnowledgeGraph, NodeKind, SourceRef};

/// A tag becomes a node only when this many notes carry it.
pub const TAG_PROMOTION_MIN_NOTES: usize = 2;

const NOTE_COLOR: Color32 = Color32::from_rgb(96, 165, 250);
const EVENT_COLOR: Color32 = Color32::from_rgb(167, 139, 250);
const TAG_COLOR: Color32 = Color32::from_rgb(45, 212, 191);
const TASK_DONE_COLOR: Color32 = Color32::from_rgb(74, 222, 128);
const TASK_CANCELLED_COLOR: Color32 = Color32::from_rgb(120, 126, 134);

const EVENT_RADIUS: f32 = 8.0;

const DERIVED_WEIGHT: f32 = 1.0;
const SCHEDULED_WEIGHT: f32 = 1.0;
const TAGGED_WEIGHT: f32 = 0.6;

/// Builds a fresh node/edge set from the entity collections.
///
/// Node and edge identities are fully determined by the input; only the
/// spawn positions vary with the supplied rng. Edges whose endpoints do not
/// resolve to a built node are dropped.
pub fn build_graph(
    collections: &EntityCollections,
    canvas: Vec2,
    rng: &mut impl Rng,
) -> KnowledgeGraph {
    let mut nodes = Vec::with_capacity(collections.entity_count());
    let mut edges = Vec::new();

    for note in &collections.notes {
        let radius = note_radius(note);
        nodes.push(GraphNode {
            id: format!("note-{}", note.id),
            label: note.title.clone(),
            kind: NodeKind::Note,
            position: spawn_position(radius, canvas, rng),
            velocity: Vec2::ZERO,
            radius,
            color: NOTE_COLOR,
            source: SourceRef::Note(note.id),
            created_at: note.created_at,
        });
    }

    for task in &collections.tasks {
        let radius = task_radius(task.priority);
        nodes.push(GraphNode {
            id: format!("task-{}", task.id),
            label: task.title.clone(),
            kind: NodeKind::Task,
            position: spawn_position(radius, canvas, rng),
            velocity: Vec2::ZERO,
            radius,
            color: task_color(task),
            source: SourceRef::Task(task.id),
            created_at: task.created_at,
        });

        if let Some(note_id) = task.note_id {
            edges.push(GraphEdge {
                source_id: format!("task-{}", task.id),
                target_id: format!("note-{note_id}"),
                weight: DERIVED_WEIGHT,
                kind: EdgeKind::Derived,
            });
        }
    }

    for event in &collections.events {
        nodes.push(GraphNode {
            id: format!("event-{}", event.id),
            label: event.title.clone(),
            kind: NodeKind::Event,
            position: spawn_position(EVENT_RADIUS, canvas, rng),
            velocity: Vec2::ZERO,
            radius: EVENT_RADIUS,
            color: EVENT_COLOR,
            source: SourceRef::Event(event.id),
            created_at: event.created_at,
        });

        if let Some(task_id) = event.task_id {
            edges.push(GraphEdge {
                source_id: format!("event-{}", event.id),
                target_id: format!("task-{task_id}"),
                weight: SCHEDULED_WEIGHT,
                kind: EdgeKind::Scheduled,
            });
        }
    }

    // Ordered aggregation keeps promoted-tag identities stable across calls.
    let mut notes_by_tag: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
    for note in &collections.notes {
        for tag in &note.tags {
            let entry = notes_by_tag.entry(tag.as_str()).or_default();
            if !entry.contains(&note.id) {
                entry.push(note.id);
            }
        }
    }

    for (tag, note_ids) in &notes_by_tag {
        if note_ids.len() < TAG_PROMOTION_MIN_NOTES {
            continue;
        }

        let radius = tag_radius(note_ids.len());
        nodes.push(GraphNode {
            id: format!("tag-{tag}"),
            label: (*tag).to_string(),
            kind: NodeKind::Tag,
            position: spawn_position(radius, canvas, rng),
            velocity: Vec2::ZERO,
            radius,
            color: TAG_COLOR,
            source: SourceRef::Tag((*tag).to_string()),
            created_at: None,
        });

        for note_id in note_ids {
            edges.push(GraphEdge {
                source_id: format!("tag-{tag}"),
                target_id: format!("note-{note_id}"),
                weight: TAGGED_WEIGHT,
                kind: EdgeKind::Tagged,
            });
        }
    }

    let index_by_id: HashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id.clone(), index))
        .collect();

    // A task pointing at a deleted note (or an event at a deleted task) must
    // not survive as a dangling edge.
    edges.retain(|edge| {
        index_by_id.contains_key(&edge.source_id) && index_by_id.contains_key(&edge.target_id)
    });

    KnowledgeGraph {
        nodes,
        edges,
        index_by_id,
    }
}

fn spawn_position(radius: f32, canvas: Vec2, rng: &mut impl Rng) -> Pos2 {
    let max_x = (canvas.x - radius).max(radius + 1.0);
    let max_y = (canvas.y - radius).max(radius + 1.0);
    pos2(rng.gen_range(radius..max_x), rng.gen_range(radius..max_y))
}

fn note_radius(note: &Note) -> f32 {
    (8.0 + note.content.chars().count() as f32 / 80.0).min(18.0)
}

fn task_radius(priority: TaskPriority) -> f32 {
    match priority {
        TaskPriority::Low => 6.0,
        TaskPriority::Medium => 8.0,
        TaskPriority::High => 10.0,
        TaskPriority::Urgent => 12.0,
    }
}

fn tag_radius(note_count: usize) -> f32 {
    (5.0 + note_count as f32 * 1.5).min(14.0)
}

fn task_color(task: &Task) -> Color32 {
    use crate::data::TaskStatus;

    match task.status {
        TaskStatus::Completed => TASK_DONE_COLOR,
        TaskStatus::Cancelled => TASK_CANCELLED_COLOR,
        TaskStatus::Pending | TaskStatus::InProgress => match task.priority {
            TaskPriority::Low => Color32::from_rgb(148, 163, 184),
            TaskPriority::Medium => Color32::from_rgb(250, 204, 21),
            TaskPriority::High => Color32::from_rgb(251, 146, 60),
            TaskPriority::Urgent => Color32::from_rgb(248, 113, 113),
        },
    }
}
