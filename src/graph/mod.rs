mod build;

pub use build::{TAG_PROMOTION_MIN_NOTES, build_graph};

use std::collections::HashMap;

use eframe::egui::{Color32, Pos2, Vec2};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Note,
    Task,
    Event,
    Tag,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Task => "task",
            Self::Event => "event",
            Self::Tag => "tag",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Derived,
    Scheduled,
    Tagged,
}

/// Weak back-reference from a graph node to the entity it was built from.
/// Detail lookups resolve it against the live collections; nothing is owned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceRef {
    Note(u64),
    Task(u64),
    Event(u64),
    Tag(String),
}

#[derive(Clone, Debug)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub position: Pos2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Color32,
    pub source: SourceRef,
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug)]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
    pub weight: f32,
    pub kind: EdgeKind,
}

#[derive(Clone, Debug, Default)]
pub struct KnowledgeGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub index_by_id: HashMap<String, usize>,
}

impl KnowledgeGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }
}
