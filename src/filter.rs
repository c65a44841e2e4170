use time::{Duration, OffsetDateTime};

use crate::graph::{GraphNode, NodeKind};

/// The time-range sliders map onto this lookback window ending at "now".
pub const LOOKBACK_DAYS: i64 = 365;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(NodeKind),
}

impl KindFilter {
    pub fn matches(self, kind: NodeKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == kind,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(kind) => kind.label(),
        }
    }
}

/// Declarative view predicate. Filtering only affects what gets rendered and
/// hit-tested; filtered-out nodes keep receiving forces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphFilter {
    pub kind: KindFilter,
    /// Percent of the lookback window; 0 is a year ago, 100 is now.
    pub min_percent: f32,
    pub max_percent: f32,
}

impl Default for GraphFilter {
    fn default() -> Self {
        Self {
            kind: KindFilter::All,
            min_percent: 0.0,
            max_percent: 100.0,
        }
    }
}

impl GraphFilter {
    pub fn time_bounds(&self, now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
        let window = Duration::days(LOOKBACK_DAYS);
        let start = now - window;
        let low = start + window * (self.min_percent.clamp(0.0, 100.0) / 100.0);
        let high = start + window * (self.max_percent.clamp(0.0, 100.0) / 100.0);
        (low, high.max(low))
    }

    pub fn admits(&self, node: &GraphNode, now: OffsetDateTime) -> bool {
        if !self.kind.matches(node.kind) {
            return false;
        }

        // Nodes without a timestamp (tags, entities with unparseable dates)
        // are never excluded by the time predicate.
        let Some(created_at) = node.created_at else {
            return true;
        };

        let (low, high) = self.time_bounds(now);
        created_at >= low && created_at <= high
    }
}

pub fn visible_mask(nodes: &[GraphNode], filter: &GraphFilter, now: OffsetDateTime) -> Vec<bool> {
    nodes.iter().map(|node| filter.admits(node, now)).collect()
}
