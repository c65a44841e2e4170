mod forces;
mod scheduler;

pub use forces::step_layout;
pub use scheduler::{ManualScheduler, TickHandle, TickScheduler};

use eframe::egui::Vec2;

use crate::graph::KnowledgeGraph;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub repulsion: f32,
    pub attraction: f32,
    pub centering: f32,
    pub damping: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            repulsion: 6000.0,
            attraction: 0.01,
            centering: 0.005,
            damping: 0.9,
        }
    }
}

/// Live layout state: the node array plus the running flag and tick counter.
///
/// The simulation owns the nodes exclusively while a tick runs; renderer and
/// hit-testing read the same state between ticks. Each tick voluntarily
/// reschedules the next one through the [`TickScheduler`], and stopping
/// cancels the pending handle so an already-scheduled callback never fires.
#[derive(Debug, Default)]
pub struct Simulation {
    pub graph: KnowledgeGraph,
    running: bool,
    ticks: u64,
    pending: Option<TickHandle>,
}

impl Simulation {
    pub fn new(graph: KnowledgeGraph) -> Self {
        Self {
            graph,
            running: false,
            ticks: 0,
            pending: None,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Swaps in a freshly built graph, discarding in-flight layout state.
    /// Prior positions are not carried forward.
    pub fn replace_graph(&mut self, graph: KnowledgeGraph, scheduler: &mut dyn TickScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_tick(handle);
        }
        self.graph = graph;
        self.ticks = 0;
        if self.running {
            self.pending = Some(scheduler.schedule_tick());
        }
    }

    pub fn start(&mut self, scheduler: &mut dyn TickScheduler) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = Some(scheduler.schedule_tick());
    }

    /// Safe at any point, including before the first tick has fired.
    pub fn stop(&mut self, scheduler: &mut dyn TickScheduler) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_tick(handle);
        }
    }

    /// Entry point for a fired tick callback. Stale or cancelled handles are
    /// ignored, which makes stop-then-fire races harmless.
    pub fn on_tick(
        &mut self,
        handle: TickHandle,
        params: &LayoutParams,
        canvas: Vec2,
        scheduler: &mut dyn TickScheduler,
    ) {
        if !self.running || self.pending != Some(handle) {
            return;
        }
        self.pending = None;

        step_layout(&mut self.graph, params, canvas);
        self.ticks += 1;

        if self.running {
            self.pending = Some(scheduler.schedule_tick());
        }
    }
}
