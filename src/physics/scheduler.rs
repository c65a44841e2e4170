/// Identifies one scheduled tick so a cancelled or superseded callback can be
/// told apart from the live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Cooperative "schedule next tick / cancel pending tick" seam between the
/// simulation and whatever drives frames (egui repaints, a test harness).
pub trait TickScheduler {
    fn schedule_tick(&mut self) -> TickHandle;
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Frame-free scheduler for deterministic tests: ticks fire only when the
/// test says so.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<TickHandle>,
    cancelled: Vec<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest scheduled tick, simulating the callback firing.
    pub fn fire_next(&mut self) -> Option<TickHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn was_cancelled(&self, handle: TickHandle) -> bool {
        self.cancelled.contains(&handle)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.pending.retain(|pending| *pending != handle);
        self.cancelled.push(handle);
    }
}
