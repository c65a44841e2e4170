use eframe::egui::Context;

use crate::physics::{TickHandle, TickScheduler};

/// Cooperative scheduler over egui's repaint request. Scheduling a tick asks
/// for one more frame; the handle that arrives with that frame is consumed
/// through [`RepaintScheduler::due_tick`]. Cancelling drops the pending
/// handle, so a repaint that was already queued fires as a plain frame with
/// no simulation step attached.
pub struct RepaintScheduler {
    ctx: Context,
    next_id: u64,
    pending: Option<TickHandle>,
}

impl RepaintScheduler {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            next_id: 0,
            pending: None,
        }
    }

    /// The handle whose frame is being drawn right now, if any.
    pub fn due_tick(&mut self) -> Option<TickHandle> {
        self.pending.take()
    }
}

impl TickScheduler for RepaintScheduler {
    fn schedule_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.pending = Some(handle);
        self.ctx.request_repaint();
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
