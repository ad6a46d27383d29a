use cube_defence_core::Pose;
use cube_defence_rendering::{Color, Prototype, VisualHandle, Visuals};
use log::{debug, trace};

/// Scene stand-in that records visual lifecycles as log lines.
#[derive(Debug, Default)]
pub(crate) struct LogVisuals {
    next: u64,
    live: usize,
    spawned: usize,
}

impl LogVisuals {
    /// Visuals currently alive.
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Visuals spawned since startup.
    pub(crate) fn spawned(&self) -> usize {
        self.spawned
    }
}

impl Visuals for LogVisuals {
    fn spawn_visual(&mut self, prototype: &Prototype, name: &str) -> VisualHandle {
        let handle = VisualHandle::new(self.next);
        self.next += 1;
        self.live += 1;
        self.spawned += 1;
        trace!(
            "spawn {name} from {} x{} as #{}",
            prototype.model,
            prototype.scale,
            handle.get()
        );
        handle
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        self.live = self.live.saturating_sub(1);
        debug!("destroy visual #{}", handle.get());
    }

    fn set_pose(&mut self, handle: VisualHandle, pose: Pose) {
        trace!("move #{} to {}", handle.get(), pose.position);
    }

    fn set_tint(&mut self, _handle: VisualHandle, _color: Color) {}
}
