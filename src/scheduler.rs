/*
 * Scheduler Module
 *
 * Frame scheduling tied to the host's display refresh. The render loop asks
 * for "the next refresh" and gets a handle back; the host later delivers that
 * handle when the refresh happens, or the loop cancels it.
 */

// Identifies one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    // Ask for a callback on the next display refresh
    fn request_frame(&mut self) -> FrameHandle;

    // Drop a previously requested frame; unknown or stale handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by the host's refresh callback.
///
/// At most one frame is due at a time. The host calls [`RefreshScheduler::poll`]
/// once per display refresh (nannou's `update`) and runs whatever comes back.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    next_id: u64,
    due: Option<FrameHandle>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    // Take the frame due on this refresh, if any
    pub fn poll(&mut self) -> Option<FrameHandle> {
        self.due.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.due
    }
}

impl FrameScheduler for RefreshScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.due = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.due == Some(handle) {
            self.due = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_drains_the_due_frame() {
        let mut scheduler = RefreshScheduler::new();
        let handle = scheduler.request_frame();
        assert_eq!(scheduler.poll(), Some(handle));
        assert_eq!(scheduler.poll(), None);
    }

    #[test]
    fn handles_are_unique() {
        let mut scheduler = RefreshScheduler::new();
        let first = scheduler.request_frame();
        let second = scheduler.request_frame();
        assert_ne!(first, second);
    }

    #[test]
    fn cancelling_a_stale_handle_keeps_the_current_one() {
        let mut scheduler = RefreshScheduler::new();
        let stale = scheduler.request_frame();
        scheduler.cancel_frame(stale);
        let current = scheduler.request_frame();
        scheduler.cancel_frame(stale);
        assert_eq!(scheduler.pending(), Some(current));
    }
}
