/*
 * Render Loop Module
 *
 * The two-state machine (Stopped, Running) that owns frame scheduling.
 * Exactly one frame is pending while running and none while stopped.
 * The engine wraps each frame's drawing between `begin_frame` and
 * `end_frame`.
 */

use crate::scheduler::{FrameHandle, FrameScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

pub struct RenderLoop<S: FrameScheduler> {
    state: LoopState,
    pending: Option<FrameHandle>,
    scheduler: S,
    frames: u64,
}

impl<S: FrameScheduler> RenderLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            state: LoopState::Stopped,
            pending: None,
            scheduler,
            frames: 0,
        }
    }

    // Stopped -> Running and schedule the first frame. No-op while running.
    pub fn start(&mut self) {
        if self.state == LoopState::Running {
            return;
        }
        self.state = LoopState::Running;
        self.pending = Some(self.scheduler.request_frame());
    }

    // Running -> Stopped and cancel the pending frame. Idempotent.
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
        // Clear the handle before cancelling so a late delivery finds nothing to run
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    // Accept a delivered frame. Only the pending handle of a running loop is accepted.
    pub fn begin_frame(&mut self, handle: FrameHandle) -> bool {
        if self.state != LoopState::Running || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        true
    }

    // Finish a frame and schedule the next one if still running
    pub fn end_frame(&mut self) {
        self.frames += 1;
        if self.state == LoopState::Running && self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    // Frames completed since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // Tracks outstanding requests the way a host refresh queue would
    #[derive(Default)]
    struct MockScheduler {
        next_id: u64,
        outstanding: HashSet<FrameHandle>,
        requests: usize,
        cancels: usize,
    }

    impl MockScheduler {
        fn fire(&mut self, handle: FrameHandle) -> bool {
            self.outstanding.remove(&handle)
        }
    }

    impl FrameScheduler for MockScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next_id += 1;
            self.requests += 1;
            let handle = FrameHandle(self.next_id);
            self.outstanding.insert(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancels += 1;
            self.outstanding.remove(&handle);
        }
    }

    #[test]
    fn starts_stopped_with_nothing_pending() {
        let render_loop = RenderLoop::new(MockScheduler::default());
        assert_eq!(render_loop.state(), LoopState::Stopped);
        assert_eq!(render_loop.pending(), None);
    }

    #[test]
    fn start_twice_schedules_once() {
        let mut render_loop = RenderLoop::new(MockScheduler::default());
        render_loop.start();
        render_loop.start();
        assert_eq!(render_loop.scheduler().requests, 1);
        assert_eq!(render_loop.scheduler().outstanding.len(), 1);
    }

    #[test]
    fn start_stop_start_leaves_one_pending_frame() {
        let mut render_loop = RenderLoop::new(MockScheduler::default());
        render_loop.start();
        render_loop.stop();
        render_loop.start();
        assert!(render_loop.is_running());
        assert_eq!(render_loop.scheduler().outstanding.len(), 1);
        assert_eq!(
            render_loop.scheduler().outstanding.iter().next().copied(),
            render_loop.pending()
        );
    }

    #[test]
    fn stop_before_start_is_a_no_op() {
        let mut render_loop = RenderLoop::new(MockScheduler::default());
        render_loop.stop();
        render_loop.stop();
        assert_eq!(render_loop.state(), LoopState::Stopped);
        assert_eq!(render_loop.scheduler().cancels, 0);
    }

    #[test]
    fn frame_reschedules_while_running() {
        let mut render_loop = RenderLoop::new(MockScheduler::default());
        render_loop.start();
        for _ in 0..5 {
            let handle = render_loop.pending().unwrap();
            assert!(render_loop.scheduler_mut().fire(handle));
            assert!(render_loop.begin_frame(handle));
            render_loop.end_frame();
        }
        assert_eq!(render_loop.frames(), 5);
        assert_eq!(render_loop.scheduler().outstanding.len(), 1);
    }

    #[test]
    fn cancelled_handle_is_rejected() {
        let mut render_loop = RenderLoop::new(MockScheduler::default());
        render_loop.start();
        let stale = render_loop.pending().unwrap();
        render_loop.stop();
        assert!(!render_loop.begin_frame(stale));

        render_loop.start();
        assert!(!render_loop.begin_frame(stale));
        assert_eq!(render_loop.frames(), 0);
    }

    #[test]
    fn stop_during_a_frame_prevents_rescheduling() {
        let mut render_loop = RenderLoop::new(MockScheduler::default());
        render_loop.start();
        let handle = render_loop.pending().unwrap();
        render_loop.scheduler_mut().fire(handle);
        assert!(render_loop.begin_frame(handle));
        render_loop.stop();
        render_loop.end_frame();
        assert_eq!(render_loop.pending(), None);
        assert!(render_loop.scheduler().outstanding.is_empty());
    }
}
