//! Cooperative frame scheduler
//!
//! One-shot frame callbacks with animation-frame semantics: a scheduled
//! task fires on the next frame and must be rescheduled explicitly to
//! keep running. Every schedule returns an owned [`FrameHandle`] so the
//! owner can cancel it on stop or teardown; a dangling scheduled task
//! mutating state after its owner is gone is exactly the bug this
//! prevents.

use crate::types::ChannelId;

/// Work to perform on a future frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// Advance the master transport by one step
    AdvanceMaster,
    /// Watch a channel for its own track end
    ///
    /// Extension point: a channel that wants to self-stop at track end
    /// would schedule this each frame. No current code path schedules
    /// it; the channel controller only cancels such a handle on `Ended`.
    ChannelEndWatch(ChannelId),
}

/// Owned handle to a scheduled frame task
///
/// Cancellation through a handle is a no-op if the task already fired
/// or was already canceled.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameHandle(u64);

/// Single-threaded scheduler driving the cooperative frame loop
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Vec<(u64, FrameTask)>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task for the next frame
    pub fn schedule(&mut self, task: FrameTask) -> FrameHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push((id, task));
        FrameHandle(id)
    }

    /// Cancel a scheduled task
    pub fn cancel(&mut self, handle: &FrameHandle) {
        self.pending.retain(|(id, _)| *id != handle.0);
    }

    /// Drain everything scheduled before this frame
    ///
    /// Tasks scheduled while processing the returned batch land on the
    /// next frame, not this one.
    pub fn take_due(&mut self) -> Vec<FrameTask> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }

    /// Drop all pending tasks (teardown path)
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of tasks waiting for the next frame
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_fire_once() {
        let mut sched = FrameScheduler::new();
        sched.schedule(FrameTask::AdvanceMaster);

        assert_eq!(sched.take_due(), vec![FrameTask::AdvanceMaster]);
        // One-shot: nothing left without a reschedule
        assert!(sched.take_due().is_empty());
    }

    #[test]
    fn test_cancel_removes_pending_task() {
        let mut sched = FrameScheduler::new();
        let handle = sched.schedule(FrameTask::AdvanceMaster);
        let kept = sched.schedule(FrameTask::ChannelEndWatch(ChannelId(1)));

        sched.cancel(&handle);
        assert_eq!(sched.take_due(), vec![FrameTask::ChannelEndWatch(ChannelId(1))]);

        // Canceling after the fact is a no-op
        sched.cancel(&kept);
        assert_eq!(sched.pending_len(), 0);
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut sched = FrameScheduler::new();
        let a = sched.schedule(FrameTask::AdvanceMaster);
        let b = sched.schedule(FrameTask::AdvanceMaster);
        assert_ne!(a, b);

        // Canceling one leaves the other
        sched.cancel(&a);
        assert_eq!(sched.pending_len(), 1);
    }
}
