use std::collections::BTreeSet;

/// Handle for one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequest(pub u64);

/// Frame-callback source, analogous to a display's animation-frame queue.
pub trait FrameScheduler {
    /// Ask for one callback.
    fn request_frame(&mut self) -> FrameRequest;
    /// Cancelling an unknown or already-fired request is a no-op.
    fn cancel_frame(&mut self, request: FrameRequest);
    /// Pop the oldest outstanding request, if any.
    fn next_due(&mut self) -> Option<FrameRequest>;
    /// Requests neither fired nor cancelled.
    fn pending_requests(&self) -> usize;
}

/// FIFO scheduler with no notion of time; every request is due immediately.
#[derive(Clone, Debug, Default)]
pub struct QueueScheduler {
    next_id: u64,
    pending: BTreeSet<u64>,
}

impl QueueScheduler {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for QueueScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(id);
        FrameRequest(id)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.remove(&request.0);
    }

    fn next_due(&mut self) -> Option<FrameRequest> {
        self.pending.pop_first().map(FrameRequest)
    }

    fn pending_requests(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
