use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    capture::camera::{
        CameraBackend, CameraConstraints, CameraError, CameraStream, PendingCamera, Resolved,
    },
    foundation::{core::FrameSize, error::TintResult},
    frame::buffer::FrameRGBA,
    render::video::VideoSource,
};

/// Camera backend that plays back decoded frames. Every grant gets its own
/// cursor over the same frames.
#[derive(Clone, Debug)]
pub struct StillCamera {
    frames: Arc<Vec<FrameRGBA>>,
    looping: bool,
    live_tracks: Arc<AtomicUsize>,
    opens: usize,
}

impl StillCamera {
    /// Play `frames` once per grant.
    pub fn new(frames: Vec<FrameRGBA>) -> Self {
        Self {
            frames: Arc::new(frames),
            looping: false,
            live_tracks: Arc::new(AtomicUsize::new(0)),
            opens: 0,
        }
    }

    /// Restart from the first frame instead of ending.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Tracks granted and not yet stopped, across all streams.
    pub fn live_tracks(&self) -> usize {
        self.live_tracks.load(Ordering::SeqCst)
    }

    /// Shared counter behind [`live_tracks`](Self::live_tracks).
    pub fn track_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.live_tracks)
    }

    /// Number of permission requests served.
    pub fn opens(&self) -> usize {
        self.opens
    }
}

impl CameraBackend for StillCamera {
    fn open(&mut self, constraints: &CameraConstraints) -> Box<dyn PendingCamera> {
        self.opens += 1;
        tracing::debug!(facing_mode = ?constraints.facing_mode, frames = self.frames.len(), "still camera granted");
        self.live_tracks.fetch_add(1, Ordering::SeqCst);
        let stream = StillStream {
            frames: Arc::clone(&self.frames),
            looping: self.looping,
            cursor: 0,
            live_tracks: Arc::clone(&self.live_tracks),
            ended: false,
            stopped: false,
        };
        Box::new(Resolved::new(Ok::<Box<dyn CameraStream>, CameraError>(Box::new(stream))))
    }
}

struct StillStream {
    frames: Arc<Vec<FrameRGBA>>,
    looping: bool,
    cursor: usize,
    live_tracks: Arc<AtomicUsize>,
    /// Set once a grab finds no frame left; the last frame stays on screen
    /// until then.
    ended: bool,
    stopped: bool,
}

impl StillStream {
    fn current_index(&self) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }
        if self.looping {
            Some(self.cursor % self.frames.len())
        } else {
            (self.cursor < self.frames.len()).then_some(self.cursor)
        }
    }
}

impl VideoSource for StillStream {
    fn is_playing(&self) -> bool {
        !self.stopped && !self.ended && !self.frames.is_empty()
    }

    fn native_size(&self) -> FrameSize {
        self.current_index()
            .or_else(|| self.frames.len().checked_sub(1))
            .map(|i| self.frames[i].size())
            .unwrap_or_default()
    }

    fn current_frame(&mut self) -> TintResult<Option<FrameRGBA>> {
        if self.stopped {
            return Ok(None);
        }
        let Some(i) = self.current_index() else {
            self.ended = true;
            return Ok(None);
        };
        self.cursor += 1;
        Ok(Some(self.frames[i].clone()))
    }
}

impl CameraStream for StillStream {
    fn active_tracks(&self) -> usize {
        usize::from(!self.stopped)
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.live_tracks.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for StillStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/still.rs"]
mod tests;
