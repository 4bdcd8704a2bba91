//! The per-frame loop: mirror the video onto the canvas, run one detection at
//! a time, and composite the overlay once a detection resolves.

use std::sync::Arc;

use crate::{
    detect::worker::DetectionWorker,
    foundation::{
        core::{ColorSelection, FrameSize},
        error::TintResult,
    },
    frame::buffer::FrameRGBA,
    landmarks::model::{Detection, primary_face},
    overlay::compositor::OverlayCompositor,
    render::{
        scheduler::{FrameRequest, FrameScheduler},
        video::VideoSource,
    },
};

/// Faces scoring below this are ignored unless configured otherwise.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.4;

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Video not playing; nothing done.
    Idle,
    /// A detection is in flight; the canvas keeps its last frame.
    Detecting,
    /// A frame was drawn, with or without an overlay.
    Drawn {
        /// Whether a tint was composited.
        overlay: bool,
    },
}

/// Running counters of a [`RenderLoop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Ticks run, idle ones included.
    pub ticks: u64,
    /// Frames drawn onto the canvas.
    pub frames_drawn: u64,
    /// Frames that got a tint.
    pub overlays_drawn: u64,
    /// Detection passes that returned an error.
    pub detection_failures: u64,
    /// Times the canvas followed a new video size.
    pub canvas_resizes: u64,
}

/// Draws video frames onto an owned canvas, one scheduled tick at a time,
/// with at most one detection in flight.
pub struct RenderLoop<S> {
    scheduler: S,
    pending: Option<FrameRequest>,
    worker: Option<DetectionWorker>,
    compositor: OverlayCompositor,
    min_confidence: f32,
    canvas: FrameRGBA,
    in_flight: Option<Arc<FrameRGBA>>,
    stats: LoopStats,
}

impl<S: FrameScheduler> RenderLoop<S> {
    /// A loop with no detection worker yet.
    pub fn new(scheduler: S, compositor: OverlayCompositor, min_confidence: f32) -> Self {
        Self {
            scheduler,
            pending: None,
            worker: None,
            compositor,
            min_confidence,
            canvas: FrameRGBA::new(FrameSize::default()),
            in_flight: None,
            stats: LoopStats::default(),
        }
    }

    /// Builder form of [`attach_worker`](Self::attach_worker).
    pub fn with_worker(mut self, worker: DetectionWorker) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Until a worker is attached every tick draws the background only.
    pub fn attach_worker(&mut self, worker: DetectionWorker) {
        self.in_flight = None;
        self.worker = Some(worker);
    }

    /// Whether detection runs at all.
    pub fn has_worker(&self) -> bool {
        self.worker.is_some()
    }

    /// The output canvas.
    pub fn canvas(&self) -> &FrameRGBA {
        &self.canvas
    }

    /// Counters so far.
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The frame scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Whether a tick is requested and not yet run.
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a submitted frame awaits its detection.
    pub fn detection_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Request the next tick unless one is already outstanding.
    pub fn schedule(&mut self) -> FrameRequest {
        if let Some(req) = self.pending {
            return req;
        }
        let req = self.scheduler.request_frame();
        self.pending = Some(req);
        req
    }

    /// Cancel the outstanding tick request, if any.
    pub fn cancel(&mut self) {
        if let Some(req) = self.pending.take() {
            self.scheduler.cancel_frame(req);
        }
    }

    /// Pop the scheduler's next due request. `true` if it was ours, meaning a
    /// tick should run now.
    pub fn take_due(&mut self) -> bool {
        match self.scheduler.next_due() {
            Some(req) if Some(req) == self.pending => {
                self.pending = None;
                true
            }
            Some(req) => {
                tracing::trace!(request = req.0, "ignoring foreign frame request");
                false
            }
            None => false,
        }
    }

    /// Cancel the pending tick and forget any in-flight detection.
    pub fn stop(&mut self) {
        self.cancel();
        self.in_flight = None;
        if let Some(worker) = self.worker.as_mut() {
            worker.discard();
        }
    }

    /// Run one frame and request the next. Per-frame faults are logged and
    /// never stop the loop.
    pub fn tick(&mut self, video: &mut dyn VideoSource, selection: ColorSelection) -> TickOutcome {
        self.cancel();
        self.stats.ticks += 1;
        let outcome = self.service(video, selection);
        self.schedule();
        outcome
    }

    fn service(&mut self, video: &mut dyn VideoSource, selection: ColorSelection) -> TickOutcome {
        if !video.is_playing() {
            return TickOutcome::Idle;
        }

        let native = video.native_size();
        if self.canvas.resize_to(native) {
            self.stats.canvas_resizes += 1;
            tracing::debug!(width = native.width, height = native.height, "canvas resized");
        }

        if self.in_flight.is_some() {
            let Some(result) = self.worker.as_mut().and_then(|w| w.poll()) else {
                return TickOutcome::Detecting;
            };
            let Some(frame) = self.in_flight.take() else {
                return TickOutcome::Detecting;
            };
            let overlay = self.draw(&frame, result, selection);
            // Keep the detector fed; the next result lands on a later tick.
            self.submit_next(video, selection);
            return TickOutcome::Drawn { overlay };
        }

        self.submit_next(video, selection)
    }

    fn submit_next(&mut self, video: &mut dyn VideoSource, selection: ColorSelection) -> TickOutcome {
        let frame = match video.current_frame() {
            Ok(Some(frame)) => Arc::new(frame),
            Ok(None) => return TickOutcome::Detecting,
            Err(e) => {
                tracing::warn!(error = %e, "failed to grab video frame");
                return TickOutcome::Detecting;
            }
        };

        let Some(worker) = self.worker.as_mut() else {
            self.draw(&frame, Ok(Vec::new()), selection);
            return TickOutcome::Drawn { overlay: false };
        };

        match worker.submit(Arc::clone(&frame)) {
            Ok(_) => {
                self.in_flight = Some(frame);
                TickOutcome::Detecting
            }
            Err(e) => {
                self.draw(&frame, Err(e), selection);
                TickOutcome::Drawn { overlay: false }
            }
        }
    }

    fn draw(
        &mut self,
        frame: &FrameRGBA,
        detections: TintResult<Vec<Detection>>,
        selection: ColorSelection,
    ) -> bool {
        if let Err(e) = self.canvas.draw_mirrored(frame) {
            tracing::warn!(error = %e, "failed to draw video frame");
            return false;
        }
        self.stats.frames_drawn += 1;

        let detections = match detections {
            Ok(d) => d,
            Err(e) => {
                self.stats.detection_failures += 1;
                tracing::debug!(error = %e, "detection failed, drawing background only");
                return false;
            }
        };
        let Some(face) = primary_face(&detections, self.min_confidence) else {
            return false;
        };

        // Scale from the submitted frame to whatever the canvas is now.
        let canvas_size = self.canvas.size();
        let face = face
            .scaled(frame.size().scale_to(canvas_size))
            .mirrored(f64::from(canvas_size.width));

        match self.compositor.composite(&mut self.canvas, &face.landmarks, selection) {
            Ok(drawn) => {
                if drawn {
                    self.stats.overlays_drawn += 1;
                }
                drawn
            }
            Err(e) => {
                tracing::debug!(error = %e, "overlay skipped");
                false
            }
        }
    }
}

impl<S> std::fmt::Debug for RenderLoop<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderLoop")
            .field("pending", &self.pending)
            .field("worker", &self.worker)
            .field("canvas", &(self.canvas.width, self.canvas.height))
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/runloop.rs"]
mod tests;
