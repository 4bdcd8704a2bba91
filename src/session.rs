//! A try-on session: camera permission lifecycle, detector readiness, the
//! user's color choice and the render loop, owned together.

use std::task::Poll;

use crate::{
    capture::camera::{CameraBackend, CameraError, CameraStream, PendingCamera},
    config::TryOnConfig,
    detect::{detector::BoxedDetector, readiness::DetectorLoader, worker::DetectionWorker},
    foundation::{
        core::{ColorSelection, Intensity, Rgb},
        error::{TintError, TintResult},
    },
    frame::{buffer::FrameRGBA, snapshot::CapturedLook},
    looks::{
        saved::{AuthState, SavedLooks},
        store::KeyValueStore,
    },
    overlay::compositor::OverlayCompositor,
    palette::find_hair_color,
    render::{
        runloop::{LoopStats, RenderLoop, TickOutcome},
        scheduler::FrameScheduler,
    },
};

const DETECTOR_UNAVAILABLE_MESSAGE: &str =
    "Face tracking could not be loaded. The try-on is unavailable right now.";

/// Why a session is in [`CameraState::Error`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionFault {
    /// Retryable.
    Camera(CameraError),
    /// Terminal for the session.
    DetectorUnavailable(String),
}

impl SessionFault {
    /// Text to show the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Camera(e) => e.user_message(),
            Self::DetectorUnavailable(_) => DETECTOR_UNAVAILABLE_MESSAGE,
        }
    }

    /// Whether `retry` is refused.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::DetectorUnavailable(_))
    }
}

/// Camera permission lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CameraState {
    /// Nothing requested yet, or stopped.
    #[default]
    Idle,
    /// Waiting for the user to answer.
    Requesting,
    /// Streaming; the render loop runs.
    Active,
    /// Request failed or the detector is unavailable.
    Error(SessionFault),
}

/// Where the landmark detector stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorStatus {
    /// Still loading.
    Loading,
    /// Attached to the render loop.
    Ready,
    /// Failed or timed out. Terminal.
    Unavailable,
}

/// What one [`TryOnSession::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionTick {
    /// Nothing to do in the current state.
    Idle,
    /// Still waiting on the permission request.
    Requesting,
    /// Permission granted this tick.
    Activated,
    /// Permission request or detector failed this tick.
    Failed,
    /// The render loop ran.
    Frame(TickOutcome),
}

enum DetectorSlot {
    Loading(DetectorLoader<BoxedDetector>),
    Ready,
    Unavailable(String),
}

/// One user's try-on: camera, detector, color choice and render loop.
///
/// Dropping the session stops the camera.
pub struct TryOnSession<B: CameraBackend, S: FrameScheduler> {
    config: TryOnConfig,
    backend: B,
    state: CameraState,
    pending: Option<Box<dyn PendingCamera>>,
    stream: Option<Box<dyn CameraStream>>,
    detector: DetectorSlot,
    render: RenderLoop<S>,
    selection: ColorSelection,
}

impl<B: CameraBackend, S: FrameScheduler> TryOnSession<B, S> {
    /// Validate `config` and start idle. Nothing is requested until
    /// [`start_camera`](Self::start_camera).
    pub fn new(
        config: TryOnConfig,
        backend: B,
        scheduler: S,
        detector: DetectorLoader<BoxedDetector>,
    ) -> TintResult<Self> {
        config.validate()?;
        let selection = config.initial_selection()?;
        let compositor = OverlayCompositor::new(config.overlay.head, config.overlay.blend);
        let render = RenderLoop::new(scheduler, compositor, config.detection.min_confidence);
        Ok(Self {
            config,
            backend,
            state: CameraState::Idle,
            pending: None,
            stream: None,
            detector: DetectorSlot::Loading(detector),
            render,
            selection,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &TryOnConfig {
        &self.config
    }

    /// Current camera state.
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// The camera backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The output canvas.
    pub fn canvas(&self) -> &FrameRGBA {
        self.render.canvas()
    }

    /// Render loop counters.
    pub fn stats(&self) -> LoopStats {
        self.render.stats()
    }

    /// Current color choice.
    pub fn selection(&self) -> ColorSelection {
        self.selection
    }

    /// Replace the color choice. Takes effect on the next composite.
    pub fn set_selection(&mut self, selection: ColorSelection) {
        self.selection = selection;
    }

    /// `None` selects the natural color.
    pub fn select_color(&mut self, color: Option<Rgb>) {
        self.selection.color = color;
    }

    /// Select a palette color by id, keeping the intensity.
    pub fn select_preset(&mut self, id: &str) -> TintResult<()> {
        let preset = find_hair_color(id)
            .ok_or_else(|| TintError::validation(format!("unknown hair color '{id}'")))?;
        self.selection.color = preset.rgb;
        Ok(())
    }

    /// Clamped to the supported range.
    pub fn set_intensity(&mut self, value: f32) {
        self.selection.intensity = Intensity::new(value);
    }

    /// Live camera tracks. Zero once stopped.
    pub fn active_tracks(&self) -> usize {
        self.stream.as_ref().map_or(0, |s| s.active_tracks())
    }

    /// Outstanding frame requests. Zero once stopped.
    pub fn pending_frame_requests(&self) -> usize {
        self.render.scheduler().pending_requests()
    }

    /// Whether an active stream is still producing frames.
    pub fn is_streaming(&self) -> bool {
        self.state == CameraState::Active && self.stream.as_ref().is_some_and(|s| s.is_playing())
    }

    /// Check on the detector without blocking.
    pub fn detector_status(&mut self) -> DetectorStatus {
        self.poll_detector();
        match self.detector {
            DetectorSlot::Loading(_) => DetectorStatus::Loading,
            DetectorSlot::Ready => DetectorStatus::Ready,
            DetectorSlot::Unavailable(_) => DetectorStatus::Unavailable,
        }
    }

    /// Ask for the camera. Blocks until the detector is ready (bounded by the
    /// configured model timeout), then issues the permission request.
    #[tracing::instrument(skip(self))]
    pub fn start_camera(&mut self) -> TintResult<()> {
        match &self.state {
            CameraState::Requesting | CameraState::Active => return Ok(()),
            CameraState::Error(SessionFault::DetectorUnavailable(msg)) => {
                return Err(TintError::detector_unavailable(msg.clone()));
            }
            CameraState::Idle | CameraState::Error(SessionFault::Camera(_)) => {}
        }
        self.wait_for_detector()?;

        tracing::info!(facing_mode = ?self.config.camera.facing_mode, "requesting camera");
        self.state = CameraState::Requesting;
        self.pending = Some(self.backend.open(&self.config.camera));
        self.render.schedule();
        Ok(())
    }

    /// Re-issue the camera request after a camera error. Refused once the
    /// detector is known to be unavailable.
    pub fn retry(&mut self) -> TintResult<()> {
        if let CameraState::Error(fault) = &self.state {
            tracing::debug!(fault = ?fault, "retrying camera");
        }
        self.start_camera()
    }

    /// Service one frame callback.
    pub fn tick(&mut self) -> SessionTick {
        self.poll_detector();
        match self.state {
            CameraState::Requesting => self.tick_requesting(),
            CameraState::Active => {
                let Some(stream) = self.stream.as_mut() else {
                    self.state = CameraState::Idle;
                    self.render.cancel();
                    return SessionTick::Idle;
                };
                SessionTick::Frame(self.render.tick(stream.as_mut(), self.selection))
            }
            CameraState::Idle | CameraState::Error(_) => {
                self.render.cancel();
                SessionTick::Idle
            }
        }
    }

    /// Run ticks for frame requests that are due, at most `max_ticks`.
    pub fn run_due(&mut self, max_ticks: usize) -> Vec<SessionTick> {
        let mut ticks = Vec::new();
        while ticks.len() < max_ticks && self.render.take_due() {
            ticks.push(self.tick());
        }
        ticks
    }

    /// Release everything: tracks, any pending permission request, the
    /// outstanding frame request and any in-flight detection. Safe from any
    /// state.
    pub fn stop(&mut self) {
        self.render.stop();
        self.pending = None;
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
        let terminal = matches!(&self.state, CameraState::Error(f) if f.is_terminal());
        if !terminal && self.state != CameraState::Idle {
            tracing::info!("camera stopped");
            self.state = CameraState::Idle;
        }
    }

    /// Snapshot the current canvas.
    pub fn snapshot(&self) -> TintResult<CapturedLook> {
        let canvas = self.render.canvas();
        if self.state != CameraState::Active || canvas.size().is_empty() {
            return Err(TintError::validation("no frame to capture"));
        }
        CapturedLook::capture(canvas, self.config.snapshot.jpeg_quality)
    }

    /// Snapshot the canvas into `auth`'s saved looks.
    pub fn save_look<K: KeyValueStore>(
        &self,
        looks: &mut SavedLooks<K>,
        auth: &AuthState,
    ) -> TintResult<CapturedLook> {
        if !auth.is_authenticated() {
            return Err(TintError::unauthenticated("sign in to save looks"));
        }
        let look = self.snapshot()?;
        looks.save(auth, look.clone())?;
        Ok(look)
    }

    fn tick_requesting(&mut self) -> SessionTick {
        let Some(pending) = self.pending.as_mut() else {
            self.state = CameraState::Idle;
            return SessionTick::Idle;
        };
        match pending.poll() {
            Poll::Pending => {
                self.render.schedule();
                SessionTick::Requesting
            }
            Poll::Ready(Ok(stream)) => {
                self.pending = None;
                tracing::info!(size = ?stream.native_size(), "camera active");
                self.stream = Some(stream);
                self.state = CameraState::Active;
                self.render.schedule();
                SessionTick::Activated
            }
            Poll::Ready(Err(err)) => {
                self.pending = None;
                tracing::warn!(kind = ?err.kind, detail = %err.detail, "camera request failed");
                self.state = CameraState::Error(SessionFault::Camera(err));
                self.render.cancel();
                SessionTick::Failed
            }
        }
    }

    fn poll_detector(&mut self) {
        let DetectorSlot::Loading(loader) = &mut self.detector else {
            return;
        };
        match loader.poll() {
            Poll::Pending => {}
            Poll::Ready(Ok(detector)) => self.install_detector(detector),
            Poll::Ready(Err(err)) => self.detector_failed(err),
        }
    }

    fn wait_for_detector(&mut self) -> TintResult<()> {
        match &mut self.detector {
            DetectorSlot::Ready => Ok(()),
            DetectorSlot::Unavailable(msg) => Err(TintError::detector_unavailable(msg.clone())),
            DetectorSlot::Loading(loader) => {
                let result = loader.wait();
                match result {
                    Ok(detector) => self.install_detector(detector),
                    Err(err) => self.detector_failed(err),
                }
                match &self.detector {
                    DetectorSlot::Unavailable(msg) => {
                        Err(TintError::detector_unavailable(msg.clone()))
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    fn install_detector(&mut self, detector: BoxedDetector) {
        let worker = if self.config.detection.worker_thread {
            match DetectionWorker::spawn(detector) {
                Ok(worker) => worker,
                Err(err) => return self.detector_failed(err),
            }
        } else {
            DetectionWorker::inline(detector)
        };
        tracing::info!(worker = ?worker, "detector ready");
        self.render.attach_worker(worker);
        self.detector = DetectorSlot::Ready;
    }

    fn detector_failed(&mut self, err: TintError) {
        let msg = match err {
            TintError::DetectorUnavailable(msg) => msg,
            other => other.to_string(),
        };
        tracing::warn!(error = %msg, "detector unavailable");
        self.render.stop();
        self.pending = None;
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
        self.state = CameraState::Error(SessionFault::DetectorUnavailable(msg.clone()));
        self.detector = DetectorSlot::Unavailable(msg);
    }
}

impl<B: CameraBackend, S: FrameScheduler> Drop for TryOnSession<B, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<B: CameraBackend, S: FrameScheduler> std::fmt::Debug for TryOnSession<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryOnSession")
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("render", &self.render)
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
