//! Offline drivers: run recorded frames through a full try-on session.

use std::time::Duration;

use crate::{
    capture::still::StillCamera,
    config::TryOnConfig,
    detect::{
        detector::{BoxedDetector, LandmarkDetector},
        readiness::DetectorLoader,
    },
    foundation::{
        core::ColorSelection,
        error::{TintError, TintResult},
    },
    frame::buffer::FrameRGBA,
    render::{runloop::TickOutcome, scheduler::QueueScheduler},
    session::{CameraState, SessionTick, TryOnSession},
};

const STILL_TICK_LIMIT: usize = 8;
const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Counters from [`run_sequence`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequenceStats {
    /// Render loop ticks run.
    pub ticks: u64,
    /// Canvases handed to the callback.
    pub frames_drawn: u64,
    /// Canvases that carried a tint.
    pub overlays_drawn: u64,
}

/// Composite one frame: mirrored background plus overlay for the first
/// confident face `detector` reports.
#[tracing::instrument(skip_all, fields(w = frame.width, h = frame.height))]
pub fn render_still(
    config: &TryOnConfig,
    frame: FrameRGBA,
    detector: impl LandmarkDetector + Send + 'static,
    selection: ColorSelection,
) -> TintResult<FrameRGBA> {
    let mut config = config.clone();
    config.detection.worker_thread = false;

    let mut session = open_session(config, StillCamera::new(vec![frame]), detector)?;
    session.set_selection(selection);
    session.start_camera()?;

    for _ in 0..STILL_TICK_LIMIT {
        match session.run_due(1).first() {
            Some(SessionTick::Frame(TickOutcome::Drawn { .. })) => {
                return Ok(session.canvas().clone());
            }
            Some(SessionTick::Failed) => return Err(camera_failure(session.state())),
            Some(_) => {}
            None => break,
        }
    }
    Err(TintError::render("still frame was never drawn"))
}

/// Play `frames` through a session once, calling `on_frame` for every drawn
/// canvas in order.
#[tracing::instrument(skip_all, fields(frames = frames.len()))]
pub fn run_sequence(
    config: &TryOnConfig,
    frames: Vec<FrameRGBA>,
    detector: impl LandmarkDetector + Send + 'static,
    selection: ColorSelection,
    mut on_frame: impl FnMut(usize, &FrameRGBA) -> TintResult<()>,
) -> TintResult<SequenceStats> {
    let mut session = open_session(config.clone(), StillCamera::new(frames), detector)?;
    session.set_selection(selection);
    session.start_camera()?;

    let mut drawn = 0usize;
    let mut ticks = 0u64;
    loop {
        let Some(tick) = session.run_due(1).first().copied() else {
            break;
        };
        ticks += 1;
        match tick {
            SessionTick::Failed => return Err(camera_failure(session.state())),
            SessionTick::Frame(TickOutcome::Drawn { .. }) => {
                on_frame(drawn, session.canvas())?;
                drawn += 1;
            }
            SessionTick::Frame(TickOutcome::Detecting) => {
                if session.config().detection.worker_thread {
                    std::thread::sleep(WORKER_POLL_INTERVAL);
                }
            }
            SessionTick::Frame(TickOutcome::Idle) if !session.is_streaming() => break,
            _ => {}
        }
    }

    let stats = session.stats();
    session.stop();
    tracing::info!(ticks, frames_drawn = stats.frames_drawn, overlays = stats.overlays_drawn, "sequence done");
    Ok(SequenceStats {
        ticks,
        frames_drawn: stats.frames_drawn,
        overlays_drawn: stats.overlays_drawn,
    })
}

fn open_session(
    config: TryOnConfig,
    camera: StillCamera,
    detector: impl LandmarkDetector + Send + 'static,
) -> TintResult<TryOnSession<StillCamera, QueueScheduler>> {
    let detector: BoxedDetector = Box::new(detector);
    TryOnSession::new(config, camera, QueueScheduler::new(), DetectorLoader::ready(detector))
}

fn camera_failure(state: &CameraState) -> TintError {
    match state {
        CameraState::Error(fault) => TintError::camera(fault.message()),
        other => TintError::camera(format!("camera failed in state {other:?}")),
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
