//! One-shot detector readiness.
//!
//! The detector is loaded once on a background thread. Its result is
//! delivered exactly once; waiting past the deadline is a terminal
//! [`TintError::DetectorUnavailable`].

use std::{
    sync::mpsc::{self, RecvTimeoutError, TryRecvError},
    task::Poll,
    thread,
    time::{Duration, Instant},
};

use crate::foundation::error::{TintError, TintResult};

/// How long a session waits for the detector by default.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle to a detector that is loading, loaded, or failed to load.
pub struct DetectorLoader<D> {
    rx: Option<mpsc::Receiver<TintResult<D>>>,
    deadline: Instant,
    timeout: Duration,
}

impl<D: Send + 'static> DetectorLoader<D> {
    /// Run `load` on its own thread. The thread is detached; a load that
    /// finishes after the deadline is dropped.
    pub fn spawn<F>(timeout: Duration, load: F) -> TintResult<Self>
    where
        F: FnOnce() -> TintResult<D> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        thread::Builder::new()
            .name("hairtint-detector-load".to_string())
            .spawn(move || {
                let started = Instant::now();
                let result = load();
                tracing::debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    ok = result.is_ok(),
                    "detector load finished"
                );
                let _ = tx.send(result);
            })
            .map_err(|e| {
                TintError::detector_unavailable(format!("spawn detector loader: {e}"))
            })?;
        Ok(Self {
            rx: Some(rx),
            deadline: Instant::now() + timeout,
            timeout,
        })
    }
}

impl<D> DetectorLoader<D> {
    /// A loader that is already resolved.
    pub fn ready(detector: D) -> Self {
        Self::resolved(Ok(detector))
    }

    /// A loader that already failed.
    pub fn failed(err: TintError) -> Self {
        Self::resolved(Err(err))
    }

    fn resolved(result: TintResult<D>) -> Self {
        let (tx, rx) = mpsc::sync_channel(1);
        let _ = tx.send(result);
        Self {
            rx: Some(rx),
            deadline: Instant::now(),
            timeout: Duration::ZERO,
        }
    }

    /// Whether the result has already been handed out.
    pub fn is_taken(&self) -> bool {
        self.rx.is_none()
    }

    /// Non-blocking check. Yields `Ready` exactly once with the detector or a
    /// terminal error; polling again after that is an error.
    pub fn poll(&mut self) -> Poll<TintResult<D>> {
        let Some(rx) = self.rx.as_ref() else {
            return Poll::Ready(Err(already_taken()));
        };
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) if Instant::now() < self.deadline => return Poll::Pending,
            Err(TryRecvError::Empty) => Err(self.timed_out()),
            Err(TryRecvError::Disconnected) => Err(loader_gone()),
        };
        self.rx = None;
        Poll::Ready(terminal(outcome))
    }

    /// Block until the detector is available or the deadline passes.
    pub fn wait(&mut self) -> TintResult<D> {
        let Some(rx) = self.rx.take() else {
            return Err(already_taken());
        };
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        let outcome = match rx.recv_timeout(remaining) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(self.timed_out()),
            Err(RecvTimeoutError::Disconnected) => Err(loader_gone()),
        };
        terminal(outcome)
    }

    fn timed_out(&self) -> TintError {
        TintError::detector_unavailable(format!(
            "detector not ready after {} ms",
            self.timeout.as_millis()
        ))
    }
}

impl<D> std::fmt::Debug for DetectorLoader<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectorLoader")
            .field("taken", &self.is_taken())
            .field("timeout", &self.timeout)
            .finish()
    }
}

// Any load failure is surfaced as unavailable.
fn terminal<D>(outcome: TintResult<D>) -> TintResult<D> {
    outcome.map_err(|e| match e {
        TintError::DetectorUnavailable(_) => e,
        other => TintError::detector_unavailable(other.to_string()),
    })
}

fn already_taken() -> TintError {
    TintError::detector_unavailable("detector readiness already consumed")
}

fn loader_gone() -> TintError {
    TintError::detector_unavailable("detector loader exited without a result")
}

#[cfg(test)]
#[path = "../../tests/unit/detect/readiness.rs"]
mod tests;
