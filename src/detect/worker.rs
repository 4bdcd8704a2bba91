use std::{
    sync::{Arc, mpsc},
    thread,
};

use crate::{
    detect::detector::LandmarkDetector,
    foundation::error::{TintError, TintResult},
    frame::buffer::FrameRGBA,
    landmarks::model::Detection,
};

type DetectionResult = TintResult<Vec<Detection>>;

enum Message {
    Detect { seq: u64, frame: Arc<FrameRGBA> },
    Terminate,
}

enum Backend {
    Inline {
        detector: Box<dyn LandmarkDetector>,
        ready: Option<(u64, DetectionResult)>,
    },
    Thread {
        sender: mpsc::Sender<Message>,
        receiver: mpsc::Receiver<(u64, DetectionResult)>,
        thread: Option<thread::JoinHandle<()>>,
    },
}

/// Runs at most one detection at a time.
///
/// Every submission gets a sequence number. Results whose number is not the
/// one currently in flight (e.g. after [`DetectionWorker::discard`]) are
/// dropped on arrival.
pub struct DetectionWorker {
    backend: Backend,
    next_seq: u64,
    in_flight: Option<u64>,
}

impl DetectionWorker {
    /// Detect on the caller's thread at submit time; the result is handed out
    /// by the next [`poll`](Self::poll). Deterministic, used by tests and the CLI.
    pub fn inline(detector: impl LandmarkDetector + 'static) -> Self {
        Self {
            backend: Backend::Inline {
                detector: Box::new(detector),
                ready: None,
            },
            next_seq: 0,
            in_flight: None,
        }
    }

    /// Detect on a dedicated `hairtint-detect` thread.
    pub fn spawn(detector: impl LandmarkDetector + Send + 'static) -> TintResult<Self> {
        let mut detector = detector;
        let (sender, jobs) = mpsc::channel::<Message>();
        let (done, receiver) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("hairtint-detect".to_string())
            .spawn(move || {
                while let Ok(message) = jobs.recv() {
                    match message {
                        Message::Detect { seq, frame } => {
                            let result = detector.detect(&frame);
                            if done.send((seq, result)).is_err() {
                                break;
                            }
                        }
                        Message::Terminate => break,
                    }
                }
            })
            .map_err(|e| TintError::detection(format!("spawn detection worker: {e}")))?;
        Ok(Self {
            backend: Backend::Thread {
                sender,
                receiver,
                thread: Some(thread),
            },
            next_seq: 0,
            in_flight: None,
        })
    }

    /// Whether a detection is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Sequence number of the detection in flight.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Queue `frame` for detection. Fails if a detection is already in flight.
    pub fn submit(&mut self, frame: Arc<FrameRGBA>) -> TintResult<u64> {
        if let Some(seq) = self.in_flight {
            return Err(TintError::detection(format!(
                "detection {seq} still in flight"
            )));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        match &mut self.backend {
            Backend::Inline { detector, ready } => {
                *ready = Some((seq, detector.detect(&frame)));
            }
            Backend::Thread { sender, .. } => {
                sender
                    .send(Message::Detect { seq, frame })
                    .map_err(|_| TintError::detection("detection worker has exited"))?;
            }
        }
        self.in_flight = Some(seq);
        Ok(seq)
    }

    /// The in-flight result, if it has resolved. `None` while pending or idle.
    pub fn poll(&mut self) -> Option<DetectionResult> {
        let current = self.in_flight?;
        match &mut self.backend {
            Backend::Inline { ready, .. } => match ready.take() {
                Some((seq, result)) if seq == current => {
                    self.in_flight = None;
                    Some(result)
                }
                _ => None,
            },
            Backend::Thread { receiver, .. } => loop {
                match receiver.try_recv() {
                    Ok((seq, result)) if seq == current => {
                        self.in_flight = None;
                        return Some(result);
                    }
                    Ok((seq, _)) => tracing::debug!(seq, "dropping stale detection"),
                    Err(mpsc::TryRecvError::Empty) => return None,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        self.in_flight = None;
                        return Some(Err(TintError::detection(
                            "detection worker exited mid-frame",
                        )));
                    }
                }
            },
        }
    }

    /// Forget the in-flight detection. It is not interrupted; its result is
    /// dropped when it arrives.
    pub fn discard(&mut self) {
        if let Some(seq) = self.in_flight.take() {
            tracing::debug!(seq, "discarding in-flight detection");
        }
        if let Backend::Inline { ready, .. } = &mut self.backend {
            *ready = None;
        }
    }
}

impl std::fmt::Debug for DetectionWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.backend {
            Backend::Inline { .. } => "inline",
            Backend::Thread { .. } => "thread",
        };
        f.debug_struct("DetectionWorker")
            .field("mode", &mode)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl Drop for DetectionWorker {
    fn drop(&mut self) {
        if let Backend::Thread { sender, thread, .. } = &mut self.backend {
            let _ = sender.send(Message::Terminate);
            if let Some(handle) = thread.take() {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/detect/worker.rs"]
mod tests;
