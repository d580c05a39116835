//! The voice capture state machine.
//!
//! States: Idle → Recording ⇄ Paused, with two exits — stop (finalize
//! and deliver) and cancel (discard). Both exits, and a failed start,
//! release the audio device; there is no path that leaks a capture
//! handle.
//!
//! Elapsed time counts active intervals only. Pausing closes the open
//! interval into an accumulated total; resuming opens a new one. A
//! periodic [`tick`](VoiceRecorder::tick) enforces the duration
//! ceiling: reaching it behaves exactly like an explicit stop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

/// Why the audio device could not be acquired.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user (or platform) refused microphone access.
    #[error("microphone permission denied")]
    PermissionDenied,
    /// No usable input device.
    #[error("microphone unavailable: {0}")]
    DeviceUnavailable(String),
}

/// An open capture handle. Produced by [`AudioSource::open`].
///
/// Dropping the stream releases the device — the recorder relies on
/// this for its no-leak guarantee, so implementations must make their
/// `Drop` release the underlying handle.
pub trait AudioStream: Send {
    /// Stop producing chunks without releasing the device.
    fn pause(&mut self);
    /// Resume producing chunks.
    fn resume(&mut self);
    /// Drain the next encoded chunk, if one is ready.
    fn poll_chunk(&mut self) -> Option<Vec<u8>>;
    /// Container MIME type of the encoded chunks.
    fn mime(&self) -> &'static str {
        "audio/webm"
    }
}

/// An audio input device the recorder can acquire exclusively for one
/// session.
pub trait AudioSource: Send + Sync {
    /// Acquire the device. Fails when permission is denied or no
    /// device exists; a failed open must not leave anything acquired.
    fn open(&self) -> Result<Box<dyn AudioStream>, CaptureError>;
}

/// Recorder state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecorderState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Capturing, clock running.
    Recording,
    /// Capturing suspended, clock frozen.
    Paused,
}

/// A finalized recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordingBlob {
    /// Encoded audio. May be empty when the device produced nothing —
    /// the completion handler still runs and decides what that means.
    pub bytes: Vec<u8>,
    /// Container MIME type.
    pub mime: &'static str,
}

/// Recorder tunables.
#[derive(Clone, Copy, Debug)]
pub struct RecorderConfig {
    /// Duration ceiling in seconds. Reaching it auto-stops.
    pub max_duration_secs: f64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: 60.0,
        }
    }
}

type CompletionHandler = Box<dyn FnMut(RecordingBlob, f64) + Send>;

/// Captures one voice clip at a time from an [`AudioSource`].
///
/// The completion handler runs on [`stop`](Self::stop) (explicit or
/// via the duration ceiling) with the encoded blob and the final
/// active duration, clamped to the configured maximum. It never runs
/// on [`cancel`](Self::cancel).
pub struct VoiceRecorder {
    source: Arc<dyn AudioSource>,
    config: RecorderConfig,
    on_complete: CompletionHandler,
    state: RecorderState,
    stream: Option<Box<dyn AudioStream>>,
    chunks: Vec<u8>,
    accumulated_secs: f64,
    interval_start: Option<Instant>,
    error: Option<String>,
}

impl VoiceRecorder {
    /// New idle recorder.
    pub fn new(
        source: Arc<dyn AudioSource>,
        config: RecorderConfig,
        on_complete: impl FnMut(RecordingBlob, f64) + Send + 'static,
    ) -> Self {
        Self {
            source,
            config,
            on_complete: Box::new(on_complete),
            state: RecorderState::Idle,
            stream: None,
            chunks: Vec::new(),
            accumulated_secs: 0.0,
            interval_start: None,
            error: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Whether the clock is running.
    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Whether capture is suspended.
    pub fn is_paused(&self) -> bool {
        self.state == RecorderState::Paused
    }

    /// Error from the last failed start, for inline display.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Active capture time so far, in fractional seconds.
    pub fn elapsed(&self) -> f64 {
        let open = self
            .interval_start
            .map_or(0.0, |start| start.elapsed().as_secs_f64());
        self.accumulated_secs + open
    }

    /// Begin a new recording session.
    ///
    /// A session already in flight is torn down first — the device is
    /// never shared across two sessions. Acquisition failure is
    /// recorded in [`error`](Self::error) (not returned) and leaves
    /// the recorder idle so the user can retry.
    pub fn start(&mut self) {
        if self.state != RecorderState::Idle {
            debug!("start while active, discarding previous session");
            self.discard();
        }
        self.error = None;

        match self.source.open() {
            Ok(stream) => {
                self.stream = Some(stream);
                self.chunks.clear();
                self.accumulated_secs = 0.0;
                self.interval_start = Some(Instant::now());
                self.state = RecorderState::Recording;
            }
            Err(e) => {
                warn!(error = %e, "audio device acquisition failed");
                self.error = Some(e.to_string());
                self.discard();
            }
        }
    }

    /// Freeze the clock and suspend capture. No data is discarded.
    pub fn pause(&mut self) {
        if self.state != RecorderState::Recording {
            return;
        }
        if let Some(start) = self.interval_start.take() {
            self.accumulated_secs += start.elapsed().as_secs_f64();
        }
        if let Some(stream) = self.stream.as_mut() {
            stream.pause();
        }
        self.state = RecorderState::Paused;
    }

    /// Restart the clock. The accumulated total is kept.
    pub fn resume(&mut self) {
        if self.state != RecorderState::Paused {
            return;
        }
        if let Some(stream) = self.stream.as_mut() {
            stream.resume();
        }
        self.interval_start = Some(Instant::now());
        self.state = RecorderState::Recording;
    }

    /// Finalize: drain the stream, release the device, and hand the
    /// blob plus clamped duration to the completion handler. Runs even
    /// for a zero-byte capture.
    pub fn stop(&mut self) {
        if self.state == RecorderState::Idle {
            return;
        }
        self.finish();
    }

    /// Discard everything and release the device. The completion
    /// handler does NOT run. Safe from any state.
    pub fn cancel(&mut self) {
        if self.state == RecorderState::Idle {
            return;
        }
        debug!("recording cancelled");
        self.discard();
    }

    /// Periodic driver, ≈100 ms. Drains ready chunks and enforces the
    /// duration ceiling exactly as an explicit [`stop`](Self::stop).
    pub fn tick(&mut self) {
        if self.state != RecorderState::Recording {
            return;
        }
        self.drain_chunks();
        if self.elapsed() >= self.config.max_duration_secs {
            debug!("max duration reached, auto-stopping");
            self.finish();
        }
    }

    fn drain_chunks(&mut self) {
        if let Some(stream) = self.stream.as_mut() {
            while let Some(chunk) = stream.poll_chunk() {
                self.chunks.extend_from_slice(&chunk);
            }
        }
    }

    fn finish(&mut self) {
        self.drain_chunks();
        let duration = self.elapsed().min(self.config.max_duration_secs);
        let mime = self
            .stream
            .as_ref()
            .map_or("audio/webm", |stream| stream.mime());
        // Dropping the stream releases the device before the handler
        // runs — the handler may start a new recording.
        self.stream = None;
        self.interval_start = None;
        self.accumulated_secs = 0.0;
        self.state = RecorderState::Idle;

        let blob = RecordingBlob {
            bytes: std::mem::take(&mut self.chunks),
            mime,
        };
        (self.on_complete)(blob, duration);
    }

    fn discard(&mut self) {
        self.stream = None;
        self.chunks.clear();
        self.accumulated_secs = 0.0;
        self.interval_start = None;
        self.state = RecorderState::Idle;
    }
}

/// Drive a shared recorder's [`tick`](VoiceRecorder::tick) at 100 ms
/// until the returned handle is aborted. Ticking an idle recorder is
/// a no-op, so one ticker can outlive many recording sessions.
pub fn spawn_ticker(recorder: Arc<Mutex<VoiceRecorder>>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(100));
        loop {
            let _ = interval.tick().await;
            recorder.lock().tick();
        }
    })
}
