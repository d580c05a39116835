//! # triage-voice
//!
//! The voice message pipeline: a capture state machine over an
//! abstract audio device ([`VoiceRecorder`]) and the webhook relay
//! that turns a finished clip into a durably hosted URL
//! ([`relay::upload_voice`]).
//!
//! The two halves never touch the panel store directly. A finished
//! recording goes out through the transport bridge as a
//! `sendVoiceMessage` action; the backend relays it to the webhook
//! and the hosted clip returns later as an ordinary voice message
//! event.

pub mod capture;
pub mod relay;

pub use capture::{
    AudioSource, AudioStream, CaptureError, RecorderConfig, RecorderState, RecordingBlob,
    VoiceRecorder, spawn_ticker,
};
pub use relay::{UploadError, VoiceUpload, upload_voice, upload_voice_with_callback};
