//! Speech-capture boundary.
//!
//! The host platform owns the actual microphone and recognition engine; this
//! module owns the seam. [`SpeechRecognizer`] is what a platform must
//! provide, [`adapter::capture`] drives one session of it and validates the
//! surrounding context, and [`ScriptedRecognizer`] is the in-crate playback
//! implementation used by tests and the CLI.

pub mod adapter;
pub mod recognizer;

pub use adapter::{capture, CaptureError};
pub use recognizer::{RecognizerStage, ScriptedRecognizer, SpeechRecognizer, Transcript};
