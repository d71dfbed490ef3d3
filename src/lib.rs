//! voxpense - spoken French expenses to transaction records
//!
//! Turns a short French utterance like "Courses 45,90 euros hier carte SG"
//! into a complete, persistence-ready transaction record.
//!
//! # Architecture
//!
//! The pipeline is a pure request/response transform over value objects:
//! - Capture validates the surrounding context (locale, instant) and drives
//!   a speech recognizer through one strictly sequential session
//! - The parser reads the sentence under a fixed grammar and returns what it
//!   literally said
//! - The normalizer resolves each fragment against caller-supplied defaults,
//!   failing typed rather than guessing
//!
//! Nothing is retained between calls and no field is ever silently invented:
//! every unresolved field is a stable, user-displayable error code.
//!
//! # Modules
//!
//! - `domain`: Value objects (captures, fragments, transaction records)
//! - `capture`: Speech-recognizer seam and capture lifecycle adapter
//! - `pipeline`: Parser, normalizer, and the composed `interpret` facade
//! - `mobile`: Envelope adapter for the app shell
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Full interpretation with context defaults
//! voxpense interpret "Courses 45,90 euros hier" --account SG --type EXPENSE
//!
//! # Preview what a sentence literally says
//! voxpense parse "Salaire 1800 euros le 1er janvier"
//!
//! # Inspect the accepted grammar
//! voxpense grammar
//! ```

pub mod capture;
pub mod cli;
pub mod config;
pub mod domain;
pub mod mobile;
pub mod pipeline;

// Re-export main types at crate root for convenience
pub use capture::{CaptureError, RecognizerStage, ScriptedRecognizer, SpeechRecognizer, Transcript};
pub use domain::{
    AccountTag, Category, CaptureRequest, DateFragment, Locale, Month, ParsedFragment, RawCapture,
    ResolutionContext, TransactionCreateInput, TransactionType,
};
pub use mobile::{adapt, CaptureEnvelope, MobileContext, MobileError};
pub use pipeline::{interpret, normalize, parse, PipelineError};
