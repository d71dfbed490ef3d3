//! Domain types for the voxpense pipeline.
//!
//! This module contains the value objects that flow between stages:
//! - Capture: raw utterance text plus locale and capture instant
//! - Fragment: what a sentence literally said, nothing inferred
//! - Transaction: the fully-resolved, persistence-ready record
//!
//! All of these are plain values: construction is the only mutation, and no
//! instance is shared mutably across pipeline stages.

pub mod capture;
pub mod fragment;
pub mod transaction;

// Re-export commonly used types
pub use capture::{CaptureRequest, Locale, RawCapture};
pub use fragment::{AccountTag, DateFragment, Month, ParsedFragment};
pub use transaction::{Category, ResolutionContext, TransactionCreateInput, TransactionType};
