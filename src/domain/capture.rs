//! Capture-side value types.
//!
//! A capture is one user utterance together with the context needed to anchor
//! it in time: the locale the recognizer ran under and the instant the
//! utterance was recorded. The capture layer validates both before any text
//! reaches the grammar.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Locales the capture layer accepts.
///
/// This set is closed on purpose: a locale tag that is not listed here is
/// rejected at capture time rather than silently passed through to a grammar
/// that cannot handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    /// French (France). The only locale the sentence grammar understands.
    #[serde(rename = "fr-FR")]
    FrFr,
    /// English (United States). Accepted for capture, not for interpretation.
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// Parse a BCP 47 tag. Comparison is exact, no case folding.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "fr-FR" => Some(Locale::FrFr),
            "en-US" => Some(Locale::EnUs),
            _ => None,
        }
    }

    /// The canonical BCP 47 tag for this locale.
    pub const fn as_tag(&self) -> &'static str {
        match self {
            Locale::FrFr => "fr-FR",
            Locale::EnUs => "en-US",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A capture request as submitted by a caller, before validation.
///
/// Both fields arrive as free-form strings; the capture adapter turns them
/// into the typed [`RawCapture`] or rejects them with a stable error code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    /// Requested recognition locale, e.g. "fr-FR"
    pub locale: String,
    /// Capture instant as an RFC 3339 string, e.g. "2026-01-05T10:00:00Z"
    pub captured_at: String,
}

/// A validated utterance, ready for interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCapture {
    /// Trimmed transcript text, guaranteed non-empty
    pub text: String,
    /// Locale the recognizer ran under
    pub locale: Locale,
    /// Instant the utterance was recorded, offset preserved
    pub captured_at: DateTime<FixedOffset>,
}
