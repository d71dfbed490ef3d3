//! Capture lifecycle driver.
//!
//! Validates the request context (locale, capture instant), drives the
//! recognizer strictly start then stop then transcript, and rejects blank
//! transcripts. Produces the [`RawCapture`] the pipeline consumes. There is
//! no retry: any recognizer failure aborts the capture with its cause
//! preserved.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use thiserror::Error;

use crate::capture::recognizer::SpeechRecognizer;
use crate::domain::{CaptureRequest, Locale, RawCapture};

/// Capture-stage failures, each with a stable code.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No recognizer was injected; the platform has none to offer.
    #[error("no speech recognizer is available")]
    Unavailable,
    /// The requested locale is not in the capture set.
    #[error("locale '{locale}' is not supported for capture")]
    UnsupportedLocale { locale: String },
    /// The capture instant is not a canonical RFC 3339 date-time.
    #[error("'{value}' is not a valid RFC 3339 instant")]
    InvalidCapturedAt { value: String },
    /// The recognizer heard nothing usable.
    #[error("the recognizer returned an empty transcript")]
    EmptyTranscript,
    /// The recognizer itself failed; the cause chain is preserved.
    #[error("recognizer failure: {0}")]
    Runtime(#[from] anyhow::Error),
}

impl CaptureError {
    /// Stable machine-readable code, part of the public contract.
    pub fn code(&self) -> &'static str {
        match self {
            CaptureError::Unavailable => "CAPTURE_UNAVAILABLE",
            CaptureError::UnsupportedLocale { .. } => "UNSUPPORTED_LOCALE",
            CaptureError::InvalidCapturedAt { .. } => "INVALID_CAPTURED_AT",
            CaptureError::EmptyTranscript => "EMPTY_TRANSCRIPT",
            CaptureError::Runtime(_) => "RUNTIME_ERROR",
        }
    }
}

/// Run one capture session and return the validated utterance.
///
/// Context is checked before the recognizer is touched, so an unsupported
/// locale never starts a session. The lifecycle is strictly sequential and a
/// failure at any stage leaves the remaining stages undriven.
pub async fn capture(
    recognizer: Option<&dyn SpeechRecognizer>,
    request: &CaptureRequest,
) -> Result<RawCapture, CaptureError> {
    let recognizer = recognizer.ok_or(CaptureError::Unavailable)?;

    let locale =
        Locale::from_tag(&request.locale).ok_or_else(|| CaptureError::UnsupportedLocale {
            locale: request.locale.clone(),
        })?;

    let captured_at =
        parse_instant(&request.captured_at).ok_or_else(|| CaptureError::InvalidCapturedAt {
            value: request.captured_at.clone(),
        })?;

    recognizer.start().await?;
    recognizer.stop().await?;
    let transcript = recognizer.transcript().await?;

    let text = transcript.text.trim();
    if text.is_empty() {
        return Err(CaptureError::EmptyTranscript);
    }

    tracing::debug!(
        recognizer = recognizer.name(),
        locale = %locale,
        confidence = ?transcript.confidence,
        "capture complete"
    );

    Ok(RawCapture {
        text: text.to_string(),
        locale,
        captured_at,
    })
}

/// Accept only instants that survive a parse/re-serialize round trip.
///
/// Canonical means chrono's own rendering: either plain seconds or fixed
/// millisecond precision (what mobile shells emit). "+00:00" instead of "Z",
/// lowercase markers, or a bare calendar date all parse differently or not
/// at all and are rejected.
fn parse_instant(value: &str) -> Option<DateTime<FixedOffset>> {
    let parsed = DateTime::parse_from_rfc3339(value).ok()?;
    let canonical = parsed.to_rfc3339_opts(SecondsFormat::AutoSi, true);
    let canonical_millis = parsed.to_rfc3339_opts(SecondsFormat::Millis, true);
    (value == canonical || value == canonical_millis).then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::recognizer::{RecognizerStage, ScriptedRecognizer};

    fn request() -> CaptureRequest {
        CaptureRequest {
            locale: "fr-FR".to_string(),
            captured_at: "2026-01-05T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn canonical_instants_are_accepted() {
        assert!(parse_instant("2026-01-05T10:00:00Z").is_some());
        assert!(parse_instant("2026-01-05T10:00:00.000Z").is_some());
        assert!(parse_instant("2026-01-05T10:00:00.500Z").is_some());
        assert!(parse_instant("2026-01-05T10:00:00+02:00").is_some());
    }

    #[test]
    fn non_canonical_instants_are_rejected() {
        // Parses, but re-serializes as "Z".
        assert!(parse_instant("2026-01-05T10:00:00+00:00").is_none());
        assert!(parse_instant("2026-01-05t10:00:00z").is_none());
        // Not instants at all.
        assert!(parse_instant("2026-01-05").is_none());
        assert!(parse_instant("hier").is_none());
        assert!(parse_instant("").is_none());
    }

    #[tokio::test]
    async fn missing_recognizer_is_unavailable() {
        let err = capture(None, &request()).await.unwrap_err();
        assert_eq!(err.code(), "CAPTURE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn locale_is_checked_before_the_session_starts() {
        let recognizer = ScriptedRecognizer::new("Courses 10 euros");
        let bad = CaptureRequest {
            locale: "fr-fr".to_string(),
            ..request()
        };
        let err = capture(Some(&recognizer), &bad).await.unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_LOCALE");
        assert!(recognizer.calls().is_empty());
    }

    #[tokio::test]
    async fn instant_is_checked_before_the_session_starts() {
        let recognizer = ScriptedRecognizer::new("Courses 10 euros");
        let bad = CaptureRequest {
            captured_at: "2026-01-05".to_string(),
            ..request()
        };
        let err = capture(Some(&recognizer), &bad).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_CAPTURED_AT");
        assert!(recognizer.calls().is_empty());
    }

    #[tokio::test]
    async fn blank_transcript_is_rejected_after_trimming() {
        let recognizer = ScriptedRecognizer::new("   ");
        let err = capture(Some(&recognizer), &request()).await.unwrap_err();
        assert_eq!(err.code(), "EMPTY_TRANSCRIPT");
    }

    #[tokio::test]
    async fn transcript_text_is_trimmed() {
        let recognizer = ScriptedRecognizer::new("  Courses 10 euros \n");
        let raw = capture(Some(&recognizer), &request()).await.unwrap();
        assert_eq!(raw.text, "Courses 10 euros");
        assert_eq!(raw.locale, Locale::FrFr);
    }

    #[tokio::test]
    async fn start_failure_stops_the_lifecycle() {
        let recognizer =
            ScriptedRecognizer::new("Courses 10 euros").failing_at(RecognizerStage::Start);
        let err = capture(Some(&recognizer), &request()).await.unwrap_err();
        assert_eq!(err.code(), "RUNTIME_ERROR");
        assert_eq!(recognizer.calls(), vec![RecognizerStage::Start]);
    }
}
