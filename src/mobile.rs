//! Mobile envelope adapter.
//!
//! The app shell ships a JSON envelope `{text, locale, capturedAt}`; this
//! module validates it against the grammar's requirements and hands the text
//! to the pipeline with the capture day as the default date. Pipeline
//! failures pass through unchanged: same code, same message, same value.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    AccountTag, Locale, ResolutionContext, TransactionCreateInput, TransactionType,
};
use crate::pipeline::{self, PipelineError};

/// The capture envelope exactly as the app shell sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureEnvelope {
    /// Recognized utterance text
    pub text: String,
    /// Locale the shell recognized under, e.g. "fr-FR"
    pub locale: String,
    /// Capture instant, RFC 3339
    pub captured_at: String,
}

/// Defaults the shell carries on behalf of the signed-in user.
///
/// No default date here: the envelope's capture instant supplies it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileContext {
    /// Account used when the sentence names none
    pub default_account: Option<AccountTag>,
    /// Type used when the label implies none
    pub default_type: Option<TransactionType>,
}

/// Envelope-stage failures, plus pipeline failures passed through.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MobileError {
    /// The utterance text is blank.
    #[error("utterance text is empty")]
    InvalidInput,
    /// The envelope locale is not the grammar locale.
    #[error("locale '{locale}' is not supported by the grammar")]
    UnsupportedLocale { locale: String },
    /// The capture instant is not a full date-time.
    #[error("'{value}' is not a full RFC 3339 instant")]
    InvalidCapturedAt { value: String },
    /// A parse or normalization failure, unchanged.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl MobileError {
    /// Stable machine-readable code. Pipeline failures keep their own codes.
    pub fn code(&self) -> &'static str {
        match self {
            MobileError::InvalidInput => "MOBILE_INVALID_INPUT",
            MobileError::UnsupportedLocale { .. } => "MOBILE_UNSUPPORTED_LOCALE",
            MobileError::InvalidCapturedAt { .. } => "MOBILE_INVALID_CAPTURED_AT",
            MobileError::Pipeline(inner) => inner.code(),
        }
    }
}

/// Validate an envelope and interpret its text.
///
/// The default date handed to the pipeline is the calendar-date portion of
/// `captured_at` in its own offset: a capture at 00:30 in Paris stays on the
/// Paris day, not the UTC one.
pub fn adapt(
    envelope: &CaptureEnvelope,
    context: &MobileContext,
) -> Result<TransactionCreateInput, MobileError> {
    if envelope.text.trim().is_empty() {
        return Err(MobileError::InvalidInput);
    }
    if envelope.locale != Locale::FrFr.as_tag() {
        return Err(MobileError::UnsupportedLocale {
            locale: envelope.locale.clone(),
        });
    }
    // A bare calendar date has no time part and fails to parse here.
    let captured_at = DateTime::parse_from_rfc3339(&envelope.captured_at).map_err(|_| {
        MobileError::InvalidCapturedAt {
            value: envelope.captured_at.clone(),
        }
    })?;

    tracing::debug!(
        locale = %envelope.locale,
        captured_at = %envelope.captured_at,
        "envelope accepted"
    );

    let resolution = ResolutionContext {
        default_date: Some(captured_at.date_naive()),
        default_account: context.default_account,
        default_type: context.default_type,
    };
    Ok(pipeline::interpret(&envelope.text, &resolution)?)
}
