//! The interpretation pipeline: utterance text to transaction record.
//!
//! Two stages with a hard boundary between them:
//! - [`parser::parse`] reads the sentence under the fixed French grammar and
//!   returns what it literally said, nothing resolved.
//! - [`normalizer::normalize`] resolves each fragment against the caller's
//!   context into a complete [`TransactionCreateInput`].
//!
//! [`interpret`] composes the two. Both halves stay public so callers can
//! preview fragments before committing to a full interpretation.

pub mod normalizer;
pub mod parser;

// Re-export the stage entry points
pub use normalizer::normalize;
pub use parser::parse;

use thiserror::Error;

use crate::domain::{ResolutionContext, TransactionCreateInput};

/// Everything that can go wrong between raw text and a complete record.
///
/// Parse failures say what the grammar could not read; normalization failures
/// say which field could not be resolved. Every variant maps to a stable code
/// via [`PipelineError::code`], and variants carry the offending raw value
/// where one exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// No number followed by the currency word anywhere in the sentence.
    #[error("no amount followed by 'euros' was found")]
    MissingAmount,
    /// The sentence does not match any known template.
    #[error("unrecognized wording: '{word}'")]
    UnsupportedFormat { word: String },
    /// No date phrase and no default date to anchor one.
    #[error("no usable date: the sentence names none and no default was supplied")]
    MissingDate,
    /// No account phrase and no default account.
    #[error("no account: the sentence names none and no default was supplied")]
    MissingAccount,
    /// The label implies no type and no default type was supplied.
    #[error("cannot tell income from expense: no label hint and no default")]
    MissingType,
    /// The label is outside the category vocabulary.
    #[error("label '{label}' matches no known category")]
    MissingCategory { label: String },
}

impl PipelineError {
    /// Stable machine-readable code, part of the public contract.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::MissingAmount => "MISSING_AMOUNT",
            PipelineError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            PipelineError::MissingDate => "MISSING_DATE",
            PipelineError::MissingAccount => "MISSING_ACCOUNT",
            PipelineError::MissingType => "MISSING_TYPE",
            PipelineError::MissingCategory { .. } => "MISSING_CATEGORY",
        }
    }
}

/// Interpret one utterance end to end.
///
/// Equivalent to `normalize(&parse(text)?, context)`. Stateless; nothing is
/// cached between calls and neither argument is mutated.
pub fn interpret(
    text: &str,
    context: &ResolutionContext,
) -> Result<TransactionCreateInput, PipelineError> {
    let fragment = parse(text)?;
    tracing::debug!(
        label = %fragment.label,
        amount = fragment.amount,
        "utterance parsed"
    );
    let record = normalize(&fragment, context)?;
    tracing::debug!(
        date = %record.date,
        category = %record.category,
        account = %record.account,
        "fields resolved"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(PipelineError::MissingAmount.code(), "MISSING_AMOUNT");
        assert_eq!(
            PipelineError::UnsupportedFormat {
                word: "demain".to_string()
            }
            .code(),
            "UNSUPPORTED_FORMAT"
        );
        assert_eq!(PipelineError::MissingDate.code(), "MISSING_DATE");
        assert_eq!(PipelineError::MissingAccount.code(), "MISSING_ACCOUNT");
        assert_eq!(PipelineError::MissingType.code(), "MISSING_TYPE");
        assert_eq!(
            PipelineError::MissingCategory {
                label: "Cadeau".to_string()
            }
            .code(),
            "MISSING_CATEGORY"
        );
    }

    #[test]
    fn interpret_composes_both_stages() {
        let context = ResolutionContext {
            default_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 5),
            default_account: Some(crate::domain::AccountTag::Sg),
            default_type: Some(crate::domain::TransactionType::Expense),
        };
        let record = interpret("Courses 20 euros", &context).unwrap();
        assert_eq!(record.amount, 20.0);

        // Parse failures surface before any resolution is attempted.
        let err = interpret("n'importe quoi", &context).unwrap_err();
        assert_eq!(err, PipelineError::MissingAmount);
    }
}
