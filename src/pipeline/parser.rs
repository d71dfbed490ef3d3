//! French sentence grammar for spoken transactions.
//!
//! The accepted sentence shape is fixed:
//!
//! ```text
//! <label ...> <amount> euros [aujourd'hui|maintenant|hier|le <day> <month>] [carte <account>]
//! ```
//!
//! Parsing is purely lexical:
//! - The amount is the first token that reads as a number and is followed by
//!   the currency word. Everything before it is the label, verbatim.
//! - Date and account phrases may appear in either order after the currency
//!   word, at most once each.
//! - Any leftover token rejects the whole utterance. The grammar never
//!   guesses; an unrecognized word is an error carrying that word.
//!
//! The parser performs no calendar arithmetic and reads no clock. "hier" is
//! returned symbolically and resolved later against the caller's context.

use crate::domain::{AccountTag, DateFragment, Month, ParsedFragment};
use crate::pipeline::PipelineError;

/// Currency marker, plural form.
pub const WORD_EUROS: &str = "euros";
/// Currency marker, singular form.
pub const WORD_EURO: &str = "euro";
/// Relative date: the capture day.
pub const WORD_TODAY: &str = "aujourd'hui";
/// Synonym for [`WORD_TODAY`].
pub const WORD_NOW: &str = "maintenant";
/// Relative date: the day before the capture day.
pub const WORD_YESTERDAY: &str = "hier";
/// Introduces an explicit "le <day> <month>" date phrase.
pub const WORD_DATE_PREFIX: &str = "le";
/// Introduces a "carte <account>" phrase.
pub const WORD_ACCOUNT_PREFIX: &str = "carte";

/// Parse one utterance into its literal fragments.
///
/// Deterministic: same text in, same fragments out. Errors carry the
/// offending word so callers can show the user what was not understood.
pub fn parse(text: &str) -> Result<ParsedFragment, PipelineError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let (amount_index, amount) = find_amount(&tokens).ok_or(PipelineError::MissingAmount)?;

    if amount_index == 0 {
        // Sentence starts with the amount, so there is no label.
        return Err(PipelineError::UnsupportedFormat {
            word: tokens[0].to_string(),
        });
    }
    let label = tokens[..amount_index].join(" ");

    let mut date_fragment = None;
    let mut account_fragment = None;

    // Walk the tail after the currency word. A second date or account phrase
    // falls through to the rejection arm like any unknown token.
    let mut index = amount_index + 2;
    while index < tokens.len() {
        let token = tokens[index];
        match fold_token(token).as_str() {
            WORD_TODAY | WORD_NOW if date_fragment.is_none() => {
                date_fragment = Some(DateFragment::RelativeToday);
                index += 1;
            }
            WORD_YESTERDAY if date_fragment.is_none() => {
                date_fragment = Some(DateFragment::RelativeYesterday);
                index += 1;
            }
            WORD_DATE_PREFIX if date_fragment.is_none() => {
                date_fragment = Some(parse_day_month(&tokens, index)?);
                index += 3;
            }
            WORD_ACCOUNT_PREFIX if account_fragment.is_none() => {
                account_fragment = Some(parse_account_tag(&tokens, index)?);
                index += 2;
            }
            _ => {
                return Err(PipelineError::UnsupportedFormat {
                    word: token.to_string(),
                })
            }
        }
    }

    Ok(ParsedFragment {
        raw_text: text.to_string(),
        label,
        amount,
        date_fragment,
        account_fragment,
    })
}

/// Lowercase a token and normalize the curly apostrophe recognizers emit.
fn fold_token(token: &str) -> String {
    token.to_lowercase().replace('\u{2019}', "'")
}

/// Locate the amount: the first numeric token followed by a currency word.
fn find_amount(tokens: &[&str]) -> Option<(usize, f64)> {
    tokens.iter().enumerate().find_map(|(index, token)| {
        let next = tokens.get(index + 1)?;
        if !is_currency_word(next) {
            return None;
        }
        parse_amount_token(token).map(|amount| (index, amount))
    })
}

fn is_currency_word(token: &str) -> bool {
    matches!(fold_token(token).as_str(), WORD_EURO | WORD_EUROS)
}

/// Read a spoken amount: digits with at most one "," or "." separator.
///
/// Anything else (signs, spaces, letters, multiple separators) is not an
/// amount. The comma is the French decimal separator, so "45,90" is 45.9.
fn parse_amount_token(token: &str) -> Option<f64> {
    let normalized = token.replace(',', ".");
    if normalized.starts_with('.') || normalized.ends_with('.') {
        return None;
    }
    let mut seen_separator = false;
    for c in normalized.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_separator => seen_separator = true,
            _ => return None,
        }
    }
    normalized.parse().ok()
}

/// Parse "le <day> <month>" starting at the "le" token.
fn parse_day_month(tokens: &[&str], at: usize) -> Result<DateFragment, PipelineError> {
    let day_token = tokens.get(at + 1).copied().unwrap_or(tokens[at]);
    let day = parse_day_token(day_token).ok_or_else(|| PipelineError::UnsupportedFormat {
        word: day_token.to_string(),
    })?;
    let month_token = tokens.get(at + 2).copied().unwrap_or(tokens[at]);
    let month = Month::from_token(month_token).ok_or_else(|| PipelineError::UnsupportedFormat {
        word: month_token.to_string(),
    })?;
    Ok(DateFragment::DayMonth { day, month })
}

/// Read a day number, accepting the ordinal "1er" for the first of the month.
fn parse_day_token(token: &str) -> Option<u32> {
    let lowered = token.to_lowercase();
    let digits = lowered.strip_suffix("er").unwrap_or(&lowered);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day: u32 = digits.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

/// Parse "carte <tag>" starting at the "carte" token.
fn parse_account_tag(tokens: &[&str], at: usize) -> Result<AccountTag, PipelineError> {
    let tag_token = tokens.get(at + 1).copied().unwrap_or(tokens[at]);
    AccountTag::from_token(tag_token).ok_or_else(|| PipelineError::UnsupportedFormat {
        word: tag_token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_sentence() {
        let fragment = parse("Courses 20 euros").unwrap();
        assert_eq!(fragment.label, "Courses");
        assert_eq!(fragment.amount, 20.0);
        assert_eq!(fragment.date_fragment, None);
        assert_eq!(fragment.account_fragment, None);
        assert_eq!(fragment.raw_text, "Courses 20 euros");
    }

    #[test]
    fn parses_comma_decimal_amount() {
        let fragment = parse("Courses 45,90 euros").unwrap();
        assert_eq!(fragment.amount, 45.9);
    }

    #[test]
    fn parses_dot_decimal_amount() {
        let fragment = parse("Courses 45.90 euros").unwrap();
        assert_eq!(fragment.amount, 45.9);
    }

    #[test]
    fn accepts_singular_currency_word() {
        let fragment = parse("Loyer 1 euro").unwrap();
        assert_eq!(fragment.amount, 1.0);
    }

    #[test]
    fn keeps_multi_word_label_verbatim() {
        let fragment = parse("Restaurant du midi 15 euros").unwrap();
        assert_eq!(fragment.label, "Restaurant du midi");
    }

    #[test]
    fn amount_requires_currency_marker() {
        let err = parse("payer 20 balles stp").unwrap_err();
        assert_eq!(err, PipelineError::MissingAmount);
    }

    #[test]
    fn empty_text_is_missing_amount() {
        assert_eq!(parse("").unwrap_err(), PipelineError::MissingAmount);
        assert_eq!(parse("   ").unwrap_err(), PipelineError::MissingAmount);
    }

    #[test]
    fn rejects_sentence_without_label() {
        let err = parse("20 euros").unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnsupportedFormat {
                word: "20".to_string()
            }
        );
    }

    #[test]
    fn rejects_signed_amounts() {
        assert_eq!(parse("Courses -20 euros").unwrap_err(), PipelineError::MissingAmount);
        assert_eq!(parse("Courses +20 euros").unwrap_err(), PipelineError::MissingAmount);
    }

    #[test]
    fn rejects_malformed_separators() {
        assert_eq!(parse("Courses 4,5,9 euros").unwrap_err(), PipelineError::MissingAmount);
        assert_eq!(parse("Courses ,5 euros").unwrap_err(), PipelineError::MissingAmount);
        assert_eq!(parse("Courses 5, euros").unwrap_err(), PipelineError::MissingAmount);
    }

    #[test]
    fn parses_relative_date_words() {
        let today = parse("Courses 10 euros aujourd'hui").unwrap();
        assert_eq!(today.date_fragment, Some(DateFragment::RelativeToday));

        let now = parse("Courses 10 euros maintenant").unwrap();
        assert_eq!(now.date_fragment, Some(DateFragment::RelativeToday));

        let yesterday = parse("Courses 10 euros hier").unwrap();
        assert_eq!(yesterday.date_fragment, Some(DateFragment::RelativeYesterday));
    }

    #[test]
    fn accepts_curly_apostrophe_from_recognizers() {
        let fragment = parse("Courses 10 euros aujourd\u{2019}hui").unwrap();
        assert_eq!(fragment.date_fragment, Some(DateFragment::RelativeToday));
    }

    #[test]
    fn parses_explicit_day_month() {
        let fragment = parse("Salaire 1800 euros le 5 mars").unwrap();
        assert_eq!(
            fragment.date_fragment,
            Some(DateFragment::DayMonth {
                day: 5,
                month: Month::Mars
            })
        );
    }

    #[test]
    fn parses_ordinal_first_of_month() {
        let fragment = parse("Salaire 1800 euros le 1er janvier").unwrap();
        assert_eq!(
            fragment.date_fragment,
            Some(DateFragment::DayMonth {
                day: 1,
                month: Month::Janvier
            })
        );
    }

    #[test]
    fn rejects_out_of_range_day() {
        let err = parse("Courses 10 euros le 32 janvier").unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnsupportedFormat {
                word: "32".to_string()
            }
        );
    }

    #[test]
    fn rejects_truncated_date_phrase() {
        let err = parse("Courses 10 euros le 5").unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnsupportedFormat {
                word: "le".to_string()
            }
        );
    }

    #[test]
    fn parses_account_phrase_in_any_position() {
        let before = parse("Courses 10 euros carte SG hier").unwrap();
        assert_eq!(before.account_fragment, Some(AccountTag::Sg));
        assert_eq!(before.date_fragment, Some(DateFragment::RelativeYesterday));

        let after = parse("Courses 10 euros hier carte bourso").unwrap();
        assert_eq!(after.account_fragment, Some(AccountTag::Bourso));
        assert_eq!(after.date_fragment, Some(DateFragment::RelativeYesterday));
    }

    #[test]
    fn rejects_unknown_account_tag() {
        let err = parse("Courses 10 euros carte revolut").unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnsupportedFormat {
                word: "revolut".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_trailing_word() {
        let err = parse("Courses 20 euros demain").unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnsupportedFormat {
                word: "demain".to_string()
            }
        );
    }

    #[test]
    fn rejects_duplicate_date_phrase() {
        let err = parse("Courses 20 euros hier aujourd'hui").unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnsupportedFormat {
                word: "aujourd'hui".to_string()
            }
        );
    }

    #[test]
    fn rejects_duplicate_account_phrase() {
        let err = parse("Courses 20 euros carte SG carte BOURSO").unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnsupportedFormat {
                word: "carte".to_string()
            }
        );
    }

    #[test]
    fn currency_word_is_case_insensitive() {
        let fragment = parse("Courses 20 Euros").unwrap();
        assert_eq!(fragment.amount, 20.0);
    }
}
