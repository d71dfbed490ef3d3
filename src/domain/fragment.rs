//! Parse-stage value types.
//!
//! A fragment records what a sentence literally said. Date words stay
//! symbolic ("yesterday" is not yet a calendar date) and the account is a tag,
//! not an account. Turning fragments into concrete values is the normalizer's
//! job, so that the grammar stays free of clock and configuration concerns.

use serde::{Deserialize, Serialize};

/// Everything the grammar extracted from one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFragment {
    /// The utterance exactly as captured
    pub raw_text: String,
    /// Words before the amount, verbatim and order-preserving
    pub label: String,
    /// Amount in euros, always positive at this stage
    pub amount: f64,
    /// Symbolic date phrase, if the sentence carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_fragment: Option<DateFragment>,
    /// Account tag, if the sentence carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_fragment: Option<AccountTag>,
}

/// A date phrase as spoken, before any calendar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateFragment {
    /// "aujourd'hui" or "maintenant"
    RelativeToday,
    /// "hier"
    RelativeYesterday,
    /// "le <day> <month>", year left open
    DayMonth { day: u32, month: Month },
}

/// Months of the French grammar vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "janvier")]
    Janvier,
    #[serde(rename = "février")]
    Fevrier,
    #[serde(rename = "mars")]
    Mars,
    #[serde(rename = "avril")]
    Avril,
    #[serde(rename = "mai")]
    Mai,
    #[serde(rename = "juin")]
    Juin,
    #[serde(rename = "juillet")]
    Juillet,
    #[serde(rename = "août")]
    Aout,
    #[serde(rename = "septembre")]
    Septembre,
    #[serde(rename = "octobre")]
    Octobre,
    #[serde(rename = "novembre")]
    Novembre,
    #[serde(rename = "décembre")]
    Decembre,
}

impl Month {
    /// Recognize a spoken month token. Case-insensitive, and tolerant of
    /// missing accents since recognizers drop them inconsistently.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "janvier" => Some(Month::Janvier),
            "février" | "fevrier" => Some(Month::Fevrier),
            "mars" => Some(Month::Mars),
            "avril" => Some(Month::Avril),
            "mai" => Some(Month::Mai),
            "juin" => Some(Month::Juin),
            "juillet" => Some(Month::Juillet),
            "août" | "aout" => Some(Month::Aout),
            "septembre" => Some(Month::Septembre),
            "octobre" => Some(Month::Octobre),
            "novembre" => Some(Month::Novembre),
            "décembre" | "decembre" => Some(Month::Decembre),
            _ => None,
        }
    }

    /// Calendar month number, 1 through 12.
    pub const fn number(&self) -> u32 {
        match self {
            Month::Janvier => 1,
            Month::Fevrier => 2,
            Month::Mars => 3,
            Month::Avril => 4,
            Month::Mai => 5,
            Month::Juin => 6,
            Month::Juillet => 7,
            Month::Aout => 8,
            Month::Septembre => 9,
            Month::Octobre => 10,
            Month::Novembre => 11,
            Month::Decembre => 12,
        }
    }

    /// The French month name, accents included.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Month::Janvier => "janvier",
            Month::Fevrier => "février",
            Month::Mars => "mars",
            Month::Avril => "avril",
            Month::Mai => "mai",
            Month::Juin => "juin",
            Month::Juillet => "juillet",
            Month::Aout => "août",
            Month::Septembre => "septembre",
            Month::Octobre => "octobre",
            Month::Novembre => "novembre",
            Month::Decembre => "décembre",
        }
    }
}

/// Known payment account tags.
///
/// Closed set: an unknown token after the account keyword is a parse error,
/// never a free-form account name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountTag {
    /// Société Générale card
    #[serde(rename = "SG")]
    Sg,
    /// Boursorama card
    #[serde(rename = "BOURSO")]
    Bourso,
}

impl AccountTag {
    /// Recognize a spoken account token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_uppercase().as_str() {
            "SG" => Some(AccountTag::Sg),
            "BOURSO" => Some(AccountTag::Bourso),
            _ => None,
        }
    }

    /// The canonical tag used on the wire and in configuration.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccountTag::Sg => "SG",
            AccountTag::Bourso => "BOURSO",
        }
    }
}

impl std::fmt::Display for AccountTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_tokens_accept_both_spellings() {
        assert_eq!(Month::from_token("février"), Some(Month::Fevrier));
        assert_eq!(Month::from_token("fevrier"), Some(Month::Fevrier));
        assert_eq!(Month::from_token("août"), Some(Month::Aout));
        assert_eq!(Month::from_token("aout"), Some(Month::Aout));
        assert_eq!(Month::from_token("Janvier"), Some(Month::Janvier));
        assert_eq!(Month::from_token("janvier2"), None);
    }

    #[test]
    fn month_numbers_cover_the_year() {
        assert_eq!(Month::Janvier.number(), 1);
        assert_eq!(Month::Juin.number(), 6);
        assert_eq!(Month::Decembre.number(), 12);
    }

    #[test]
    fn account_tokens_fold_case() {
        assert_eq!(AccountTag::from_token("SG"), Some(AccountTag::Sg));
        assert_eq!(AccountTag::from_token("sg"), Some(AccountTag::Sg));
        assert_eq!(AccountTag::from_token("Bourso"), Some(AccountTag::Bourso));
        assert_eq!(AccountTag::from_token("revolut"), None);
    }

    #[test]
    fn date_fragment_serializes_with_kind_tag() {
        let fragment = DateFragment::DayMonth {
            day: 1,
            month: Month::Janvier,
        };
        let json = serde_json::to_value(fragment).unwrap();
        assert_eq!(json["kind"], "DAY_MONTH");
        assert_eq!(json["day"], 1);
        assert_eq!(json["month"], "janvier");

        let today = serde_json::to_value(DateFragment::RelativeToday).unwrap();
        assert_eq!(today["kind"], "RELATIVE_TODAY");
    }

    #[test]
    fn fragment_omits_absent_optionals() {
        let fragment = ParsedFragment {
            raw_text: "Courses 10 euros".to_string(),
            label: "Courses".to_string(),
            amount: 10.0,
            date_fragment: None,
            account_fragment: None,
        };
        let json = serde_json::to_value(&fragment).unwrap();
        assert!(json.get("dateFragment").is_none());
        assert!(json.get("accountFragment").is_none());
        assert_eq!(json["rawText"], "Courses 10 euros");
    }
}
