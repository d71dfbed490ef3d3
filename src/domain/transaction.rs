//! Transaction-side value types.
//!
//! [`TransactionCreateInput`] is the pipeline's terminal value: every field
//! is concrete and it serializes to the exact JSON shape the transaction
//! backend accepts. [`ResolutionContext`] carries the caller-supplied
//! defaults the normalizer may fall back to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fragment::AccountTag;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Parse a configuration or CLI token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_uppercase().as_str() {
            "INCOME" => Some(TransactionType::Income),
            "EXPENSE" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// The wire name, as serialized.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The closed category vocabulary of the transaction backend.
///
/// Categories are display strings on the wire ("Courses", not "courses").
/// A label outside this vocabulary is a normalization error; the pipeline
/// never invents an "Other" bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Courses,
    Carburant,
    Restaurant,
    Loyer,
    Transport,
    Pharmacie,
    Salaire,
    Prime,
    Remboursement,
    Abonnement,
}

impl Category {
    /// The display name, as serialized.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Courses => "Courses",
            Category::Carburant => "Carburant",
            Category::Restaurant => "Restaurant",
            Category::Loyer => "Loyer",
            Category::Transport => "Transport",
            Category::Pharmacie => "Pharmacie",
            Category::Salaire => "Salaire",
            Category::Prime => "Prime",
            Category::Remboursement => "Remboursement",
            Category::Abonnement => "Abonnement",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied defaults for fields an utterance may leave out.
///
/// Every field is optional. The normalizer consults a default only when the
/// sentence said nothing about that field; it never overrides spoken words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionContext {
    /// Anchor date for relative and year-less phrases
    pub default_date: Option<NaiveDate>,
    /// Account used when the sentence names none
    pub default_account: Option<AccountTag>,
    /// Type used when the label implies none
    pub default_type: Option<TransactionType>,
}

/// A complete transaction record, ready for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCreateInput {
    /// Transaction date
    pub date: NaiveDate,
    /// Label exactly as spoken, case preserved
    pub label: String,
    /// Amount in euros
    pub amount: f64,
    /// Backend category
    pub category: Category,
    /// Paying account
    pub account: AccountTag,
    /// Income or expense
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}
