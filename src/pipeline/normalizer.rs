//! Field resolution: literal fragments to a complete transaction record.
//!
//! One resolver per output field, each with the same shape: take what the
//! sentence said, fall back to the caller's context, fail typed. No field is
//! ever invented, and spoken words always beat context defaults.

use chrono::{Datelike, NaiveDate};

use crate::domain::{
    AccountTag, Category, DateFragment, ParsedFragment, ResolutionContext,
    TransactionCreateInput, TransactionType,
};
use crate::pipeline::PipelineError;

/// Labels that imply an income on their own.
pub const INCOME_LABELS: [&str; 3] = ["salaire", "prime", "remboursement"];

/// Any label containing this keyword is a subscription, whatever the vendor.
pub const SUBSCRIPTION_KEYWORD: &str = "abonnement";

/// The closed label-to-category table. Lookup is case-insensitive on the
/// left column; the right column is the backend vocabulary.
pub const CATEGORY_TABLE: [(&str, Category); 10] = [
    ("courses", Category::Courses),
    ("carburant", Category::Carburant),
    ("restaurant", Category::Restaurant),
    ("loyer", Category::Loyer),
    ("transport", Category::Transport),
    ("pharmacie", Category::Pharmacie),
    ("salaire", Category::Salaire),
    ("prime", Category::Prime),
    ("remboursement", Category::Remboursement),
    ("abonnement", Category::Abonnement),
];

/// Resolve every field of a fragment into a persistence-ready record.
///
/// Neither input is mutated; calling twice with the same values yields the
/// same record. The first unresolvable field aborts with its typed error,
/// checked in field order: date, account, type, category.
pub fn normalize(
    fragment: &ParsedFragment,
    context: &ResolutionContext,
) -> Result<TransactionCreateInput, PipelineError> {
    let date = resolve_date(fragment.date_fragment, context.default_date)?;
    let account = resolve_account(fragment.account_fragment, context.default_account)?;
    let transaction_type = resolve_type(&fragment.label, context.default_type)?;
    let category = resolve_category(&fragment.label)?;

    Ok(TransactionCreateInput {
        date,
        label: fragment.label.clone(),
        amount: fragment.amount,
        category,
        account,
        transaction_type,
    })
}

/// Every date path needs the anchor: relative words resolve against it and
/// explicit day/month phrases borrow its year.
fn resolve_date(
    fragment: Option<DateFragment>,
    default_date: Option<NaiveDate>,
) -> Result<NaiveDate, PipelineError> {
    let anchor = default_date.ok_or(PipelineError::MissingDate)?;
    match fragment {
        None | Some(DateFragment::RelativeToday) => Ok(anchor),
        Some(DateFragment::RelativeYesterday) => {
            anchor.pred_opt().ok_or(PipelineError::MissingDate)
        }
        Some(DateFragment::DayMonth { day, month }) => {
            // "le 31 février" parses but names no real date.
            NaiveDate::from_ymd_opt(anchor.year(), month.number(), day)
                .ok_or(PipelineError::MissingDate)
        }
    }
}

fn resolve_account(
    fragment: Option<AccountTag>,
    default_account: Option<AccountTag>,
) -> Result<AccountTag, PipelineError> {
    fragment
        .or(default_account)
        .ok_or(PipelineError::MissingAccount)
}

fn resolve_type(
    label: &str,
    default_type: Option<TransactionType>,
) -> Result<TransactionType, PipelineError> {
    // An income label wins even when the caller supplied an expense default.
    if INCOME_LABELS.contains(&label.to_lowercase().as_str()) {
        return Ok(TransactionType::Income);
    }
    default_type.ok_or(PipelineError::MissingType)
}

fn resolve_category(label: &str) -> Result<Category, PipelineError> {
    let lowered = label.to_lowercase();
    // "Abonnement Netflix" and friends: the keyword decides, the vendor does not.
    if lowered.contains(SUBSCRIPTION_KEYWORD) {
        return Ok(Category::Abonnement);
    }
    CATEGORY_TABLE
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, category)| *category)
        .ok_or_else(|| PipelineError::MissingCategory {
            label: label.to_string(),
        })
}
