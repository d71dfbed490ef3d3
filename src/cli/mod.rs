//! Command-line interface for voxpense.
//!
//! Provides commands for interpreting utterances, previewing parsed
//! fragments, driving a scripted capture session, adapting mobile envelopes,
//! and printing the grammar.
//!
//! Records go to stdout as JSON; status and errors go to stderr. A pipeline
//! or capture failure prints its stable code in brackets and exits nonzero.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, SecondsFormat, Utc};
use clap::{Parser, Subcommand};

use crate::capture::{capture, ScriptedRecognizer};
use crate::config;
use crate::domain::{AccountTag, CaptureRequest, ResolutionContext, TransactionType};
use crate::mobile::{adapt, CaptureEnvelope, MobileContext};
use crate::pipeline::{interpret, parse};

/// voxpense - spoken French expenses to transaction records
#[derive(Parser, Debug)]
#[command(name = "voxpense")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interpret an utterance into a complete transaction record
    Interpret {
        /// The utterance, e.g. "Courses 45,90 euros hier carte SG"
        text: String,

        /// Default date as YYYY-MM-DD (today if not provided)
        #[arg(short, long)]
        date: Option<String>,

        /// Default account when the sentence names none
        #[arg(short, long, env = "VOXPENSE_ACCOUNT")]
        account: Option<String>,

        /// Default type when the label implies none
        #[arg(short = 't', long = "type", env = "VOXPENSE_TYPE")]
        transaction_type: Option<String>,
    },

    /// Parse an utterance and print its fragments without resolving them
    Parse {
        /// The utterance
        text: String,
    },

    /// Drive a scripted capture session through the capture adapter
    Capture {
        /// Transcript the scripted recognizer will return
        #[arg(long)]
        transcript: String,

        /// Capture locale
        #[arg(long, default_value = "fr-FR")]
        locale: String,

        /// Capture instant, RFC 3339 (now if not provided)
        #[arg(long)]
        captured_at: Option<String>,

        /// Continue into the pipeline using the capture day as default date
        #[arg(long)]
        interpret: bool,

        /// Default account when the sentence names none
        #[arg(short, long, env = "VOXPENSE_ACCOUNT")]
        account: Option<String>,

        /// Default type when the label implies none
        #[arg(short = 't', long = "type", env = "VOXPENSE_TYPE")]
        transaction_type: Option<String>,
    },

    /// Validate a mobile capture envelope and interpret its text
    Mobile {
        /// Utterance text from the shell recognizer
        #[arg(long)]
        text: String,

        /// Envelope locale
        #[arg(long, default_value = "fr-FR")]
        locale: String,

        /// Capture instant, RFC 3339
        #[arg(long)]
        captured_at: String,

        /// Default account when the sentence names none
        #[arg(short, long, env = "VOXPENSE_ACCOUNT")]
        account: Option<String>,

        /// Default type when the label implies none
        #[arg(short = 't', long = "type", env = "VOXPENSE_TYPE")]
        transaction_type: Option<String>,
    },

    /// Print the accepted sentence shapes and closed vocabularies
    Grammar,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Interpret {
                text,
                date,
                account,
                transaction_type,
            } => execute_interpret(&text, date, account, transaction_type),
            Commands::Parse { text } => execute_parse(&text),
            Commands::Capture {
                transcript,
                locale,
                captured_at,
                interpret,
                account,
                transaction_type,
            } => {
                execute_capture(
                    transcript,
                    locale,
                    captured_at,
                    interpret,
                    account,
                    transaction_type,
                )
                .await
            }
            Commands::Mobile {
                text,
                locale,
                captured_at,
                account,
                transaction_type,
            } => execute_mobile(text, locale, captured_at, account, transaction_type),
            Commands::Grammar => execute_grammar(),
        }
    }
}

/// Merge flag values with config-file defaults into typed context defaults.
fn context_defaults(
    account: Option<String>,
    transaction_type: Option<String>,
) -> Result<(Option<AccountTag>, Option<TransactionType>)> {
    let config = config::config()?;

    let default_account = match account {
        Some(token) => Some(
            AccountTag::from_token(&token)
                .with_context(|| format!("Unknown account: {token} (expected SG or BOURSO)"))?,
        ),
        None => config.default_account,
    };

    let default_type = match transaction_type {
        Some(token) => Some(
            TransactionType::from_token(&token)
                .with_context(|| format!("Unknown type: {token} (expected INCOME or EXPENSE)"))?,
        ),
        None => config.default_type,
    };

    Ok((default_account, default_type))
}

/// Run the full pipeline on an utterance
fn execute_interpret(
    text: &str,
    date: Option<String>,
    account: Option<String>,
    transaction_type: Option<String>,
) -> Result<()> {
    let default_date = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date: {raw} (expected YYYY-MM-DD)"))?,
        None => Local::now().date_naive(),
    };
    let (default_account, default_type) = context_defaults(account, transaction_type)?;
    let context = ResolutionContext {
        default_date: Some(default_date),
        default_account,
        default_type,
    };

    match interpret(text, &context) {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("[{}] {}", err.code(), err);
            std::process::exit(1);
        }
    }
}

/// Print the literal fragments of an utterance (preview)
fn execute_parse(text: &str) -> Result<()> {
    match parse(text) {
        Ok(fragment) => {
            println!("{}", serde_json::to_string_pretty(&fragment)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("[{}] {}", err.code(), err);
            std::process::exit(1);
        }
    }
}

/// Run a scripted capture session, optionally continuing into the pipeline
async fn execute_capture(
    transcript: String,
    locale: String,
    captured_at: Option<String>,
    and_interpret: bool,
    account: Option<String>,
    transaction_type: Option<String>,
) -> Result<()> {
    let captured_at =
        captured_at.unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    let request = CaptureRequest {
        locale,
        captured_at,
    };
    let recognizer = ScriptedRecognizer::new(transcript);

    let raw = match capture(Some(&recognizer), &request).await {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("[{}] {}", err.code(), err);
            std::process::exit(1);
        }
    };

    if !and_interpret {
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    eprintln!("🎤 \"{}\"", raw.text);

    let (default_account, default_type) = context_defaults(account, transaction_type)?;
    let context = ResolutionContext {
        default_date: Some(raw.captured_at.date_naive()),
        default_account,
        default_type,
    };

    match interpret(&raw.text, &context) {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("[{}] {}", err.code(), err);
            std::process::exit(1);
        }
    }
}

/// Validate an envelope the way the mobile shell submits it
fn execute_mobile(
    text: String,
    locale: String,
    captured_at: String,
    account: Option<String>,
    transaction_type: Option<String>,
) -> Result<()> {
    let (default_account, default_type) = context_defaults(account, transaction_type)?;
    let envelope = CaptureEnvelope {
        text,
        locale,
        captured_at,
    };
    let context = MobileContext {
        default_account,
        default_type,
    };

    match adapt(&envelope, &context) {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("[{}] {}", err.code(), err);
            std::process::exit(1);
        }
    }
}

/// Print the V1 grammar: sentence shape, date words, and the closed sets
fn execute_grammar() -> Result<()> {
    use crate::domain::Category;
    use crate::pipeline::normalizer::{CATEGORY_TABLE, INCOME_LABELS, SUBSCRIPTION_KEYWORD};
    use crate::pipeline::parser::{
        WORD_ACCOUNT_PREFIX, WORD_DATE_PREFIX, WORD_EURO, WORD_EUROS, WORD_NOW, WORD_TODAY,
        WORD_YESTERDAY,
    };

    println!("Sentence shape:");
    println!("  <label ...> <amount> {WORD_EUROS} [date phrase] [{WORD_ACCOUNT_PREFIX} <account>]");
    println!();
    println!(
        "Amount: digits with one optional ',' or '.' separator, followed by '{WORD_EUROS}' or '{WORD_EURO}'"
    );
    println!();
    println!("Date phrases:");
    println!("  {WORD_TODAY} | {WORD_NOW}        capture day");
    println!("  {WORD_YESTERDAY}                         one day before");
    println!("  {WORD_DATE_PREFIX} <1-31|1er> <month>         explicit day, year from context");
    println!("  (month names in French, accents optional)");
    println!();
    println!(
        "Accounts ({WORD_ACCOUNT_PREFIX} ...): {} | {}",
        AccountTag::Sg,
        AccountTag::Bourso
    );
    println!();
    println!("Categories (exact label match, case-insensitive):");
    for (label, category) in CATEGORY_TABLE {
        println!("  {label:<16} -> {category}");
    }
    println!(
        "  *{SUBSCRIPTION_KEYWORD}*    -> {} (keyword match, any vendor)",
        Category::Abonnement
    );
    println!();
    println!(
        "Income labels (force type INCOME): {}",
        INCOME_LABELS.join(", ")
    );

    Ok(())
}
