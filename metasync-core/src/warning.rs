//! Advisory, non-fatal conditions raised during a sync pass.

use std::fmt;

use crate::keywords::{FittedKeywords, KEYWORD_BUDGET};
use crate::types::Locale;

/// A soft warning. Warnings never change control flow; they are collected
/// into pass reports for the caller to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncWarning {
    /// The downloaded keyword list exceeded the budget and was truncated.
    KeywordsTruncated(FittedKeywords),
    /// The local keyword file has no `,` separator.
    MissingKeywordSeparator,
    /// The platform returned nothing for the requested locale.
    EmptyExport { locale: Locale },
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::KeywordsTruncated(fit) => write!(
                f,
                "your keywords are {} characters long, but can't be more than {}. \
                 Removed {}. Your keywords are now {} characters: '{}'",
                fit.original_len,
                KEYWORD_BUDGET,
                fit.dropped_summary(),
                fit.len(),
                fit.keywords,
            ),
            SyncWarning::MissingKeywordSeparator => f.write_str(
                "use commas (,) to separate keywords so that multi-word phrases may be properly translated",
            ),
            SyncWarning::EmptyExport { locale } => write!(f, "no metadata found for {locale}"),
        }
    }
}
