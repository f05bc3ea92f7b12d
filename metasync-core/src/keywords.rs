//! Keyword fitting — bound a joined keyword list to the storefront budget.
//!
//! Phrases are joined with `,` in their source order. While the joined
//! string is longer than [`KEYWORD_BUDGET`] characters the last remaining
//! phrase is dropped. Removal is strictly from the tail; shorter or later
//! phrases are never preferred over earlier ones.

use std::fmt;

use indexmap::IndexMap;

/// Maximum length of the joined keyword string, separators included.
pub const KEYWORD_BUDGET: usize = 100;

const SEPARATOR: &str = ",";

/// A phrase removed to satisfy the budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedKeyword {
    pub key: String,
    pub phrase: String,
}

impl fmt::Display for DroppedKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.phrase, self.key)
    }
}

/// Outcome of [`fit_keywords`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedKeywords {
    /// Comma-joined phrases that fit the budget.
    pub keywords: String,
    /// Character length of the full join before any truncation.
    pub original_len: usize,
    /// Dropped phrases, listed in source order.
    pub dropped: Vec<DroppedKeyword>,
}

impl FittedKeywords {
    /// Character length of [`Self::keywords`].
    pub fn len(&self) -> usize {
        self.keywords.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn was_truncated(&self) -> bool {
        !self.dropped.is_empty()
    }

    /// `"phrase (key), phrase (key)"` summary of the drop report.
    pub fn dropped_summary(&self) -> String {
        self.dropped
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn joined_len(phrases: &[(&String, &String)]) -> usize {
    let chars: usize = phrases.iter().map(|(_, p)| p.chars().count()).sum();
    chars + phrases.len().saturating_sub(1)
}

fn join(phrases: &[(&String, &String)]) -> String {
    phrases
        .iter()
        .map(|(_, p)| p.as_str())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Fit `keywords` (key → phrase, in source order) into [`KEYWORD_BUDGET`].
///
/// Never fails: an input whose first phrase alone exceeds the budget yields
/// an empty string with every phrase reported as dropped.
pub fn fit_keywords(keywords: &IndexMap<String, String>) -> FittedKeywords {
    let entries: Vec<(&String, &String)> = keywords.iter().collect();
    let original_len = joined_len(&entries);

    let mut kept = entries.len();
    let mut len = original_len;
    while kept > 0 && len > KEYWORD_BUDGET {
        kept -= 1;
        len -= entries[kept].1.chars().count();
        if kept > 0 {
            len -= SEPARATOR.len();
        }
    }

    let dropped = entries[kept..]
        .iter()
        .map(|(key, phrase)| DroppedKeyword {
            key: (*key).clone(),
            phrase: (*phrase).clone(),
        })
        .collect();

    FittedKeywords {
        keywords: join(&entries[..kept]),
        original_len,
        dropped,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
