//! Conversions between the remote document and the per-field local shape.
//!
//! | Field         | Remote key                | Local file          |
//! |---------------|---------------------------|---------------------|
//! | Name          | `APP_NAME`                | `name.txt`          |
//! | Description   | `APP_DESCRIPTION`         | `description.txt`   |
//! | Release notes | `APP_VERSION_DESCRIPTION` | `release_notes.txt` |
//! | Keywords      | `APP_KEYWORD`             | `keywords.txt`      |
//!
//! Keyword provenance is lossy locally: the keyword file holds only the
//! fitted, comma-joined phrases. On upload every phrase becomes both key
//! and value of the keyword map.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::MetadataError;
use crate::keywords::fit_keywords;
use crate::types::{FieldValue, Locale, LocaleMapping, MetadataDocument, MetadataField};
use crate::warning::SyncWarning;

/// Field contents for one locale directory, keyed by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFieldSet {
    /// On-disk locale the contents belong to.
    pub locale: Locale,
    pub fields: BTreeMap<MetadataField, String>,
}

impl LocaleFieldSet {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: MetadataField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: MetadataField, content: impl Into<String>) {
        self.fields.insert(field, content.into());
    }
}

/// Result of [`remote_to_local`].
#[derive(Debug, Clone)]
pub struct LocalConversion {
    pub set: LocaleFieldSet,
    pub warnings: Vec<SyncWarning>,
}

/// Result of [`local_to_remote`].
#[derive(Debug, Clone)]
pub struct RemotePayload {
    /// Platform locale the document is submitted under.
    pub locale: Locale,
    pub document: MetadataDocument,
    /// Number of phrases split out of the keyword file.
    pub keyword_count: usize,
    pub warnings: Vec<SyncWarning>,
}

/// Convert a downloaded document into per-field contents for `locales.local`.
///
/// Absent (or `null`) fields produce no entry, so no file is written for
/// them. Only the four recognized keys are shape-checked; anything else in
/// the document is ignored. The keyword map is fitted to the budget; a
/// truncation is reported as a [`SyncWarning::KeywordsTruncated`].
pub fn remote_to_local(
    doc: &MetadataDocument,
    locales: &LocaleMapping,
) -> Result<LocalConversion, MetadataError> {
    let mut set = LocaleFieldSet::new(locales.local.clone());
    let mut warnings = Vec::new();

    for field in MetadataField::all() {
        let Some(value) = doc.get(*field) else {
            tracing::debug!("remote field {} absent, skipping", field.remote_key());
            continue;
        };

        if *field != MetadataField::Keywords {
            let FieldValue::Text(text) = value else {
                return Err(shape_error(*field));
            };
            set.insert(*field, text.clone());
            continue;
        }

        let keywords = keyword_map(value).ok_or_else(|| shape_error(*field))?;
        let fit = fit_keywords(&keywords);
        if fit.was_truncated() {
            let warning = SyncWarning::KeywordsTruncated(fit.clone());
            tracing::warn!("{warning}");
            warnings.push(warning);
        }
        set.insert(*field, fit.keywords);
    }

    Ok(LocalConversion { set, warnings })
}

fn shape_error(field: MetadataField) -> MetadataError {
    MetadataError::FieldShape {
        key: field.remote_key().to_owned(),
    }
}

/// Keyword map of `APP_KEYWORD`. A `null` phrase reads as an empty one;
/// any other non-string phrase makes the whole field malformed.
fn keyword_map(value: &FieldValue) -> Option<IndexMap<String, String>> {
    match value {
        FieldValue::Map(map) => Some(map.clone()),
        FieldValue::Other(Value::Object(entries)) => entries
            .iter()
            .map(|(key, phrase)| match phrase {
                Value::String(s) => Some((key.clone(), s.clone())),
                Value::Null => {
                    tracing::debug!("keyword {key} is null, treating as empty");
                    Some((key.clone(), String::new()))
                }
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

/// Split a keyword file on `,`. Empty phrases are kept except at the tail.
pub fn split_keywords(list: &str) -> Vec<&str> {
    let mut phrases: Vec<&str> = list.split(',').collect();
    while phrases.last().is_some_and(|p| p.is_empty()) {
        phrases.pop();
    }
    phrases
}

/// Build the upload document from local field contents, addressed to
/// `locales.remote`.
pub fn local_to_remote(set: &LocaleFieldSet, locales: &LocaleMapping) -> RemotePayload {
    let mut document = MetadataDocument::new();
    let mut warnings = Vec::new();
    let mut keyword_count = 0;

    for field in MetadataField::all() {
        let Some(content) = set.get(*field) else {
            continue;
        };

        if *field != MetadataField::Keywords {
            document.insert(*field, FieldValue::Text(content.to_owned()));
            continue;
        }

        if !content.contains(',') {
            let warning = SyncWarning::MissingKeywordSeparator;
            tracing::warn!("{warning}");
            warnings.push(warning);
        }

        let phrases = split_keywords(content);
        keyword_count = phrases.len();
        if keyword_count == 1 {
            tracing::info!("found 1 keyword");
        } else {
            tracing::info!("found {keyword_count} keywords");
        }

        let keywords: IndexMap<String, String> = phrases
            .into_iter()
            .map(|p| (p.to_owned(), p.to_owned()))
            .collect();
        document.insert(*field, FieldValue::Map(keywords));
    }

    RemotePayload {
        locale: locales.remote.clone(),
        document,
        keyword_count,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
