//! Domain types for App Store metadata synchronization.
//!
//! Two locale namespaces exist side by side: the translation platform's
//! locale code and the storefront's locale code. They are modelled as the
//! same [`Locale`] newtype and paired explicitly through [`LocaleMapping`];
//! nothing in this crate converts one into the other.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A language/region identifier, e.g. `en-US` or `zh-Hans`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale(pub String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Locale {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Locale {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifier of a project on the translation platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Locale mapping
// ---------------------------------------------------------------------------

/// Storefront locale used by upload when none is given.
pub const DEFAULT_LOCAL_LOCALE: &str = "en-US";

/// An explicit pairing of the platform locale with the on-disk locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMapping {
    /// Locale code understood by the translation platform.
    pub remote: Locale,
    /// Locale directory name under the metadata root.
    pub local: Locale,
}

impl LocaleMapping {
    pub fn new(remote: impl Into<Locale>, local: impl Into<Locale>) -> Self {
        Self {
            remote: remote.into(),
            local: local.into(),
        }
    }

    /// Download-side pairing: the local locale is required, the remote one
    /// falls back to it when not supplied.
    pub fn for_download(local: Locale, remote: Option<Locale>) -> Self {
        let remote = remote.unwrap_or_else(|| local.clone());
        Self { remote, local }
    }

    /// Upload-side pairing: the local locale defaults to
    /// [`DEFAULT_LOCAL_LOCALE`], the remote one to the local locale.
    pub fn for_upload(local: Option<Locale>, remote: Option<Locale>) -> Self {
        let local = local.unwrap_or_else(|| Locale::from(DEFAULT_LOCAL_LOCALE));
        let remote = remote.unwrap_or_else(|| local.clone());
        Self { remote, local }
    }
}

// ---------------------------------------------------------------------------
// Metadata fields
// ---------------------------------------------------------------------------

/// The four recognized App Store metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetadataField {
    Name,
    Description,
    ReleaseNotes,
    Keywords,
}

impl MetadataField {
    /// Every field, in the order files are read and written.
    pub fn all() -> &'static [MetadataField] {
        &[
            MetadataField::Name,
            MetadataField::Description,
            MetadataField::ReleaseNotes,
            MetadataField::Keywords,
        ]
    }

    /// File name under `{root}/{locale}/`.
    pub fn filename(self) -> &'static str {
        match self {
            MetadataField::Name => "name.txt",
            MetadataField::Description => "description.txt",
            MetadataField::ReleaseNotes => "release_notes.txt",
            MetadataField::Keywords => "keywords.txt",
        }
    }

    /// Key in the remote document.
    pub fn remote_key(self) -> &'static str {
        match self {
            MetadataField::Name => "APP_NAME",
            MetadataField::Description => "APP_DESCRIPTION",
            MetadataField::ReleaseNotes => "APP_VERSION_DESCRIPTION",
            MetadataField::Keywords => "APP_KEYWORD",
        }
    }

    /// Human-readable name used in error messages.
    pub fn human_name(self) -> &'static str {
        match self {
            MetadataField::Name => "name",
            MetadataField::Description => "description",
            MetadataField::ReleaseNotes => "release notes",
            MetadataField::Keywords => "keywords",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_name())
    }
}

// ---------------------------------------------------------------------------
// Remote document
// ---------------------------------------------------------------------------

/// Value of a single field in the remote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    /// Keyword key to keyword phrase, in source order.
    Map(IndexMap<String, String>),
    /// An explicit `null`; treated as an absent field.
    Null(()),
    /// Any other JSON. Kept verbatim so unrecognized fields survive a round
    /// trip; a recognized field in this shape is a parse failure.
    Other(serde_json::Value),
}

/// Mapping from remote field key to value. Keys outside the four recognized
/// ones are kept as-is, whatever their shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataDocument {
    pub fields: IndexMap<String, FieldValue>,
}

impl MetadataDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: MetadataField) -> Option<&FieldValue> {
        match self.fields.get(field.remote_key()) {
            Some(FieldValue::Null(())) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn insert(&mut self, field: MetadataField, value: FieldValue) {
        self.fields.insert(field.remote_key().to_owned(), value);
    }
}

/// Body of the platform's export response: `{"data": {...}}`. A missing or
/// `null` `data` member means the platform has nothing for the locale.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportEnvelope {
    #[serde(default)]
    pub data: Option<MetadataDocument>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(Locale::from("de-DE").to_string(), "de-DE");
        assert_eq!(ProjectId::from("4242").to_string(), "4242");
    }

    #[test]
    fn download_mapping_defaults_remote_to_local() {
        let m = LocaleMapping::for_download(Locale::from("fr-FR"), None);
        assert_eq!(m.remote, Locale::from("fr-FR"));
        assert_eq!(m.local, Locale::from("fr-FR"));

        let m = LocaleMapping::for_download(Locale::from("zh-Hans"), Some(Locale::from("zh-CN")));
        assert_eq!(m.remote, Locale::from("zh-CN"));
        assert_eq!(m.local, Locale::from("zh-Hans"));
    }

    #[test]
    fn upload_mapping_defaults_to_en_us() {
        let m = LocaleMapping::for_upload(None, None);
        assert_eq!(m.local.as_str(), "en-US");
        assert_eq!(m.remote.as_str(), "en-US");
    }

    #[test]
    fn field_filenames_are_distinct() {
        let names: std::collections::BTreeSet<_> =
            MetadataField::all().iter().map(|f| f.filename()).collect();
        assert_eq!(names.len(), MetadataField::all().len());
        assert_eq!(MetadataField::ReleaseNotes.filename(), "release_notes.txt");
    }

    #[test]
    fn document_keeps_unknown_keys_and_order() {
        let json = r#"{"APP_NAME":"Hi","PROMO_TEXT":"x","APP_KEYWORD":{"k2":"b","k1":"a"}}"#;
        let doc: MetadataDocument = serde_json::from_str(json).expect("parse");
        assert_eq!(serde_json::to_string(&doc).expect("encode"), json);

        let Some(FieldValue::Map(map)) = doc.get(MetadataField::Keywords) else {
            panic!("keywords should be a map");
        };
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["k2", "k1"]);
    }

    #[test]
    fn unrecognized_shapes_round_trip() {
        let json = r#"{"APP_NAME":"Hi","EXTRA_COUNT":5,"EXTRA":{"nested":{"a":1}},"FLAGS":[true]}"#;
        let doc: MetadataDocument = serde_json::from_str(json).expect("parse");
        assert!(matches!(doc.fields["EXTRA_COUNT"], FieldValue::Other(_)));
        assert_eq!(serde_json::to_string(&doc).expect("encode"), json);
    }

    #[test]
    fn null_or_missing_data_is_no_document() {
        let envelope: ExportEnvelope =
            serde_json::from_str(r#"{"meta":{"status":200},"data":null}"#).expect("parse");
        assert!(envelope.data.is_none());

        let envelope: ExportEnvelope = serde_json::from_str(r#"{"meta":{}}"#).expect("parse");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn null_field_reads_as_absent() {
        let doc: MetadataDocument =
            serde_json::from_str(r#"{"APP_NAME":null,"APP_DESCRIPTION":"d"}"#).expect("parse");
        assert!(doc.get(MetadataField::Name).is_none());
        assert!(doc.get(MetadataField::Description).is_some());
    }
}
