//! Field inference engine
//!
//! Submissions carry no declared schema, so the dashboard and the export
//! serializer infer three canonical fields (Name, Email, Phone) from
//! whatever keys a submitter happened to use. Resolution scans the
//! document's keys in insertion order and takes the first key whose
//! lower-cased spelling appears in the field's alias set.
//!
//! First-match-wins is a documented heuristic, not a correctness guarantee:
//! a payload containing two plausible aliases (`{"Full_Name": "A",
//! "name": "B"}`) resolves to whichever key was sent first. Both read paths
//! call this module, so they always agree on the result.

use serde_json::Value;

/// A schema-less submission payload: arbitrary string keys mapped to
/// arbitrary JSON values, iterated in insertion order.
///
/// Requires the `preserve_order` feature of serde_json; without it the map
/// would iterate alphabetically and alias resolution would not match the
/// order the submitter sent.
pub type Document = serde_json::Map<String, Value>;

/// Sentinel rendered when no key of a document matches an alias set
pub const NOT_AVAILABLE: &str = "N/A";

/// The three canonical fields inferred from submission keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Name,
    Email,
    Phone,
}

impl CanonicalField {
    /// All canonical fields, in display order
    pub const ALL: [CanonicalField; 3] = [
        CanonicalField::Name,
        CanonicalField::Email,
        CanonicalField::Phone,
    ];

    /// Accepted key spellings for this field (compared lower-cased)
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Name => &["name", "fullname", "full_name", "username"],
            CanonicalField::Email => &["email", "mail", "e-mail"],
            CanonicalField::Phone => &["phone", "mobile", "cell", "contact"],
        }
    }

    /// Column header used by the table and the export summary sheet
    pub fn label(self) -> &'static str {
        match self {
            CanonicalField::Name => "Name",
            CanonicalField::Email => "Email",
            CanonicalField::Phone => "Phone",
        }
    }
}

/// Resolve an alias set against a document.
///
/// Returns the value of the first key (in insertion order) whose
/// lower-cased form appears in `aliases`, or `None` when no key matches.
pub fn resolve_alias<'a>(doc: &'a Document, aliases: &[&str]) -> Option<&'a Value> {
    doc.iter()
        .find(|(key, _)| aliases.contains(&key.to_lowercase().as_str()))
        .map(|(_, value)| value)
}

/// Resolve a canonical field to its rendered string form.
///
/// An unmatched field renders as the `"N/A"` sentinel.
pub fn resolve_field(doc: &Document, field: CanonicalField) -> String {
    match resolve_alias(doc, field.aliases()) {
        Some(value) => render_value(value),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Compute the set of distinct keys observed across a batch of documents,
/// in first-seen order.
///
/// Used to build the dynamic column set of the export details sheet: every
/// observed key becomes a column, and rows missing a key contribute an
/// empty cell for it.
pub fn key_union<'a, I>(docs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut keys: Vec<String> = Vec::new();
    for doc in docs {
        for key in doc.keys() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

/// Render any JSON value as a display string.
///
/// Strings render verbatim, null as empty, and everything else (numbers,
/// booleans, nested objects/arrays) as compact JSON. Shared by the table
/// filter, the table cells, and the export cells.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
