//! Export serializer
//!
//! Turns one project's submissions snapshot into a two-sheet XLSX
//! workbook: a Summary sheet with the fixed inferred columns, and a
//! Details sheet whose columns are discovered at runtime from the data.
//!
//! Column discovery is two-pass: the key union over the whole batch fixes
//! the column set, then every row is projected against it, so the sheet is
//! rectangular with empty cells where a row lacks a key.

use formdrop_common::db::models::Submission;
use formdrop_common::fields::{self, CanonicalField};
use formdrop_common::time;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::fmt;

/// Fixed column set of the summary sheet
pub const SUMMARY_COLUMNS: [&str; 5] = ["ID", "Date", "Name", "Email", "Phone"];

/// Export failure modes
#[derive(Debug)]
pub enum ExportError {
    /// The input batch was empty; no file is produced
    EmptyExportSet,
    /// Workbook serialization failed
    Workbook(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptyExportSet => write!(f, "No data to export"),
            ExportError::Workbook(msg) => write!(f, "Workbook error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<XlsxError> for ExportError {
    fn from(e: XlsxError) -> Self {
        ExportError::Workbook(e.to_string())
    }
}

/// Summary sheet rows: one per submission, fixed columns.
///
/// Name/Email/Phone come from the same alias resolution the table uses, so
/// the two paths cannot disagree for identical input.
pub fn summary_rows(submissions: &[Submission]) -> Vec<[String; 5]> {
    submissions
        .iter()
        .map(|s| {
            [
                s.id.to_string(),
                time::format_timestamp(&s.created_at),
                fields::resolve_field(&s.data, CanonicalField::Name),
                fields::resolve_field(&s.data, CanonicalField::Email),
                fields::resolve_field(&s.data, CanonicalField::Phone),
            ]
        })
        .collect()
}

/// Details sheet column headers: the fixed identity columns followed by
/// the key union over the batch, in first-seen order
pub fn details_columns(submissions: &[Submission]) -> Vec<String> {
    let mut columns = vec!["Submission ID".to_string(), "Date".to_string()];
    columns.extend(fields::key_union(submissions.iter().map(|s| &s.data)));
    columns
}

/// Details sheet rows projected against the fixed column set.
///
/// `dynamic_keys` is `details_columns` minus the two identity columns. A
/// row missing a key renders an empty cell, never a null.
pub fn details_rows(submissions: &[Submission], dynamic_keys: &[String]) -> Vec<Vec<String>> {
    submissions
        .iter()
        .map(|s| {
            let mut row = vec![s.id.to_string(), time::format_timestamp(&s.created_at)];
            for key in dynamic_keys {
                row.push(
                    s.data
                        .get(key)
                        .map(fields::render_value)
                        .unwrap_or_default(),
                );
            }
            row
        })
        .collect()
}

/// Build the complete workbook as XLSX bytes.
///
/// An empty batch aborts with `EmptyExportSet` before any workbook state
/// is created - this is the only validation the export path performs.
pub fn build_workbook(submissions: &[Submission]) -> Result<Vec<u8>, ExportError> {
    if submissions.is_empty() {
        return Err(ExportError::EmptyExportSet);
    }

    let summary = summary_rows(submissions);
    let columns = details_columns(submissions);
    let dynamic_keys = &columns[2..];
    let details = details_rows(submissions, dynamic_keys);

    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary")?;
    for (col, header) in SUMMARY_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (r, row) in summary.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet.write_string(r as u32 + 1, c as u16, cell)?;
        }
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Details")?;
    for (col, header) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }
    for (r, row) in details.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet.write_string(r as u32 + 1, c as u16, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table;
    use formdrop_common::fields::Document;
    use serde_json::json;
    use uuid::Uuid;

    fn submission(pairs: &[(&str, serde_json::Value)]) -> Submission {
        let data: Document = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Submission {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            created_at: time::now(),
            data,
        }
    }

    #[test]
    fn test_empty_batch_produces_no_file() {
        assert!(matches!(
            build_workbook(&[]),
            Err(ExportError::EmptyExportSet)
        ));
    }

    #[test]
    fn test_summary_uses_alias_resolution() {
        let subs = vec![submission(&[
            ("Full_Name", json!("A")),
            ("name", json!("B")),
            ("e-mail", json!("a@b.c")),
        ])];
        let rows = summary_rows(&subs);
        assert_eq!(rows[0][2], "A");
        assert_eq!(rows[0][3], "a@b.c");
        assert_eq!(rows[0][4], "N/A");
    }

    #[test]
    fn test_summary_and_table_resolve_identically() {
        let subs = vec![
            submission(&[("Full_Name", json!("A")), ("name", json!("B"))]),
            submission(&[("contact", json!("555-0100"))]),
            submission(&[("company", json!("Acme"))]),
        ];

        let table_rows = table::build_rows(&subs);
        let export_rows = summary_rows(&subs);

        for (t, e) in table_rows.iter().zip(export_rows.iter()) {
            assert_eq!(t.name, e[2]);
            assert_eq!(t.email, e[3]);
            assert_eq!(t.phone, e[4]);
        }
    }

    #[test]
    fn test_details_projects_rows_against_key_union() {
        let subs = vec![
            submission(&[("a", json!(1))]),
            submission(&[("b", json!(2))]),
        ];

        let columns = details_columns(&subs);
        assert_eq!(columns, vec!["Submission ID", "Date", "a", "b"]);

        let rows = details_rows(&subs, &columns[2..]);
        // Row 1 has no "b", row 2 has no "a" - both render as empty string
        assert_eq!(rows[0][2], "1");
        assert_eq!(rows[0][3], "");
        assert_eq!(rows[1][2], "");
        assert_eq!(rows[1][3], "2");
    }

    #[test]
    fn test_details_renders_nested_values_as_json() {
        let subs = vec![submission(&[("meta", json!({"k": [1, 2]}))])];
        let columns = details_columns(&subs);
        let rows = details_rows(&subs, &columns[2..]);
        assert_eq!(rows[0][2], r#"{"k":[1,2]}"#);
    }

    #[test]
    fn test_non_empty_batch_builds_workbook_bytes() {
        let subs = vec![submission(&[("name", json!("Ada"))])];
        let bytes = build_workbook(&subs).unwrap();
        // XLSX is a zip container; check the magic instead of parsing
        assert_eq!(&bytes[0..2], b"PK");
    }
}
