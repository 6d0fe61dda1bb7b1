//! Tabular presentation of one project's submissions
//!
//! The table operates on the in-memory snapshot fetched once per request:
//! rows are built with the three inferred virtual columns, then filtered
//! and paged in memory. The raw document rides along with every row so the
//! drawer can show the fields no column maps to - nothing is hidden
//! because a key is "unknown".

use crate::pagination::{calculate_pagination, Pagination, PAGE_SIZE};
use chrono::{DateTime, Utc};
use formdrop_common::db::models::Submission;
use formdrop_common::fields::{self, CanonicalField};
use formdrop_common::time;
use serde::Serialize;
use uuid::Uuid;

/// One rendered table row: raw identity/timestamp, the three inferred
/// columns, and the verbatim document for the detail drawer
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Human-readable form of `created_at`, as shown and searched
    pub date: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub data: formdrop_common::fields::Document,
}

/// Build rendered rows from a snapshot, resolving the virtual columns
pub fn build_rows(submissions: &[Submission]) -> Vec<TableRow> {
    submissions
        .iter()
        .map(|s| TableRow {
            id: s.id,
            created_at: s.created_at,
            date: time::format_timestamp(&s.created_at),
            name: fields::resolve_field(&s.data, CanonicalField::Name),
            email: fields::resolve_field(&s.data, CanonicalField::Email),
            phone: fields::resolve_field(&s.data, CanonicalField::Phone),
            data: s.data.clone(),
        })
        .collect()
}

/// Free-text filter: case-insensitive substring match against each visible
/// column's rendered value. A row stays iff at least one column matches.
/// An empty query keeps everything.
pub fn filter_rows(rows: Vec<TableRow>, query: &str) -> Vec<TableRow> {
    if query.is_empty() {
        return rows;
    }
    let needle = query.to_lowercase();
    rows.into_iter()
        .filter(|row| row_matches(row, &needle))
        .collect()
}

fn row_matches(row: &TableRow, needle: &str) -> bool {
    [&row.date, &row.name, &row.email, &row.phone]
        .iter()
        .any(|column| column.to_lowercase().contains(needle))
}

/// Slice one page out of the filtered rows
pub fn page_rows(rows: Vec<TableRow>, requested_page: i64) -> (Pagination, Vec<TableRow>) {
    let pagination = calculate_pagination(rows.len() as i64, requested_page);
    let page = rows
        .into_iter()
        .skip(pagination.offset as usize)
        .take(PAGE_SIZE as usize)
        .collect();
    (pagination, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdrop_common::fields::Document;
    use serde_json::json;

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
    fn test_rows_carry_inferred_columns_and_raw_document() {
        let s = submission(&[
            ("Email", json!("ada@example.com")),
            ("company", json!("Analytical Engines")),
        ]);
        let rows = build_rows(std::slice::from_ref(&s));

        assert_eq!(rows[0].email, "ada@example.com");
        assert_eq!(rows[0].name, "N/A");
        assert_eq!(rows[0].phone, "N/A");
        // Unmapped keys stay reachable through the raw document
        assert_eq!(rows[0].data["company"], json!("Analytical Engines"));
    }

    #[test]
    fn test_filter_matches_any_column_case_insensitively() {
        let rows = build_rows(&[
            submission(&[("name", json!("John"))]),
            submission(&[("email", json!("bjones@x.com"))]),
            submission(&[("phone", json!("555-0100"))]),
        ]);

        // "jo" hits John's name and bjones' email, not the phone row
        let hits = filter_rows(rows, "jo");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "John");
        assert_eq!(hits[1].email, "bjones@x.com");
    }

    #[test]
    fn test_filter_empty_query_keeps_all_rows() {
        let rows = build_rows(&[
            submission(&[("a", json!(1))]),
            submission(&[("b", json!(2))]),
        ]);
        assert_eq!(filter_rows(rows, "").len(), 2);
    }

    #[test]
    fn test_filter_matches_rendered_date() {
        let s = submission(&[("name", json!("x"))]);
        let year = s.created_at.format("%Y").to_string();
        let rows = build_rows(std::slice::from_ref(&s));
        assert_eq!(filter_rows(rows, &year).len(), 1);
    }

    #[test]
    fn test_filter_no_match_yields_empty() {
        let rows = build_rows(&[submission(&[("name", json!("John"))])]);
        assert!(filter_rows(rows, "zzzz").is_empty());
    }

    #[test]
    fn test_paging_slices_fixed_pages() {
        let rows: Vec<TableRow> = build_rows(
            &(0..23)
                .map(|i| submission(&[("seq", json!(i))]))
                .collect::<Vec<_>>(),
        );

        let (meta, page) = page_rows(rows.clone(), 1);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(page.len(), 10);

        let (meta, page) = page_rows(rows.clone(), 3);
        assert_eq!(meta.page, 3);
        assert_eq!(page.len(), 3);

        // Out-of-bounds page clamps to the last page
        let (meta, page) = page_rows(rows, 99);
        assert_eq!(meta.page, 3);
        assert_eq!(page.len(), 3);
    }
}
