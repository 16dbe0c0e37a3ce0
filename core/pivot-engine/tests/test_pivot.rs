//! FILENAME: tests/test_pivot.rs
//! Integration tests for the full extract-sort-pivot-group pipeline.

mod common;

use common::{host_row, HostRow, LedgerFixture};
use pivot_engine::{calculate_pivot, Hierarchy, MatrixValue, PivotError};

// ============================================================================
// END-TO-END SCENARIOS
// ============================================================================

#[test]
fn quarterly_regions_pivot_with_merged_category() {
    let def = LedgerFixture::definition();
    let rows = vec![
        host_row("US»Retail", "Q1", "currency - 0", Some(100.0)),
        host_row("US»Retail", "Q2", "currency - 0", Some(200.0)),
        host_row("US»Wholesale", "Q1", "currency - 0", Some(50.0)),
    ];

    let view = calculate_pivot(&rows, &def).unwrap();

    assert_eq!(view.matrix.header(), vec!["", "Q1", "Q2"]);
    assert_eq!(view.matrix.rows.len(), 2);

    let retail = &view.matrix.rows[0];
    assert_eq!(retail.key.top_level(), "US");
    assert_eq!(retail.key.subcategory(), Some("Retail"));
    assert_eq!(
        retail.cells,
        vec![MatrixValue::Number(100.0), MatrixValue::Number(200.0)]
    );

    let wholesale = &view.matrix.rows[1];
    assert_eq!(wholesale.key.subcategory(), Some("Wholesale"));
    assert_eq!(
        wholesale.cells,
        vec![MatrixValue::Number(50.0), MatrixValue::Missing]
    );

    // Both rows share the "US" top level: one spanned cell covering 2 rows.
    assert_eq!(view.spans, [2, 0]);
}

#[test]
fn absent_measure_becomes_sentinel_cell() {
    let def = LedgerFixture::definition();
    let rows = vec![host_row("Assets»Cash", "Q1", "currency - 2", None)];

    let view = calculate_pivot(&rows, &def).unwrap();

    assert_eq!(view.matrix.rows.len(), 1);
    assert!(view.matrix.rows[0].cells[0].is_missing());
    assert_eq!(view.matrix.rows[0].cells[0].to_string(), "-");
}

#[test]
fn empty_input_yields_header_only_matrix() {
    let def = LedgerFixture::definition();
    let rows: Vec<HostRow> = Vec::new();

    let view = calculate_pivot(&rows, &def).unwrap();

    assert!(view.matrix.rows.is_empty());
    assert!(view.matrix.columns.is_empty());
    assert_eq!(view.matrix.header(), vec![""]);
    assert!(view.spans.is_empty());
}

// ============================================================================
// PIPELINE PROPERTIES ON THE LEDGER FIXTURE
// ============================================================================

#[test]
fn every_key_and_column_appears_exactly_once() {
    let view = calculate_pivot(&LedgerFixture::rows(), &LedgerFixture::definition()).unwrap();

    // Columns: distinct, sorted ascending.
    assert_eq!(view.matrix.columns, ["Forecast", "Q1", "Q2"]);

    // Keys: one body row per distinct composite key.
    let mut keys: Vec<String> = view.matrix.rows.iter().map(|r| r.key.to_string()).collect();
    let before = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), before);
    assert_eq!(before, 4);
}

#[test]
fn priority_subcategory_leads_its_category_group() {
    let view = calculate_pivot(&LedgerFixture::rows(), &LedgerFixture::definition()).unwrap();

    let subs: Vec<Option<&str>> = view.matrix.rows.iter().map(|r| r.key.subcategory()).collect();
    assert_eq!(
        subs,
        [
            Some("Ending Balance"),
            Some("Cash"),
            Some("Receivables"),
            Some("Loans"),
        ]
    );
}

#[test]
fn spans_conserve_contiguous_runs() {
    let view = calculate_pivot(&LedgerFixture::rows(), &LedgerFixture::definition()).unwrap();

    // Assets run of 3 rows, Liabilities run of 1.
    assert_eq!(view.spans, [3, 0, 0, 1]);
    assert_eq!(view.spans.iter().sum::<usize>(), view.matrix.rows.len());
    assert_eq!(view.spans.iter().filter(|&&s| s > 0).count(), 2);
}

#[test]
fn unfilled_combinations_carry_the_sentinel() {
    let view = calculate_pivot(&LedgerFixture::rows(), &LedgerFixture::definition()).unwrap();

    let forecast_col = view
        .matrix
        .columns
        .iter()
        .position(|c| c == "Forecast")
        .unwrap();

    for row in &view.matrix.rows {
        let has_forecast_record = matches!(
            (row.key.top_level(), row.key.subcategory()),
            ("Assets", Some("Cash"))
        );
        if !has_forecast_record {
            // Liabilities»Loans has a Forecast record with an absent
            // measure; everything else has no Forecast record at all.
            // Both must surface as the sentinel.
            assert!(row.cells[forecast_col].is_missing(), "row {}", row.key);
        }
    }
}

// ============================================================================
// VARIANT AND ERROR BEHAVIOR
// ============================================================================

#[test]
fn flat_hierarchy_groups_single_segment_categories() {
    let mut def = LedgerFixture::definition();
    def.hierarchy = Hierarchy::Flat;

    let rows = vec![
        host_row("Assets", "Q1", "currency - 0", Some(1.0)),
        host_row("Assets", "Q2", "currency - 0", Some(2.0)),
        host_row("Liabilities", "Q1", "currency - 0", Some(3.0)),
    ];
    let view = calculate_pivot(&rows, &def).unwrap();

    assert_eq!(view.matrix.rows.len(), 2);
    assert_eq!(view.matrix.rows[0].key.subcategory(), None);
    assert_eq!(view.spans, [1, 1]);
}

#[test]
fn mixed_depth_rows_abort_the_refresh() {
    let def = LedgerFixture::definition();
    let rows = vec![
        host_row("Assets»Cash", "Q1", "currency - 0", Some(1.0)),
        host_row("Orphan", "Q1", "currency - 0", Some(2.0)),
    ];

    let err = calculate_pivot(&rows, &def).unwrap_err();
    assert!(matches!(err, PivotError::Engine(_)));
}

#[test]
fn misconfigured_axis_name_is_fatal() {
    let mut def = LedgerFixture::definition();
    def.value_axis = "Revenue".to_string();

    let err = calculate_pivot(&LedgerFixture::rows(), &def).unwrap_err();
    assert!(matches!(err, PivotError::Extract(_)));
}
