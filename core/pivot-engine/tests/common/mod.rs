//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for pivot pipeline integration tests.

use std::collections::HashMap;

use pivot_engine::{PivotDefinition, SourceRow};

/// In-memory stand-in for one host row.
pub struct HostRow {
    categorical: HashMap<String, String>,
    continuous: HashMap<String, Option<f64>>,
}

impl SourceRow for HostRow {
    fn categorical(&self, axis: &str) -> Option<&str> {
        self.categorical.get(axis).map(String::as_str)
    }

    fn continuous(&self, axis: &str) -> Option<Option<f64>> {
        self.continuous.get(axis).copied()
    }
}

/// Builds one host row with the standard ledger axes.
pub fn host_row(category: &str, period: &str, format: &str, value: Option<f64>) -> HostRow {
    let mut categorical = HashMap::new();
    categorical.insert("Category".to_string(), category.to_string());
    categorical.insert("Period".to_string(), period.to_string());
    categorical.insert("Format".to_string(), format.to_string());

    let mut continuous = HashMap::new();
    continuous.insert("Amount".to_string(), value);

    HostRow {
        categorical,
        continuous,
    }
}

/// Fixture data: a small financial ledger with two-level categories,
/// quarterly periods, and a forecast column.
pub struct LedgerFixture;

impl LedgerFixture {
    pub fn definition() -> PivotDefinition {
        PivotDefinition::new("Category", "Period", "Format", "Amount")
    }

    pub fn rows() -> Vec<HostRow> {
        vec![
            host_row("Assets»Cash", "Q1", "currency - 2", Some(1200.0)),
            host_row("Assets»Cash", "Q2", "currency - 2", Some(1350.5)),
            host_row("Assets»Cash", "Forecast", "currency - 2", Some(1500.0)),
            host_row("Assets»Receivables", "Q1", "currency - 2", Some(800.0)),
            host_row("Assets»Receivables", "Q2", "currency - 2", Some(650.0)),
            host_row("Assets»Ending Balance", "Q1", "currency - 2", Some(2000.0)),
            host_row("Assets»Ending Balance", "Q2", "currency - 2", Some(2000.5)),
            host_row("Liabilities»Loans", "Q1", "currency - 2", Some(400.0)),
            host_row("Liabilities»Loans", "Forecast", "currency - 2", None),
        ]
    }
}
