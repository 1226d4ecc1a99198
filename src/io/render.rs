//! Text rendering of grid state and command results
//!
//! Every function here only reads editor state.

use std::fmt::Write;

use crate::algorithm::correction::CorrectionResult;
use crate::algorithm::tester::TestReport;
use crate::spatial::{Catalog, GridStore};

/// Draw the grid as one symbol per cell with row and column indices
pub fn render_grid(grid: &GridStore) -> String {
    let size = grid.size();
    let label_width = size.saturating_sub(1).to_string().len();
    let mut out = String::with_capacity((size + label_width + 2) * (size + 1));

    out.push_str(&" ".repeat(label_width + 1));
    for col in 0..size {
        // Single digit keeps columns aligned with one symbol per cell
        let _ = write!(out, "{}", col % 10);
    }
    out.push('\n');

    for (row, cells) in grid.cells().rows().into_iter().enumerate() {
        let _ = write!(out, "{row:>label_width$} ");
        out.extend(cells.iter().map(|kind| kind.symbol()));
        out.push('\n');
    }

    out
}

/// List every occupied cell as `(row, col) = Name`
pub fn describe_components(grid: &GridStore, catalog: &Catalog) -> String {
    let mut out = String::new();
    for ((row, col), &kind) in grid.cells().indexed_iter() {
        if kind.is_component() {
            let _ = writeln!(out, "({row}, {col}) = {}", catalog.name_of(kind));
        }
    }
    if out.is_empty() {
        out.push_str("(no components placed)\n");
    }
    out
}

/// Table of codes, symbols and names
pub fn render_legend(catalog: &Catalog) -> String {
    let mut out = String::new();
    for entry in catalog.entries() {
        let _ = writeln!(
            out,
            "{:>2}  {}  {}",
            entry.kind.code(),
            entry.symbol,
            entry.name
        );
    }
    out
}

/// Pass/fail line followed by one line per violation
pub fn render_report(report: &TestReport) -> String {
    if report.passed() {
        return "PASS\n".to_string();
    }

    let mut out = format!("FAIL: {} violation(s)\n", report.violations.len());
    for violation in &report.violations {
        let _ = writeln!(out, "  - {violation}");
    }
    out
}

/// Summary of a correction and the cells it changed
pub fn render_correction(result: &CorrectionResult) -> String {
    let mut out = format!("Correction changed {} cell(s)", result.cells_changed());
    if let Some(radius) = result.radius {
        let _ = write!(out, " (reshaped radius {radius})");
    }
    out.push('\n');
    for edit in &result.edits {
        let _ = writeln!(out, "  {edit}");
    }
    out
}
