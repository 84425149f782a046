//! Sanitization of store-native values into a portable form.
//!
//! One recursive visitor over the result tree: sequences are walked in
//! order, and the single "needs conversion" leaf type (arbitrary-precision
//! NUMERIC) becomes a plain float. Everything else passes through
//! unchanged, which keeps the visitor pure and idempotent.

use rust_decimal::prelude::ToPrimitive;

use crate::query::{Cell, ResultSet};

/// Sanitize a full result set. No `Decimal` survives past this point.
pub fn sanitize(results: ResultSet) -> ResultSet {
    ResultSet {
        columns: results.columns,
        rows: results.rows.into_iter().map(sanitize_row).collect(),
    }
}

/// Sanitize one row, preserving order.
pub fn sanitize_row(row: Vec<Cell>) -> Vec<Cell> {
    row.into_iter().map(sanitize_cell).collect()
}

/// Sanitize a single leaf value.
pub fn sanitize_cell(cell: Cell) -> Cell {
    match cell {
        Cell::Decimal(d) => Cell::Float(d.to_f64().unwrap_or(0.0)),
        other => other,
    }
}
