//! Aggregate statistics over the expense collection.
//!
//! The money figures always cover the whole collection, regardless of which filters are active.
//! Only the visible-row counter of a `View` reflects the filtered table.

use crate::model::{Amount, CurrencyFormat, Expense, PeriodKey};
use crate::query::{derive, QuerySpec};
use chrono::NaiveDate;
use serde::Serialize;

/// Totals over the entire collection.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of all amounts.
    pub total: Amount,
    /// Sum of the amounts dated in the same year and month as `now`.
    pub current_period_total: Amount,
    /// The largest single amount, zero when the collection is empty.
    pub max_amount: Amount,
    /// The number of records in the collection.
    pub count: usize,
}

impl Summary {
    /// Renders the three money figures with `format`, in the order total, current period, max.
    pub fn formatted(&self, format: &CurrencyFormat) -> [String; 3] {
        [
            format.format(self.total),
            format.format(self.current_period_total),
            format.format(self.max_amount),
        ]
    }
}

/// Computes the `Summary` of `expenses` relative to the calendar month of `now`.
pub fn summarize(expenses: &[Expense], now: NaiveDate) -> Summary {
    let current = PeriodKey::of(now);
    let mut summary = Summary {
        count: expenses.len(),
        ..Summary::default()
    };
    for expense in expenses {
        let amount = expense.amount();
        summary.total = summary.total + amount;
        if expense.period() == Some(current) {
            summary.current_period_total = summary.current_period_total + amount;
        }
        if amount > summary.max_amount {
            summary.max_amount = amount;
        }
    }
    summary
}

/// What the expense table shows: the derived rows plus the whole-collection summary.
#[derive(Debug, Clone, Serialize)]
pub struct View<'a> {
    pub rows: Vec<&'a Expense>,
    pub summary: Summary,
}

impl<'a> View<'a> {
    /// Derives the rows for `spec` and summarizes the full collection.
    pub fn new(expenses: &'a [Expense], spec: &QuerySpec, now: NaiveDate) -> Self {
        Self {
            rows: derive(expenses, spec),
            summary: summarize(expenses, now),
        }
    }

    /// The number of rows that passed the filters. This can be smaller than `summary.count`.
    pub fn visible_count(&self) -> usize {
        self.rows.len()
    }
}
