//! List and stats command handlers.

use crate::args::ListArgs;
use crate::commands::{plural, today, Out};
use crate::model::{CurrencyFormat, Expense};
use crate::summary::{summarize, Summary, View};
use crate::{Config, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// The structured output of `pennywise list`.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    /// The rows that passed the filters, in display order.
    pub rows: Vec<Expense>,
    /// Totals over every expense, not only the listed rows.
    pub summary: Summary,
}

impl Listing {
    pub fn visible_count(&self) -> usize {
        self.rows.len()
    }
}

/// Shows the expenses that pass the filters in `args`, in the requested order, followed by the
/// totals over the whole collection.
pub fn list(config: Config, args: ListArgs) -> Result<Out<Listing>> {
    list_at(&config, &args, today())
}

fn list_at(config: &Config, args: &ListArgs, now: NaiveDate) -> Result<Out<Listing>> {
    let store = config.open_store()?;
    let format = config.currency_format();
    let view = View::new(store.snapshot(), &args.query(), now);

    let mut message = format!(
        "Showing {} of {}",
        view.visible_count(),
        plural(view.summary.count, "expense", "expenses")
    );
    if view.rows.is_empty() {
        message.push_str("\nNo expenses found");
    }
    for row in &view.rows {
        message.push_str(&format!(
            "\n{}  {:<12}  {:<24}  {:<6}  {:>14}  {}",
            row.date(),
            row.category(),
            row.description(),
            row.method(),
            format.format(row.amount()),
            row.id()
        ));
    }
    message.push('\n');
    message.push_str(&summary_line(&view.summary, &format));

    let listing = Listing {
        rows: view.rows.into_iter().cloned().collect(),
        summary: view.summary,
    };
    Ok(Out::new(message, listing))
}

/// Shows the totals over the whole collection.
pub fn stats(config: Config) -> Result<Out<Summary>> {
    stats_at(&config, today())
}

fn stats_at(config: &Config, now: NaiveDate) -> Result<Out<Summary>> {
    let store = config.open_store()?;
    let summary = summarize(store.snapshot(), now);
    Ok(Out::new(
        summary_line(&summary, &config.currency_format()),
        summary,
    ))
}

fn summary_line(summary: &Summary, format: &CurrencyFormat) -> String {
    let [total, current, max] = summary.formatted(format);
    format!(
        "Total: {total} | This month: {current} | Highest: {max} | {}",
        plural(summary.count, "expense", "expenses")
    )
}
