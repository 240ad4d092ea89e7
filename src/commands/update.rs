//! Update command handler.

use crate::args::UpdateArgs;
use crate::commands::{today, Out};
use crate::model::Expense;
use crate::{Config, Result};

/// Replaces every field of the expense with the given id. Its position in the collection does
/// not change.
///
/// # Errors
/// - `ErrorType::NotFound` if no expense has that id.
/// - `ErrorType::Validation` if a required field is blank or the amount is negative.
pub fn update(config: Config, args: UpdateArgs) -> Result<Out<Expense>> {
    let mut store = config.open_store()?;
    let fields = args
        .expense()
        .fields(&today().format("%Y-%m-%d").to_string());
    let expense = store.update(args.id(), fields)?;
    Ok(Out::new(format!("Updated expense {}", expense.id()), expense))
}
