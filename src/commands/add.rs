use crate::args::ExpenseArgs;
use crate::commands::{today, Out};
use crate::model::Expense;
use crate::{Config, Result};

/// Records a new expense. A missing date means today.
///
/// The expense is saved before this returns. If the save fails the error is returned and nothing
/// is kept, since the store only lives for the duration of the command.
pub fn add(config: Config, args: ExpenseArgs) -> Result<Out<Expense>> {
    let mut store = config.open_store()?;
    let fields = args.fields(&today().format("%Y-%m-%d").to_string());
    let expense = store.add(fields)?;
    let message = format!(
        "Added {} {} on {} ({})",
        expense.category(),
        config.currency_format().format(expense.amount()),
        expense.date(),
        expense.id()
    );
    Ok(Out::new(message, expense))
}
