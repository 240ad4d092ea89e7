//! Types that represent the core data model, such as `Expense` and `Amount`.
mod amount;
mod currency;
mod expense;
mod period;
mod theme;

pub use amount::{Amount, AmountError};
pub use currency::{CurrencyFormat, Grouping};
pub use expense::{Expense, ExpenseFields};
pub use period::{parse_date, PeriodKey, PeriodKeyError};
pub use theme::Theme;

pub(crate) use currency::DEFAULT_SYMBOL;
