//! These structs provide the CLI interface for the pennywise CLI.

use crate::model::{Amount, ExpenseFields, Grouping, PeriodKey, Theme};
use crate::query::{QuerySpec, SortKey};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// pennywise: A command-line expense tracker.
///
/// Record what you spend, list it with filters and sorting, see totals for the whole history and
/// for the current month, and move your data in and out as a JSON file. Everything is kept in a
/// local data directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory, the data directory and the configuration file.
    ///
    /// This is the first command you should run. By default the home directory is
    /// $HOME/pennywise; pass --pennywise-home or set PENNYWISE_HOME to put it somewhere else.
    Init(InitArgs),
    /// Record a new expense.
    Add(ExpenseArgs),
    /// Replace every field of an existing expense.
    Update(UpdateArgs),
    /// Delete an expense. Deleting an id that does not exist is not an error.
    Delete(DeleteArgs),
    /// Show expenses, optionally filtered and sorted, followed by the totals.
    List(ListArgs),
    /// Show the totals only.
    Stats,
    /// Write all expenses to a pretty-printed JSON file.
    Export(ExportArgs),
    /// Replace all expenses with the contents of a JSON file.
    Import(ImportArgs),
    /// Delete all expenses.
    Clear(ClearArgs),
    /// Show the theme preference, set it, or toggle it.
    Theme(ThemeArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where pennywise data and configuration is held. Defaults to ~/pennywise
    #[arg(long, env = "PENNYWISE_HOME", default_value_t = default_pennywise_home())]
    pennywise_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, pennywise_home: PathBuf) -> Self {
        Self {
            log_level,
            pennywise_home: pennywise_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn pennywise_home(&self) -> &DisplayPath {
        &self.pennywise_home
    }
}

/// Args for the `pennywise init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The symbol printed in front of amounts.
    #[arg(long, default_value = "₹")]
    currency_symbol: String,

    /// How the digits of large amounts are grouped.
    #[arg(long, value_enum, default_value_t = Grouping::Indian)]
    grouping: Grouping,
}

impl InitArgs {
    pub fn new(currency_symbol: impl Into<String>, grouping: Grouping) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            grouping,
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }
}

/// The fields of an expense, used by `pennywise add` and `pennywise update`.
#[derive(Debug, Parser, Clone)]
pub struct ExpenseArgs {
    /// The date of the expense as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<String>,

    /// A short label such as Food or Transport.
    #[arg(long)]
    category: String,

    /// What the money was spent on.
    #[arg(long)]
    description: String,

    /// The amount spent. A leading currency symbol and grouping commas are accepted.
    #[arg(long, allow_hyphen_values = true)]
    amount: Amount,

    /// How it was paid, e.g. UPI, Cash or Card.
    #[arg(long, default_value = "")]
    method: String,
}

impl ExpenseArgs {
    pub fn new(
        date: Option<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Amount,
        method: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            description: description.into(),
            amount,
            method: method.into(),
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// The unvalidated fields, with `today` standing in for an absent date.
    pub fn fields(&self, today: &str) -> ExpenseFields {
        ExpenseFields::new(
            self.date.as_deref().unwrap_or(today),
            &self.category,
            &self.description,
            self.amount,
            &self.method,
        )
    }
}

/// Args for the `pennywise update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The id of the expense to replace.
    #[arg(long)]
    id: String,

    #[clap(flatten)]
    expense: ExpenseArgs,
}

impl UpdateArgs {
    pub fn new(id: impl Into<String>, expense: ExpenseArgs) -> Self {
        Self {
            id: id.into(),
            expense,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn expense(&self) -> &ExpenseArgs {
        &self.expense
    }
}

/// Args for the `pennywise delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the expense to delete.
    #[arg(long)]
    id: String,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `pennywise list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Only show expenses dated in this month, given as YYYY-MM.
    #[arg(long)]
    month: Option<PeriodKey>,

    /// Only show expenses with exactly this category.
    #[arg(long)]
    category: Option<String>,

    /// Only show expenses whose description, method or category contains this text, ignoring
    /// case.
    #[arg(long)]
    search: Option<String>,

    /// One of date-asc, date-desc, amount-asc, amount-desc. Without it, the newest-added
    /// expense comes first.
    #[arg(long)]
    sort: Option<SortKey>,
}

impl ListArgs {
    pub fn new(
        month: Option<PeriodKey>,
        category: Option<String>,
        search: Option<String>,
        sort: Option<SortKey>,
    ) -> Self {
        Self {
            month,
            category,
            search,
            sort,
        }
    }

    /// The filter and sort choices these arguments describe.
    pub fn query(&self) -> QuerySpec {
        QuerySpec {
            period: self.month,
            category: self.category.clone(),
            search: self.search.clone(),
            sort: self.sort.unwrap_or_default(),
        }
    }
}

/// Args for the `pennywise export` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ExportArgs {
    /// The directory to write the export file into. Defaults to the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(out: Option<PathBuf>) -> Self {
        Self { out }
    }

    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

/// Args for the `pennywise import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// A JSON file holding a list of expenses, such as one written by `pennywise export`.
    file: PathBuf,
}

impl ImportArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Args for the `pennywise clear` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ClearArgs {
    /// Confirms that every expense should be deleted.
    #[arg(long)]
    yes: bool,
}

impl ClearArgs {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `pennywise theme` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ThemeArgs {
    /// The theme to switch to. Without it, the current preference is shown.
    #[arg(value_enum)]
    theme: Option<Theme>,

    /// Switch to the other theme.
    #[arg(long, conflicts_with = "theme")]
    toggle: bool,
}

impl ThemeArgs {
    pub fn new(theme: Option<Theme>, toggle: bool) -> Self {
        Self { theme, toggle }
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn toggle(&self) -> bool {
        self.toggle
    }
}

fn default_pennywise_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("pennywise"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --pennywise-home or PENNYWISE_HOME instead of relying on the \
                default pennywise home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("pennywise")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
