use crate::error::{ErrorType, IntoResult, Result};
use crate::model::{Expense, Theme};
use crate::storage::{KeyValueStore, EXPENSES_KEY, THEME_KEY};
use anyhow::Context;
use serde_json::Value;
use tracing::{debug, warn};

/// Reads and writes the expense list under a fixed key of a `KeyValueStore`.
///
/// `load` is the only place that tolerates malformed stored data: anything that is not a JSON
/// array of record objects loads as an empty list.
#[derive(Debug, Clone)]
pub struct Persistence<S>
where
    S: KeyValueStore,
{
    kv: S,
}

impl<S> Persistence<S>
where
    S: KeyValueStore,
{
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// The backing key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Loads the stored expense list. Never fails: an absent key, an unreadable store, or a value
    /// that is not a list of records all yield an empty list.
    pub fn load(&self) -> Vec<Expense> {
        let text = match self.kv.get(EXPENSES_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("No stored expenses under '{EXPENSES_KEY}'");
                return Vec::new();
            }
            Err(e) => {
                warn!("Unable to read stored expenses, starting empty: {e:#}");
                return Vec::new();
            }
        };
        let value: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored expenses are not valid JSON, starting empty: {e}");
                return Vec::new();
            }
        };
        match decode_list(&value) {
            Some(expenses) => {
                debug!("Loaded {} expenses", expenses.len());
                expenses
            }
            None => {
                warn!("Stored expenses are not a list of records, starting empty");
                Vec::new()
            }
        }
    }

    /// Writes the full expense list, replacing whatever was stored before.
    pub fn save(&self, expenses: &[Expense]) -> Result<()> {
        let json = serde_json::to_string(expenses)
            .context("Unable to serialize expenses")
            .pub_result(ErrorType::Storage)?;
        self.kv
            .set(EXPENSES_KEY, &json)
            .context("Unable to save expenses")
            .pub_result(ErrorType::Storage)?;
        debug!("Saved {} expenses", expenses.len());
        Ok(())
    }

    /// Loads the theme preference, falling back to the default theme on any problem.
    pub fn load_theme(&self) -> Theme {
        match self.kv.get(THEME_KEY) {
            Ok(Some(s)) => Theme::from_stored(&s),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Unable to read the theme preference: {e:#}");
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.kv
            .set(THEME_KEY, theme.as_stored())
            .context("Unable to save the theme preference")
            .pub_result(ErrorType::Storage)
    }
}

/// Decodes a JSON array of record objects. Returns `None` if `value` is not an array or if any
/// element is not an object.
pub(crate) fn decode_list(value: &Value) -> Option<Vec<Expense>> {
    value.as_array()?.iter().map(Expense::from_value).collect()
}
