//! The expense store: the single owner of the canonical expense collection.

use crate::error::{Error, ErrorType, IntoResult, Result};
use crate::model::{Expense, ExpenseFields};
use crate::storage::{decode_list, KeyValueStore, Persistence};
use crate::utils::new_id;
use anyhow::Context;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Owns the canonical, newest-first collection of expenses and persists it after every change.
///
/// Every mutation checks its input before touching the collection, so a rejected operation leaves
/// the collection as it was. When the write to storage fails, the in-memory change stands and the
/// operation returns an `ErrorType::Storage` error; the caller may ignore it.
#[derive(Debug)]
pub struct ExpenseStore<S>
where
    S: KeyValueStore,
{
    expenses: Vec<Expense>,
    persistence: Persistence<S>,
}

impl<S> ExpenseStore<S>
where
    S: KeyValueStore,
{
    /// Creates a store holding whatever `persistence` loads.
    pub fn open(persistence: Persistence<S>) -> Self {
        let expenses = persistence.load();
        Self {
            expenses,
            persistence,
        }
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// The current collection, newest first. Display order should come from `query::derive`.
    pub fn snapshot(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Validates `fields`, prepends a new record with a fresh id, and persists.
    pub fn add(&mut self, fields: ExpenseFields) -> Result<Expense> {
        let fields = fields.validate()?;
        let expense = Expense::from_fields(new_id(), fields);
        debug!("Adding expense {}", expense.id);
        self.expenses.insert(0, expense.clone());
        self.persist()?;
        Ok(expense)
    }

    /// Validates `fields` and replaces the fields of the record with `id`, keeping its position.
    pub fn update(&mut self, id: &str, fields: ExpenseFields) -> Result<Expense> {
        let fields = fields.validate()?;
        let slot = self
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::not_found(format!("Expense not found: {id}")))?;
        *slot = Expense::from_fields(id.to_string(), fields);
        let updated = slot.clone();
        debug!("Updated expense {id}");
        self.persist()?;
        Ok(updated)
    }

    /// Removes the record with `id` if there is one. Returns whether a record was removed. A
    /// missing id is not an error.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() != before;
        debug!("Delete {id}: removed={removed}");
        self.persist()?;
        Ok(removed)
    }

    /// Replaces the whole collection with `value`, which must be a JSON array of record objects.
    /// Ids are taken as given. Returns the new number of records.
    pub fn replace_all(&mut self, value: &Value) -> Result<usize> {
        let expenses = decode_list(value).ok_or_else(|| {
            Error::validation("Invalid data: expected a JSON array of expense records")
        })?;
        self.expenses = expenses;
        info!("Replaced all expenses, now holding {}", self.expenses.len());
        self.persist()?;
        Ok(self.expenses.len())
    }

    /// Removes every record.
    pub fn clear(&mut self) -> Result<()> {
        self.replace_all(&Value::Array(Vec::new())).map(|_| ())
    }

    /// Replaces the collection with the contents of an import file.
    pub fn import_json(&mut self, text: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(text)
            .context("Invalid file, the contents are not JSON")
            .pub_result(ErrorType::Validation)?;
        self.replace_all(&value)
    }

    /// The collection as pretty-printed JSON, in the same shape that `import_json` accepts.
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.expenses)
            .context("Unable to serialize expenses")
            .pub_result(ErrorType::Storage)
    }

    /// The distinct categories in use, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.expenses
            .iter()
            .map(|e| e.category.clone())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn persist(&self) -> Result<()> {
        self.persistence.save(&self.expenses)
    }
}
