use crate::error::{Error, Result};
use crate::model::{parse_date, Amount, PeriodKey};
use crate::utils::new_id;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// A single expense entry.
///
/// Records read from storage or from an import file are decoded leniently: missing text fields
/// become empty, non-text scalars are converted to text, and an amount that is not numeric is
/// coerced to zero. A record without an id is given a fresh one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Expense {
    pub(crate) id: String,
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) amount: Amount,
    pub(crate) method: String,
}

impl Expense {
    pub(crate) fn from_fields(id: String, fields: ExpenseFields) -> Self {
        Self {
            id,
            date: fields.date,
            category: fields.category,
            description: fields.description,
            amount: fields.amount,
            method: fields.method,
        }
    }

    /// Decodes a loosely-typed JSON value. Returns `None` if `value` is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let mut id = text(map, "id");
        if id.trim().is_empty() {
            id = new_id();
            warn!("Assigned id {id} to a record that had none");
        }
        Some(Self {
            id,
            date: text(map, "date"),
            category: text(map, "category"),
            description: text(map, "description"),
            amount: map.get("amount").map(Amount::coerce).unwrap_or_default(),
            method: text(map, "method"),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The date as it was entered, normally `YYYY-MM-DD`.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The parsed date, or `None` if the stored text is not a recognizable date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    pub fn period(&self) -> Option<PeriodKey> {
        self.parsed_date().map(PeriodKey::of)
    }

    /// The editable fields of this record, e.g. to prefill an edit form.
    pub fn fields(&self) -> ExpenseFields {
        ExpenseFields {
            date: self.date.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            amount: self.amount,
            method: self.method.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for Expense {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Expense::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("an expense record must be a JSON object"))
    }
}

fn text(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Everything about an expense except its id. This is what a user fills in when adding or editing.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFields {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: Amount,
    #[serde(default)]
    pub method: String,
}

impl ExpenseFields {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Amount,
        method: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            description: description.into(),
            amount,
            method: method.into(),
        }
    }

    /// Trims the text fields and checks that date, category and description are present and that
    /// the amount is not negative.
    pub fn validate(self) -> Result<Self> {
        let fields = Self {
            date: self.date.trim().to_string(),
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
            amount: self.amount,
            method: self.method.trim().to_string(),
        };
        let missing: Vec<&str> = [
            ("date", &fields.date),
            ("category", &fields.category),
            ("description", &fields.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            return Err(Error::validation(format!(
                "Please fill all required fields: {} missing",
                missing.join(", ")
            )));
        }
        if fields.amount.is_negative() {
            return Err(Error::validation(format!(
                "The amount must not be negative, got {}",
                fields.amount
            )));
        }
        Ok(fields)
    }
}
