//! Derives the displayed list of expenses from the collection and the current filter and sort
//! choices.
//!
//! Filters apply in a fixed order, each narrowing the previous result:
//! 1. period (year-month of the date)
//! 2. category (exact match)
//! 3. text search (case-insensitive substring of description, method or category)
//!
//! The sort is stable, so records that compare equal keep their post-filter order.

use crate::model::{Expense, PeriodKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The order in which the derived view is presented.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the collection order, which is newest-created first.
    #[default]
    Unsorted,
    DateAsc,
    DateDesc,
    AmountAsc,
    AmountDesc,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortKey::Unsorted => "",
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::AmountAsc => "amount-asc",
            SortKey::AmountDesc => "amount-desc",
        };
        f.write_str(s)
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    /// Unrecognized text means no sorting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "date-asc" => SortKey::DateAsc,
            "date-desc" => SortKey::DateDesc,
            "amount-asc" => SortKey::AmountAsc,
            "amount-desc" => SortKey::AmountDesc,
            _ => SortKey::Unsorted,
        })
    }
}

/// The filter and sort choices of the expense table. Absent filters let everything through.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub period: Option<PeriodKey>,
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(mut self, period: PeriodKey) -> Self {
        self.period = Some(period);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// The lower-cased search text, or `None` if there is nothing to search for.
    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn matches(&self, expense: &Expense, needle: Option<&str>) -> bool {
        if let Some(period) = self.period {
            if expense.period() != Some(period) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if expense.category() != category {
                return false;
            }
        }
        match needle {
            None => true,
            Some(needle) => [expense.description(), expense.method(), expense.category()]
                .iter()
                .any(|field| field.to_lowercase().contains(needle)),
        }
    }
}

/// Returns the records of `expenses` that pass the filters of `spec`, in the order `spec` asks
/// for. The collection itself is not modified.
pub fn derive<'a>(expenses: &'a [Expense], spec: &QuerySpec) -> Vec<&'a Expense> {
    let needle = spec.needle();
    let mut out: Vec<&Expense> = expenses
        .iter()
        .filter(|e| spec.matches(e, needle.as_deref()))
        .collect();

    match spec.sort {
        SortKey::Unsorted => {}
        SortKey::DateAsc => out.sort_by(|a, b| compare_dates(a, b)),
        SortKey::DateDesc => out.sort_by(|a, b| compare_dates(b, a)),
        SortKey::AmountAsc => out.sort_by(|a, b| a.amount().cmp(&b.amount())),
        SortKey::AmountDesc => out.sort_by(|a, b| b.amount().cmp(&a.amount())),
    }
    out
}

/// Unparseable dates order before every valid date.
fn compare_dates(a: &Expense, b: &Expense) -> Ordering {
    a.parsed_date().cmp(&b.parsed_date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, ExpenseFields};

    fn expense(
        id: &str,
        date: &str,
        category: &str,
        description: &str,
        amount: &str,
        method: &str,
    ) -> Expense {
        Expense::from_fields(
            id.to_string(),
            ExpenseFields::new(
                date,
                category,
                description,
                Amount::from_str(amount).unwrap(),
                method,
            ),
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("1", "2024-04-10", "Food", "Paneer tikka wrap", "120", "UPI"),
            expense("2", "2024-03-05", "Transport", "Auto to campus", "80", "Cash"),
            expense("3", "2024-04-01", "Food", "Groceries", "450.50", "Card"),
            expense("4", "2024-03-20", "Books", "Rust book", "80", "UPI"),
            expense("5", "2023-04-15", "Food", "Old snack", "30", "Cash"),
        ]
    }

    fn ids(rows: &[&Expense]) -> Vec<String> {
        rows.iter().map(|e| e.id().to_string()).collect()
    }

    fn is_subsequence(rows: &[&Expense], all: &[Expense]) -> bool {
        let mut it = all.iter();
        rows.iter().all(|r| it.any(|e| e.id() == r.id()))
    }

    #[test]
    fn test_no_filters_keeps_order() {
        let all = sample();
        let rows = derive(&all, &QuerySpec::new());
        assert_eq!(ids(&rows), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_empty_collection() {
        assert!(derive(&[], &QuerySpec::new().search("x").sort(SortKey::DateAsc)).is_empty());
    }

    #[test]
    fn test_period_filter() {
        let all = vec![
            expense("a", "2024-03-01", "Food", "x", "100", ""),
            expense("b", "2024-04-01", "Food", "y", "50", ""),
        ];
        let spec = QuerySpec::new().period(PeriodKey::from_str("2024-03").unwrap());
        assert_eq!(ids(&derive(&all, &spec)), vec!["a"]);
    }

    #[test]
    fn test_period_filter_skips_bad_dates() {
        let all = vec![
            expense("a", "garbage", "Food", "x", "1", ""),
            expense("b", "2024-03-09", "Food", "y", "1", ""),
        ];
        let spec = QuerySpec::new().period(PeriodKey::new(2024, 3).unwrap());
        assert_eq!(ids(&derive(&all, &spec)), vec!["b"]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let all = sample();
        let rows = derive(&all, &QuerySpec::new().category("Food"));
        assert_eq!(ids(&rows), vec!["1", "3", "5"]);
        assert!(derive(&all, &QuerySpec::new().category("food")).is_empty());
    }

    #[test]
    fn test_search_fields_case_insensitive() {
        let all = sample();
        // description
        assert_eq!(ids(&derive(&all, &QuerySpec::new().search("PANEER"))), vec!["1"]);
        // method
        assert_eq!(ids(&derive(&all, &QuerySpec::new().search("cash"))), vec!["2", "5"]);
        // category
        assert_eq!(ids(&derive(&all, &QuerySpec::new().search("books"))), vec!["4"]);
    }

    #[test]
    fn test_blank_search_does_not_filter() {
        let all = sample();
        assert_eq!(derive(&all, &QuerySpec::new().search("   ")).len(), all.len());
        assert_eq!(ids(&derive(&all, &QuerySpec::new().search("  upi "))), vec!["1", "4"]);
    }

    #[test]
    fn test_all_filters_and_combined() {
        let all = sample();
        let spec = QuerySpec::new()
            .period(PeriodKey::new(2024, 4).unwrap())
            .category("Food")
            .search("card");
        assert_eq!(ids(&derive(&all, &spec)), vec!["3"]);
    }

    #[test]
    fn test_filters_are_monotonic_subsequences() {
        let all = sample();
        let specs = [
            QuerySpec::new(),
            QuerySpec::new().category("Food"),
            QuerySpec::new().category("Food").search("a"),
            QuerySpec::new()
                .category("Food")
                .search("a")
                .period(PeriodKey::new(2024, 4).unwrap()),
        ];
        let mut previous = usize::MAX;
        for spec in &specs {
            let rows = derive(&all, spec);
            assert!(is_subsequence(&rows, &all));
            assert!(rows.len() <= previous);
            previous = rows.len();
        }
    }

    #[test]
    fn test_sort_amount_desc() {
        let all = sample();
        let rows = derive(&all, &QuerySpec::new().sort(SortKey::AmountDesc));
        for pair in rows.windows(2) {
            assert!(pair[0].amount() >= pair[1].amount());
        }
        // equal amounts keep collection order
        assert_eq!(ids(&rows), vec!["3", "1", "2", "4", "5"]);
    }

    #[test]
    fn test_sort_amount_asc_stable() {
        let all = sample();
        let rows = derive(&all, &QuerySpec::new().sort(SortKey::AmountAsc));
        assert_eq!(ids(&rows), vec!["5", "2", "4", "1", "3"]);
    }

    #[test]
    fn test_sort_dates() {
        let all = sample();
        let asc = derive(&all, &QuerySpec::new().sort(SortKey::DateAsc));
        assert_eq!(ids(&asc), vec!["5", "2", "4", "3", "1"]);
        let desc = derive(&all, &QuerySpec::new().sort(SortKey::DateDesc));
        assert_eq!(ids(&desc), vec!["1", "3", "4", "2", "5"]);
    }

    #[test]
    fn test_sort_bad_dates_first_ascending() {
        let all = vec![
            expense("a", "2024-03-01", "Food", "x", "1", ""),
            expense("b", "", "Food", "y", "1", ""),
        ];
        let asc = derive(&all, &QuerySpec::new().sort(SortKey::DateAsc));
        assert_eq!(ids(&asc), vec!["b", "a"]);
        let desc = derive(&all, &QuerySpec::new().sort(SortKey::DateDesc));
        assert_eq!(ids(&desc), vec!["a", "b"]);
    }

    #[test]
    fn test_coerced_amounts_sort_as_zero() {
        let all: Vec<Expense> = serde_json::from_str(
            r#"[{"id":"a","amount":5},{"id":"b","amount":"junk"},{"id":"c","amount":1}]"#,
        )
        .unwrap();
        let rows = derive(&all, &QuerySpec::new().sort(SortKey::AmountAsc));
        assert_eq!(ids(&rows), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::from_str("amount-desc").unwrap(), SortKey::AmountDesc);
        assert_eq!(SortKey::from_str("date-asc").unwrap(), SortKey::DateAsc);
        assert_eq!(SortKey::from_str("price-up").unwrap(), SortKey::Unsorted);
        assert_eq!(SortKey::from_str("").unwrap(), SortKey::Unsorted);
        assert_eq!(SortKey::AmountAsc.to_string(), "amount-asc");
    }
}
