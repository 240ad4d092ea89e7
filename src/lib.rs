//! PennyWise: the core of a personal expense tracker.
//!
//! The canonical collection lives in an [`ExpenseStore`], which persists every change through a
//! [`storage::Persistence`] adapter. The displayed table is derived with [`derive`] and the
//! totals with [`summarize`]; neither mutates the collection.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod query;
pub mod storage;
pub mod store;
pub mod summary;
mod utils;


pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use query::{derive, QuerySpec, SortKey};
pub use store::ExpenseStore;
pub use summary::{summarize, Summary, View};
pub use utils::new_id;
