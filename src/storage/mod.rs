//! Durable key-value storage and the persistence adapter that reads and writes the expense list.
//!
//! The persisted layout is two independent keys:
//! - `pennywise.expenses.v1`: a JSON array of expense records.
//! - `pennywise.theme`: the theme preference string.

mod file;
mod memory;
mod persistence;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use persistence::Persistence;

pub(crate) use persistence::decode_list;

/// The key under which the expense list is stored.
pub const EXPENSES_KEY: &str = "pennywise.expenses.v1";

/// The key under which the theme preference is stored.
pub const THEME_KEY: &str = "pennywise.theme";

/// A minimal durable string key-value store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}
