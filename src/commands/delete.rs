//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::{Config, Result};

/// Deletes the expense with the given id. Deleting an id that is not there succeeds and reports
/// that nothing was removed. The structured output is whether a record was removed.
pub fn delete(config: Config, args: DeleteArgs) -> Result<Out<bool>> {
    let mut store = config.open_store()?;
    let removed = store.delete(args.id())?;
    let message = if removed {
        format!("Deleted expense {}", args.id())
    } else {
        format!("No expense with id {}, nothing deleted", args.id())
    };
    Ok(Out::new(message, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_delete_success() {
        let env = TestEnv::new();
        let a = env.add_expense("2024-04-01", "Food", "Tea", "10", "UPI");
        let b = env.add_expense("2024-04-02", "Travel", "Bus", "20", "Cash");

        let out = delete(env.config(), DeleteArgs::new(a.id())).unwrap();
        assert!(out.message().contains("Deleted expense"));
        assert_eq!(out.structure(), Some(&true));
        assert_eq!(env.stored(), vec![b]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let env = TestEnv::new();
        let a = env.add_expense("2024-04-01", "Food", "Tea", "10", "UPI");
        let b = env.add_expense("2024-04-02", "Travel", "Bus", "20", "Cash");

        delete(env.config(), DeleteArgs::new(b.id())).unwrap();
        let out = delete(env.config(), DeleteArgs::new(b.id())).unwrap();
        assert_eq!(out.structure(), Some(&false));
        assert!(out.message().contains("nothing deleted"));
        assert_eq!(env.stored(), vec![a]);
    }
}
