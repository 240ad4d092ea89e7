//! Export, import and clear command handlers.

use crate::args::{ClearArgs, ExportArgs, ImportArgs};
use crate::commands::{plural, Out};
use crate::error::{Error, ErrorType, IntoResult};
use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Writes every expense to `pennywise-data-<unix-millis>.json` in the `--out` directory, or in
/// the current directory. The structured output is the path of the written file.
pub fn export(config: Config, args: ExportArgs) -> Result<Out<PathBuf>> {
    let store = config.open_store()?;
    let json = store.export_json()?;
    let dir = args.out().unwrap_or_else(|| Path::new("."));
    utils::make_dir(dir).pub_result(ErrorType::Storage)?;
    let path = dir.join(export_file_name(Utc::now().timestamp_millis()));
    utils::write(&path, json)
        .context("Unable to write the export file")
        .pub_result(ErrorType::Storage)?;
    let message = format!(
        "Exported {} to {}",
        plural(store.len(), "expense", "expenses"),
        path.display()
    );
    Ok(Out::new(message, path))
}

fn export_file_name(unix_millis: i64) -> String {
    format!("pennywise-data-{unix_millis}.json")
}

/// Replaces every expense with the contents of a JSON file. A file that is not JSON, or whose
/// top level is not a list of records, is rejected and the stored expenses stay as they were.
pub fn import(config: Config, args: ImportArgs) -> Result<Out<usize>> {
    let text = utils::read(args.file()).pub_result(ErrorType::Validation)?;
    let mut store = config.open_store()?;
    let count = store.import_json(&text)?;
    Ok(Out::new(
        format!("Imported {}", plural(count, "expense", "expenses")),
        count,
    ))
}

/// Deletes every expense. Refuses unless `--yes` was given. The structured output is how many
/// expenses were removed.
pub fn clear(config: Config, args: ClearArgs) -> Result<Out<usize>> {
    if !args.yes() {
        return Err(Error::validation(
            "Refusing to delete all expenses without --yes",
        ));
    }
    let mut store = config.open_store()?;
    let removed = store.len();
    store.clear()?;
    Ok(Out::new(
        format!("Deleted {}", plural(removed, "expense", "expenses")),
        removed,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(1712345678901), "pennywise-data-1712345678901.json");
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let env = TestEnv::new();
        env.add_expense("2024-04-01", "Food", "Tea", "10.50", "UPI");
        env.add_expense("2024-04-02", "Travel", "Bus", "20", "Cash");
        let before = env.stored();

        let out = export(env.config(), ExportArgs::new(Some(env.scratch()))).unwrap();
        let path = out.structure().unwrap().clone();
        assert!(out.message().contains("Exported 2 expenses"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("pennywise-data-") && name.ends_with(".json"));

        // pretty-printed
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {"));

        clear(env.config(), ClearArgs::new(true)).unwrap();
        assert!(env.stored().is_empty());

        let out = import(env.config(), ImportArgs::new(&path)).unwrap();
        assert_eq!(out.structure(), Some(&2));
        assert_eq!(env.stored(), before);
    }

    #[test]
    fn test_import_rejects_non_list() {
        let env = TestEnv::new();
        let a = env.add_expense("2024-04-01", "Food", "Tea", "10", "UPI");
        let path = env.scratch().join("bad.json");
        std::fs::write(&path, r#"{"expenses": []}"#).unwrap();

        let err = import(env.config(), ImportArgs::new(&path)).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Invalid data"));
        assert_eq!(env.stored(), vec![a]);
    }

    #[test]
    fn test_import_rejects_non_json() {
        let env = TestEnv::new();
        let path = env.scratch().join("bad.json");
        std::fs::write(&path, "date,amount\n2024-04-01,5\n").unwrap();

        let err = import(env.config(), ImportArgs::new(&path)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_import_lenient_records() {
        let env = TestEnv::new();
        let path = env.scratch().join("loose.json");
        std::fs::write(
            &path,
            r#"[{"id":"x1","date":"2024-04-01","category":"Food","amount":"12.5"},
                {"date":"2024-04-02","category":"Misc","amount":"lots"}]"#,
        )
        .unwrap();

        import(env.config(), ImportArgs::new(&path)).unwrap();
        let stored = env.stored();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id(), "x1");
        assert_eq!(stored[0].amount().to_string(), "12.50");
        assert!(!stored[1].id().is_empty());
        assert!(stored[1].amount().is_zero());
    }

    #[test]
    fn test_clear_requires_yes() {
        let env = TestEnv::new();
        let a = env.add_expense("2024-04-01", "Food", "Tea", "10", "UPI");
        let err = clear(env.config(), ClearArgs::new(false)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(env.stored(), vec![a]);

        let out = clear(env.config(), ClearArgs::new(true)).unwrap();
        assert_eq!(out.structure(), Some(&1));
        assert!(env.stored().is_empty());
    }
}
