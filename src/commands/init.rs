use crate::args::InitArgs;
use crate::commands::Out;
use crate::model::CurrencyFormat;
use crate::{Config, Result};
use std::path::Path;

/// Creates the home directory with its `config.json` and data directory.
///
/// # Arguments
/// - `pennywise_home` - The directory that will be the home directory, e.g. `$HOME/pennywise`
/// - `args` - The display currency to record in the config file.
///
/// # Errors
/// - Returns an error if the home directory is already initialized or any file operation fails.
pub fn init(pennywise_home: &Path, args: &InitArgs) -> Result<Out<()>> {
    let format = CurrencyFormat::new(args.currency_symbol(), args.grouping());
    let config = Config::create(pennywise_home, &format)?;
    Ok(format!(
        "Successfully created the pennywise directory and config at {}",
        config.root().display()
    )
    .into())
}
