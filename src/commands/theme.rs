use crate::args::ThemeArgs;
use crate::commands::Out;
use crate::model::Theme;
use crate::{Config, Result};

/// Shows the stored theme preference, replaces it when a theme is given, or switches to the other
/// theme with `--toggle`.
pub fn theme(config: Config, args: ThemeArgs) -> Result<Out<Theme>> {
    let persistence = config.persistence()?;
    let requested = match args.theme() {
        Some(theme) => Some(theme),
        None if args.toggle() => Some(persistence.load_theme().toggled()),
        None => None,
    };
    match requested {
        None => {
            let current = persistence.load_theme();
            Ok(Out::new(format!("The theme is {current}"), current))
        }
        Some(theme) => {
            persistence.save_theme(theme)?;
            Ok(Out::new(format!("Switched to the {theme} theme"), theme))
        }
    }
}
