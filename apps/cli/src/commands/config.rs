//! `printcost config`

use crate::cli::ConfigCommands;
use crate::error::{AppError, AppResult};
use crate::state::AppConfig;

pub fn run(action: &ConfigCommands, config: &AppConfig) -> AppResult<()> {
    match action {
        ConfigCommands::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigCommands::Path => {
            let path = AppConfig::default_config_path()
                .ok_or_else(|| AppError::internal("No home directory to place the config file in"))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_prints_effective_config() {
        run(&ConfigCommands::Show, &AppConfig::default()).unwrap();
    }
}
