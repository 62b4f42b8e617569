use crate::cli::ConfigCommands;
use crate::config::{self, Config};
use crate::error::Result;
use crate::ui;
use std::path::{Path, PathBuf};

/// Run config subcommands
pub fn run_config(command: ConfigCommands, explicit: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommands::Show => show_config(explicit),
        ConfigCommands::Path => print_path(explicit),
        ConfigCommands::Init { force } => init_config(explicit, force),
    }
}

fn target_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config::config_path(),
    }
}

fn show_config(explicit: Option<&Path>) -> Result<()> {
    let config = config::load_config(explicit)?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn print_path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", target_path(explicit)?.display());
    Ok(())
}

fn init_config(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = target_path(explicit)?;

    if path.exists() && !force {
        ui::print_warning(&format!("Config file already exists at {}", path.display()));
        ui::print_info("Use --force to overwrite");
        return Ok(());
    }

    config::save_config_to(&Config::default(), &path)?;
    ui::print_success(&format!("Created config file at {}", path.display()));
    ui::print_info(&format!(
        "{}, {} and {} override the file at runtime",
        config::ENV_MODEL,
        config::ENV_URL,
        config::ENV_THEME
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_init_writes_defaults_and_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init_config(Some(&path), false).unwrap();
        let written = config::load_config_from(&path).unwrap();
        assert_eq!(written.generation.model, "phi3:mini");

        fs::write(&path, "[generation]\nmodel = \"custom\"\n").unwrap();
        init_config(Some(&path), false).unwrap();
        assert_eq!(config::load_config_from(&path).unwrap().generation.model, "custom");

        init_config(Some(&path), true).unwrap();
        assert_eq!(config::load_config_from(&path).unwrap().generation.model, "phi3:mini");
    }
}
