use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

fn platform_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 {}\n", path.display());
        println!("{}", yaml);
    }

    if *edit_config {
        let fallback = platform_editor();
        let requested = editor.clone().unwrap_or_else(|| fallback.clone());

        let used = if run_editor(&requested, &path) {
            requested
        } else {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                requested, fallback
            ));
            if !run_editor(&fallback, &path) {
                return Err(AppError::Config(format!(
                    "could not open {} with '{}'",
                    path.display(),
                    fallback
                )));
            }
            fallback
        };

        // A broken file would only surface on the next command.
        Config::load_from(&path)?;
        success(format!("Configuration file edited using '{}'", used));
    }

    Ok(())
}
