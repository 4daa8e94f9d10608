//! `init` — scaffold a new project directory.

use std::path::{Path, PathBuf};

use glyph_runtime::GlyphConfig;

use crate::commands::common::{error_messages, output_messages};
use crate::commands::traits::{Command, CommandDescription};
use crate::config;
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    pub verbose: bool,
    pub force: bool,
    pub path: Option<PathBuf>,
}

pub struct InitCommand {
    args: InitArgs,
}

impl InitCommand {
    pub fn new(args: InitArgs) -> Self {
        Self { args }
    }

    pub fn run(&self) -> Result<()> {
        let target = self.args.path.clone().unwrap_or_else(|| PathBuf::from("."));
        self.validate_directory(&target)?;
        self.create_project_structure(&target)?;
        self.create_config_file(&target)?;

        if self.args.verbose {
            eprintln!("{}: {}", output_messages::CREATED_FILE, target.display());
        }
        Ok(())
    }

    fn validate_directory(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
            return Ok(());
        }
        if !path.is_dir() {
            return Err(CliError::Validation(format!("{}: {}", error_messages::TARGET_NOT_DIR, path.display())));
        }
        let is_empty = std::fs::read_dir(path)?.next().is_none();
        if !is_empty && !self.args.force {
            return Err(CliError::Validation(format!("{}: {}", error_messages::DIR_NOT_EMPTY, path.display())));
        }
        Ok(())
    }

    fn create_project_structure(&self, path: &Path) -> Result<()> {
        for dir in ["scripts", ".glyph"] {
            let dir_path = path.join(dir);
            if !dir_path.exists() {
                std::fs::create_dir(&dir_path)?;
                if self.args.verbose {
                    eprintln!("{}: {}", output_messages::CREATED_DIR, dir_path.display());
                }
            }
        }
        Ok(())
    }

    fn create_config_file(&self, path: &Path) -> Result<()> {
        let config_path = path.join(config::CONFIG_FILE_NAME);
        if config_path.exists() && !self.args.force {
            if self.args.verbose {
                eprintln!("configuration file already exists, skipping");
            }
            return Ok(());
        }
        config::save_to_path(&GlyphConfig::default(), &config_path)
    }
}

impl Command for InitCommand {
    type Args = InitArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "init"
    }
}

impl CommandDescription for InitCommand {
    fn description() -> &'static str {
        "Scaffold a new glyph project"
    }
}

pub fn run_init(args: InitArgs) -> Result<()> {
    InitCommand::new(args).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn trait_metadata_matches_the_command() {
        assert_eq!(InitCommand::name(), "init");
        assert!(!InitCommand::description().is_empty());
    }

    #[test]
    fn init_creates_project_structure_and_config() {
        let dir = TempDir::new().unwrap();
        let args = InitArgs { path: Some(dir.path().to_path_buf()), verbose: false, force: false };
        run_init(args).unwrap();
        assert!(dir.path().join("scripts").exists());
        assert!(dir.path().join(".glyph").exists());
        assert!(dir.path().join("glyph.toml").exists());
    }

    #[test]
    fn init_refuses_a_nonempty_directory_without_force() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("existing.txt"), "hi").unwrap();
        let args = InitArgs { path: Some(dir.path().to_path_buf()), verbose: false, force: false };
        assert!(run_init(args).is_err());
    }

    #[test]
    fn init_accepts_a_nonempty_directory_with_force() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("existing.txt"), "hi").unwrap();
        let args = InitArgs { path: Some(dir.path().to_path_buf()), verbose: false, force: true };
        assert!(run_init(args).is_ok());
    }
}
