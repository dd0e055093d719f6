pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "campus-records")]
#[command(about = "Campus course and records manager")]
pub struct CliConfig {
    /// Path to a TOML configuration file; built-in defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the directory holding the CSV data files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the directory backups are written to
    #[arg(long)]
    pub backup_dir: Option<PathBuf>,

    /// Start with an empty dataset instead of importing the CSV files
    #[arg(long)]
    pub no_import: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Builds the process-wide configuration: the TOML file (if any) with the
    /// command-line overrides applied on top.
    pub fn resolve(&self) -> crate::Result<toml_config::TomlConfig> {
        let base = match &self.config {
            Some(path) => toml_config::TomlConfig::from_file(path)?,
            None => toml_config::TomlConfig::default(),
        };

        Ok(base
            .with_data_dir(self.data_dir.clone())
            .with_backup_dir(self.backup_dir.clone()))
    }
}
