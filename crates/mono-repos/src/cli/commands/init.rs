//! Init command

use clap::{Args, ValueEnum};
use console::style;
use tracing::info;

use mono_repos_core::config::defaults::{
    DEFAULT_CONFIG_TEMPLATE_TOML, DEFAULT_CONFIG_TEMPLATE_YAML, DEFAULT_CONFIG_TOML,
    DEFAULT_CONFIG_YAML,
};

use crate::cli::{output, Cli};
use crate::exit_codes;

/// Configuration file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Yaml,
}

/// Write a default configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Configuration file format
    #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
    pub config_format: ConfigFormat,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<u8> {
        info!(force = self.force, format = ?self.config_format, "executing init command");
        let cwd = std::env::current_dir()?;

        let (file_name, template) = match self.config_format {
            ConfigFormat::Toml => (DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_TEMPLATE_TOML),
            ConfigFormat::Yaml => (DEFAULT_CONFIG_YAML, DEFAULT_CONFIG_TEMPLATE_YAML),
        };
        let config_path = cwd.join(file_name);

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, template)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            println!();
            println!("{}", output::header("Next steps:"));
            println!("  1. Edit {} to set your remote, branch and registry", config_path.display());
            println!("  2. Run {} to check the packages are found", style("mono-repos list").cyan());
            println!("  3. Run {} to cut your first release", style("mono-repos publish").cyan());
        }

        Ok(exit_codes::SUCCESS)
    }
}
