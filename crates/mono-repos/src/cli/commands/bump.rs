//! Bump command

use clap::Args;
use tracing::info;

use mono_repos_core::types::ReleaseType;
use mono_repos_core::Package;

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Print the version that follows a given one
#[derive(Debug, Args)]
pub struct BumpCommand {
    /// Current version (MAJOR.MINOR.PATCH)
    #[arg(value_name = "VERSION")]
    pub current: String,

    /// Release type (major, minor, patch)
    #[arg(short, long, default_value_t = ReleaseType::Patch)]
    pub release: ReleaseType,
}

impl BumpCommand {
    /// Execute the bump command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<u8> {
        info!(current = %self.current, release = %self.release, "executing bump command");
        let next = Package::bump(&self.current, self.release.as_str())?;

        match cli.format {
            OutputFormat::Json => output::json(&serde_json::json!({
                "current": self.current,
                "release": self.release.as_str(),
                "next": next,
            }))?,
            OutputFormat::Text => println!("{}", next),
        }

        Ok(exit_codes::SUCCESS)
    }
}
