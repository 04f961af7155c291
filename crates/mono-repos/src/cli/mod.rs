//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{BatchKind, BumpCommand, CompletionsCommand, InitCommand, ListCommand, PublishCommand};

/// mono-repos - run npm operations and independent releases across a monorepo
#[derive(Debug, Parser)]
#[command(name = "mono-repos")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors; npm runs with --silent
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Monorepo root (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install dependencies of every package and register it for linking
    Install,

    /// Remove node_modules from every package
    Uninstall,

    /// Run the test script of every package
    Test,

    /// Link workspace siblings into the packages that depend on them
    Link,

    /// Release packages: bump, commit, tag, push and publish
    #[command(disable_version_flag = true)]
    Publish(PublishCommand),

    /// List member packages
    List(ListCommand),

    /// Print the version that follows a given one
    Bump(BumpCommand),

    /// Write a default configuration file
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command and return the process exit code
    pub fn execute(self) -> anyhow::Result<u8> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Install => commands::batch::execute(&self, BatchKind::Install),
            Commands::Uninstall => commands::batch::execute(&self, BatchKind::Uninstall),
            Commands::Test => commands::batch::execute(&self, BatchKind::Test),
            Commands::Link => commands::batch::execute(&self, BatchKind::Link),
            Commands::Publish(ref cmd) => cmd.execute(&self),
            Commands::List(ref cmd) => cmd.execute(&self),
            Commands::Bump(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_publish() {
        let cli = Cli::try_parse_from([
            "mono-repos",
            "-q",
            "publish",
            "--release",
            "minor",
            "--message",
            "hotfix",
            "--yes",
        ])
        .unwrap();

        assert!(cli.quiet);
        let Commands::Publish(cmd) = cli.command else {
            panic!("expected publish");
        };
        assert_eq!(
            cmd.release,
            Some(mono_repos_core::types::ReleaseType::Minor)
        );
        assert_eq!(cmd.message.as_deref(), Some("hotfix"));
        assert!(cmd.yes);
    }

    #[test]
    fn test_rejects_unknown_release_type() {
        let result = Cli::try_parse_from(["mono-repos", "publish", "--release", "huge"]);
        assert!(result.is_err());
    }
}
