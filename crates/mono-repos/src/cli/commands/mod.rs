//! CLI commands

pub mod batch;
mod bump;
mod completions;
mod init;
mod list;
mod publish;

use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use tracing::debug;

use mono_repos_core::config::{load_config_or_default, Config};
use mono_repos_core::options::SILENT;
use mono_repos_core::Workspace;
use mono_repos_git::GitClient;
use mono_repos_npm::NpmClient;

use crate::cli::Cli;

pub use batch::BatchKind;
pub use bump::BumpCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use publish::PublishCommand;

/// A workspace opened from the current directory and its configuration
pub(crate) struct Session {
    pub workspace: Workspace,
    pub config: Config,
}

/// Load configuration and build the workspace rooted at the current
/// directory, wired to git and npm
pub(crate) fn open_workspace(cli: &Cli) -> anyhow::Result<Session> {
    let root: PathBuf = std::env::current_dir()?;
    let (mut config, config_path) = load_config_or_default(&root)?;

    if config_path.is_none() && !cli.quiet && cli.format == crate::cli::OutputFormat::Text {
        crate::cli::output::warning(&format!(
            "No configuration found, using defaults. Run {} to create one.",
            style("mono-repos init").cyan()
        ));
    }

    if cli.quiet {
        config.defaults.insert(SILENT, true);
    }

    let vcs = Arc::new(GitClient::new(&root));
    let npm = Arc::new(NpmClient::from_config(&config.npm));
    let workspace = Workspace::from_config(&root, &config, vcs, npm);
    debug!(?workspace, "opened workspace");

    Ok(Session { workspace, config })
}
