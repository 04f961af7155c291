//! Publish command

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::{info, warn};

use mono_repos_core::error::{MonoError, VersionControlError};
use mono_repos_core::monorepo::release_tag;
use mono_repos_core::options::{Options, MESSAGE, RELEASE, VERSION};
use mono_repos_core::types::ReleaseType;
use mono_repos_core::{Package, Workspace};

use crate::cli::commands::open_workspace;
use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Release packages: bump, commit, tag, push and publish
#[derive(Debug, Args)]
pub struct PublishCommand {
    /// Release type (major, minor, patch)
    #[arg(short, long)]
    pub release: Option<ReleaseType>,

    /// Explicit version to release, used as given
    #[arg(long)]
    pub version: Option<String>,

    /// Text appended to the release commit and tag message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Release only the package in this member directory
    #[arg(short, long)]
    pub package: Option<String>,

    /// Refuse to release when the local branch is behind the remote
    #[arg(long)]
    pub verify: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl PublishCommand {
    /// Execute the publish command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<u8> {
        info!(
            release = ?self.release,
            version = ?self.version,
            package = ?self.package,
            verify = self.verify,
            "executing publish command"
        );
        let session = open_workspace(cli)?;
        let workspace = &session.workspace;

        let members = workspace.members()?;
        let targets = match &self.package {
            Some(dir) if members.contains(dir) => vec![dir.clone()],
            Some(dir) => anyhow::bail!(
                "No package directory '{}' under {}",
                dir,
                workspace.packages_path().display()
            ),
            None => members,
        };

        if self.verify || session.config.git.verify {
            match workspace.verify() {
                Ok(()) => {}
                Err(MonoError::VersionControl(e @ VersionControlError::BehindRemote { .. })) => {
                    warn!(error = %e, "pre-flight check failed");
                    output::error(&e.to_string());
                    return Ok(exit_codes::VERIFY_FAILED);
                }
                Err(e) => return Err(e.into()),
            }
        }

        let options = self.options();
        let effective = workspace.defaults().merge(&options);

        if cli.format == OutputFormat::Text && !cli.quiet {
            self.preview(workspace, &targets, &effective)?;
        }

        if !self.yes {
            let confirmed = Confirm::new()
                .with_prompt(format!("Release {} package(s)?", targets.len()))
                .default(true)
                .interact()?;

            if !confirmed {
                println!("{}", style("Aborted.").yellow());
                return Ok(exit_codes::SUCCESS);
            }
        }

        let success = match &self.package {
            Some(dir) => workspace.package(dir).publish(&options)?,
            None => workspace.publish(options)?,
        };

        match cli.format {
            OutputFormat::Json => output::json(&serde_json::json!({
                "command": "publish",
                "packages": targets,
                "success": success,
            }))?,
            OutputFormat::Text if !success => {
                output::error("Release failed; later steps and packages were skipped")
            }
            OutputFormat::Text if !cli.quiet => output::success(&match &self.package {
                Some(dir) => format!("Released {}", dir),
                None => format!("Released {} package(s)", targets.len()),
            }),
            OutputFormat::Text => {}
        }

        Ok(exit_codes::for_outcome(success))
    }

    /// Command-line flags as option overrides
    fn options(&self) -> Options {
        let mut options = Options::new();
        if let Some(release) = self.release {
            options.insert(RELEASE, release.as_str());
        }
        if let Some(version) = &self.version {
            options.insert(VERSION, version.as_str());
        }
        if let Some(message) = &self.message {
            options.insert(MESSAGE, message.as_str());
        }
        options
    }

    /// Show what each package would be released as
    fn preview(&self, workspace: &Workspace, targets: &[String], options: &Options) -> anyhow::Result<()> {
        println!("{}", output::header("Release Preview"));
        println!();

        for dir in targets {
            let manifest = workspace.package(dir).read()?;
            let name = manifest.name()?;
            let current = manifest.version()?;
            let next = match options.version() {
                Some(explicit) => explicit.to_string(),
                None => match Package::bump(current, options.release()) {
                    Ok(next) => next,
                    Err(e) => {
                        output::warning(&format!("{}: {}", name, e));
                        continue;
                    }
                },
            };

            println!(
                "{}",
                output::key_value(
                    name,
                    &format!(
                        "{} -> {}  {}",
                        current,
                        output::version_style().apply_to(&next),
                        output::tag_style().apply_to(release_tag(name, &next))
                    )
                )
            );
        }

        let git = workspace.git();
        println!();
        println!("  Push to:         {}/{}", style(&git.remote).cyan(), style(&git.branch).cyan());
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> PublishCommand {
        PublishCommand {
            release: None,
            version: None,
            message: None,
            package: None,
            verify: false,
            yes: true,
        }
    }

    #[test]
    fn test_options_empty_by_default() {
        assert!(command().options().is_empty());
    }

    #[test]
    fn test_options_from_flags() {
        let cmd = PublishCommand {
            release: Some(ReleaseType::Major),
            version: Some("2.0.0".to_string()),
            message: Some("hotfix".to_string()),
            ..command()
        };

        let options = cmd.options();
        assert_eq!(options.release(), "major");
        assert_eq!(options.version(), Some("2.0.0"));
        assert_eq!(options.message(), "hotfix");
    }
}
