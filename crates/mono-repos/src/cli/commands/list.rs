//! List command

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use crate::cli::commands::open_workspace;
use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// List member packages
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Print directory names only
    #[arg(long)]
    pub names_only: bool,
}

/// One row of the listing
#[derive(Debug, Serialize)]
struct Entry {
    dir: String,
    name: Option<String>,
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ListCommand {
    /// Execute the list command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<u8> {
        info!(names_only = self.names_only, "executing list command");
        let session = open_workspace(cli)?;
        let workspace = &session.workspace;

        let mut entries = Vec::new();
        for dir in workspace.members()? {
            let entry = match workspace.package(&dir).read() {
                Ok(manifest) => Entry {
                    name: manifest.name().ok().map(str::to_string),
                    version: manifest.version().ok().map(str::to_string),
                    error: None,
                    dir,
                },
                Err(e) => Entry {
                    dir,
                    name: None,
                    version: None,
                    error: Some(e.to_string()),
                },
            };
            entries.push(entry);
        }

        if cli.format == OutputFormat::Json {
            output::json(&serde_json::to_value(&entries)?)?;
            return Ok(exit_codes::SUCCESS);
        }

        for entry in &entries {
            if self.names_only {
                println!("{}", entry.dir);
                continue;
            }

            match (&entry.name, &entry.version, &entry.error) {
                (_, _, Some(error)) => println!(
                    "{}  {}",
                    output::path_style().apply_to(&entry.dir),
                    style(error).red()
                ),
                (name, version, None) => println!(
                    "{}  {}@{}",
                    output::path_style().apply_to(&entry.dir),
                    name.as_deref().unwrap_or("?"),
                    output::version_style().apply_to(version.as_deref().unwrap_or("?"))
                ),
            }
        }

        if entries.is_empty() && !cli.quiet {
            output::info(&format!(
                "No packages under {}",
                workspace.packages_path().display()
            ));
        }

        Ok(exit_codes::SUCCESS)
    }
}
