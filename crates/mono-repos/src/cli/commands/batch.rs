//! install, uninstall, test and link: one operation fanned out over every
//! package

use tracing::info;

use crate::cli::commands::open_workspace;
use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Named operation run against every package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Install,
    Uninstall,
    Test,
    Link,
}

impl BatchKind {
    fn name(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Uninstall => "uninstall",
            Self::Test => "test",
            Self::Link => "link",
        }
    }
}

/// Run `kind` over the workspace and report the outcome
pub fn execute(cli: &Cli, kind: BatchKind) -> anyhow::Result<u8> {
    info!(command = kind.name(), "executing batch command");
    let session = open_workspace(cli)?;
    let workspace = &session.workspace;

    let success = match kind {
        BatchKind::Install => workspace.install()?,
        BatchKind::Uninstall => workspace.uninstall()?,
        BatchKind::Test => workspace.test()?,
        BatchKind::Link => workspace.link()?,
    };

    match cli.format {
        OutputFormat::Json => output::json(&serde_json::json!({
            "command": kind.name(),
            "success": success,
        }))?,
        OutputFormat::Text if !success => {
            output::error(&format!("{} failed; remaining packages were skipped", kind.name()));
        }
        OutputFormat::Text if !cli.quiet => {
            output::success(&format!("{} completed for every package", kind.name()));
        }
        OutputFormat::Text => {}
    }

    Ok(exit_codes::for_outcome(success))
}
