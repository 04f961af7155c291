//! Completions command

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::{output, Cli};
use crate::exit_codes;

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<u8> {
        info!(shell = %self.shell, "executing completions command");

        let mut sink: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(std::fs::File::create(path)?),
            None => Box::new(std::io::stdout()),
        };
        generate(self.shell, &mut Cli::command(), "mono-repos", &mut sink);
        sink.flush()?;

        if let Some(path) = &self.output {
            if !cli.quiet {
                output::success(&format!(
                    "Completions for {} written to {}",
                    self.shell,
                    output::path_style().apply_to(path.display())
                ));
            }
        }

        Ok(exit_codes::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parses_every_shell() {
        for name in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["mono-repos", "completions", name]).unwrap();
            assert!(matches!(cli.command, crate::cli::Commands::Completions(_)));
        }
        assert!(Cli::try_parse_from(["mono-repos", "completions", "tcsh"]).is_err());
    }
}
