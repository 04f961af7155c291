//! npm client

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use tracing::{debug, info, instrument};

use mono_repos_core::config::{NpmConfig, PublishAccess};
use mono_repos_core::error::PackageManagerError;
use mono_repos_core::manifest::{Manifest, MANIFEST_FILE};
use mono_repos_core::traits::{PackageManager, Target};

/// Runs npm commands inside package directories
#[derive(Debug, Clone)]
pub struct NpmClient {
    program: String,
    registry: Option<String>,
    access: Option<PublishAccess>,
    tag: Option<String>,
}

impl NpmClient {
    /// Create a client that runs `npm` with registry defaults
    pub fn new() -> Self {
        Self {
            program: "npm".to_string(),
            registry: None,
            access: None,
            tag: None,
        }
    }

    /// Create a client from the `[npm]` configuration section
    pub fn from_config(config: &NpmConfig) -> Self {
        Self {
            program: config.program.clone(),
            registry: config.registry.clone(),
            access: config.access,
            tag: config.tag.clone(),
        }
    }

    /// Use a different executable (e.g. a wrapper script)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Program that is executed
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the command for `args` run inside the target directory
    pub fn command<S: AsRef<str>>(&self, target: Target<'_>, args: &[S]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args.iter().map(AsRef::<str>::as_ref));
        if target.silent {
            cmd.arg("--silent");
        }
        cmd.current_dir(target.dir);
        cmd
    }

    /// Arguments for `npm publish` in `dir`
    pub fn publish_args(&self, dir: &Path) -> Result<Vec<String>, PackageManagerError> {
        let mut args = vec!["publish".to_string()];

        if let Some(registry) = &self.registry {
            args.push("--registry".to_string());
            args.push(registry.clone());
        }

        let access = match self.access {
            Some(access) => Some(access),
            None => {
                // Scoped packages are private on the registry unless told otherwise
                let manifest = Manifest::load(&dir.join(MANIFEST_FILE))
                    .map_err(|e| PackageManagerError::PublishFailed(e.to_string()))?;
                let name = manifest
                    .name()
                    .map_err(|e| PackageManagerError::PublishFailed(e.to_string()))?;
                name.starts_with('@').then_some(PublishAccess::Public)
            }
        };
        if let Some(access) = access {
            args.push("--access".to_string());
            args.push(access.to_string());
        }

        if let Some(tag) = &self.tag {
            args.push("--tag".to_string());
            args.push(tag.clone());
        }

        Ok(args)
    }

    /// Run `args` in the target directory.
    ///
    /// Silent targets have their output captured; stderr ends up in the
    /// error. Otherwise npm writes straight to the terminal.
    fn run<S: AsRef<str>>(
        &self,
        target: Target<'_>,
        args: &[S],
        on_failure: impl FnOnce(String) -> PackageManagerError,
    ) -> Result<(), PackageManagerError> {
        let description = format!(
            "{} {}",
            self.program,
            args.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>().join(" ")
        );
        let mut cmd = self.command(target, args);
        debug!(command = %description, dir = %target.dir.display(), "running");

        let start = Instant::now();
        let spawn_error = |e: std::io::Error| PackageManagerError::Spawn {
            command: description.clone(),
            reason: e.to_string(),
        };

        let failure = if target.silent {
            let output = cmd.output().map_err(spawn_error)?;
            (!output.status.success())
                .then(|| String::from_utf8_lossy(&output.stderr).trim().to_string())
        } else {
            let status = cmd.status().map_err(spawn_error)?;
            (!status.success()).then(|| status.to_string())
        };

        info!(
            command = %description,
            duration_ms = start.elapsed().as_millis(),
            success = failure.is_none(),
            "npm command finished"
        );

        match failure {
            None => Ok(()),
            Some(reason) => Err(on_failure(reason)),
        }
    }
}

impl Default for NpmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for NpmClient {
    fn name(&self) -> &'static str {
        "npm"
    }

    #[instrument(skip(self, target), fields(dir = %target.dir.display()))]
    fn install(&self, target: Target<'_>) -> Result<(), PackageManagerError> {
        self.run(target, &["install"], |reason| PackageManagerError::CommandFailed {
            command: "npm install".to_string(),
            reason,
        })
    }

    #[instrument(skip(self, target), fields(dir = %target.dir.display()))]
    fn register_link(&self, target: Target<'_>) -> Result<(), PackageManagerError> {
        self.run(target, &["link"], |reason| PackageManagerError::CommandFailed {
            command: "npm link".to_string(),
            reason,
        })
    }

    #[instrument(skip(self, target), fields(dir = %target.dir.display()))]
    fn link(&self, target: Target<'_>, name: &str) -> Result<(), PackageManagerError> {
        self.run(target, &["link", name], |reason| PackageManagerError::LinkFailed {
            name: name.to_string(),
            reason,
        })
    }

    #[instrument(skip(self, target), fields(dir = %target.dir.display()))]
    fn run_script(&self, target: Target<'_>, script: &str) -> Result<(), PackageManagerError> {
        self.run(target, &["run", script], |reason| {
            PackageManagerError::ScriptFailed {
                script: script.to_string(),
                reason,
            }
        })
    }

    #[instrument(skip(self, target), fields(dir = %target.dir.display()))]
    fn publish(&self, target: Target<'_>) -> Result<(), PackageManagerError> {
        let args = self.publish_args(target.dir)?;
        self.run(target, args.as_slice(), PackageManagerError::PublishFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    fn package(name: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(MANIFEST_FILE),
            format!(r#"{{"name": "{name}", "version": "1.0.0"}}"#),
        )
        .unwrap();
        temp
    }

    fn args_of(cmd: &Command) -> Vec<&OsStr> {
        cmd.get_args().collect()
    }

    #[test]
    fn test_command_args() {
        let temp = package("foo");
        let client = NpmClient::new();

        let cmd = client.command(Target::new(temp.path(), false), &["link", "bar"]);
        assert_eq!(cmd.get_program(), "npm");
        assert_eq!(args_of(&cmd), vec!["link", "bar"]);
        assert_eq!(cmd.get_current_dir(), Some(temp.path()));

        let cmd = client.command(Target::new(temp.path(), true), &["install"]);
        assert_eq!(args_of(&cmd), vec!["install", "--silent"]);
    }

    #[test]
    fn test_from_config() {
        let config = NpmConfig {
            program: "pnpm".to_string(),
            registry: Some("https://npm.example.com".to_string()),
            access: Some(PublishAccess::Restricted),
            tag: Some("next".to_string()),
        };
        let client = NpmClient::from_config(&config);
        assert_eq!(client.program(), "pnpm");

        let temp = package("foo");
        assert_eq!(
            client.publish_args(temp.path()).unwrap(),
            vec![
                "publish",
                "--registry",
                "https://npm.example.com",
                "--access",
                "restricted",
                "--tag",
                "next"
            ]
        );
    }

    #[test]
    fn test_publish_args_unscoped() {
        let temp = package("foo");
        let args = NpmClient::new().publish_args(temp.path()).unwrap();
        assert_eq!(args, vec!["publish"]);
    }

    #[test]
    fn test_publish_args_scoped_defaults_public() {
        let temp = package("@scope/foo");
        let args = NpmClient::new().publish_args(temp.path()).unwrap();
        assert_eq!(args, vec!["publish", "--access", "public"]);

        let config = NpmConfig {
            access: Some(PublishAccess::Restricted),
            ..NpmConfig::default()
        };
        let args = NpmClient::from_config(&config)
            .publish_args(temp.path())
            .unwrap();
        assert_eq!(args, vec!["publish", "--access", "restricted"]);
    }

    #[test]
    fn test_publish_args_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let result = NpmClient::new().publish_args(temp.path());
        assert!(matches!(result, Err(PackageManagerError::PublishFailed(_))));
    }

    #[test]
    fn test_spawn_failure() {
        let temp = package("foo");
        let client = NpmClient::new().with_program("mono-repos-no-such-program");

        let result = client.install(Target::new(temp.path(), true));
        assert!(matches!(result, Err(PackageManagerError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_commands() {
        let temp = package("foo");
        let client = NpmClient::new().with_program("true");

        for silent in [true, false] {
            let target = Target::new(temp.path(), silent);
            client.install(target).unwrap();
            client.register_link(target).unwrap();
            client.link(target, "bar").unwrap();
            client.run_script(target, "test").unwrap();
            client.publish(target).unwrap();
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_commands() {
        let temp = package("foo");
        let client = NpmClient::new().with_program("false");
        let target = Target::new(temp.path(), true);

        assert!(matches!(
            client.install(target),
            Err(PackageManagerError::CommandFailed { .. })
        ));
        assert!(matches!(
            client.link(target, "bar"),
            Err(PackageManagerError::LinkFailed { ref name, .. }) if name == "bar"
        ));
        assert!(matches!(
            client.run_script(target, "test"),
            Err(PackageManagerError::ScriptFailed { ref script, .. }) if script == "test"
        ));
        assert!(matches!(
            client.publish(Target::new(temp.path(), false)),
            Err(PackageManagerError::PublishFailed(_))
        ));
    }
}
