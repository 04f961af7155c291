//! A single member package and the operations run against it

use std::fmt::Display;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::{FilesystemError, ManifestError, Result, VersionError};
use crate::manifest::{Manifest, MANIFEST_FILE};
use crate::options::Options;
use crate::traits::Target;
use crate::version;

use super::workspace::Workspace;

/// Directories removed by `uninstall`
pub const DEPENDENCY_DIRS: &[&str] = &["node_modules"];

/// Prefix of every release commit and tag message
const RELEASE_PREFIX: &str = "[dist] Release";

/// One member directory of a [`Workspace`]
///
/// Packages are cheap views constructed per operation. Nothing read from the
/// manifest is cached.
#[derive(Debug, Clone)]
pub struct Package<'w> {
    workspace: &'w Workspace,
    dir_name: String,
    root: PathBuf,
    manifest_path: PathBuf,
    silent: bool,
}

impl<'w> Package<'w> {
    /// Create a package for the member directory `dir_name`
    pub fn new(workspace: &'w Workspace, dir_name: impl Into<String>) -> Self {
        let dir_name = dir_name.into();
        let root = workspace.resolve(&dir_name);
        let manifest_path = root.join(MANIFEST_FILE);
        let silent = workspace.defaults().silent();

        Self {
            workspace,
            dir_name,
            root,
            manifest_path,
            silent,
        }
    }

    /// Owning workspace
    pub fn workspace(&self) -> &'w Workspace {
        self.workspace
    }

    /// Member directory name
    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// Package root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Whether package-manager output is suppressed
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Workspace defaults with `overrides` applied on top
    pub fn configure(&self, overrides: &Options) -> Options {
        self.workspace.defaults().merge(overrides)
    }

    /// Parse the manifest from disk
    pub fn read(&self) -> std::result::Result<Manifest, ManifestError> {
        Manifest::load(&self.manifest_path)
    }

    /// Compute the version following `current` for a release type
    pub fn bump(current: &str, release: &str) -> std::result::Result<String, VersionError> {
        version::bump(current, release)
    }

    fn target(&self) -> Target<'_> {
        Target::new(&self.root, self.silent)
    }

    /// Install dependencies, then register the package for linking
    #[instrument(skip(self), fields(package = %self.dir_name))]
    pub fn install(&self) -> bool {
        let pm = self.workspace.package_manager();
        let result = pm
            .install(self.target())
            .and_then(|()| pm.register_link(self.target()));

        match result {
            Ok(()) => {
                debug!("installed");
                true
            }
            Err(e) => {
                warn!(error = %e, "install failed");
                false
            }
        }
    }

    /// Remove installed dependency directories
    #[instrument(skip(self), fields(package = %self.dir_name))]
    pub fn uninstall(&self) -> bool {
        let mut success = true;

        for dir in DEPENDENCY_DIRS {
            let path = self.root.join(dir);
            if !path.exists() {
                debug!(path = %path.display(), "nothing to remove");
                continue;
            }

            match std::fs::remove_dir_all(&path) {
                Ok(()) => debug!(path = %path.display(), "removed"),
                Err(source) => {
                    let e = FilesystemError::RemoveFailed { path, source };
                    warn!(error = %e, "uninstall failed");
                    success = false;
                }
            }
        }

        success
    }

    /// Run the package's test script
    #[instrument(skip(self), fields(package = %self.dir_name))]
    pub fn test(&self) -> bool {
        match self
            .workspace
            .package_manager()
            .run_script(self.target(), "test")
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "tests failed");
                false
            }
        }
    }

    /// Link every dependency that is also a workspace member.
    ///
    /// Every match is attempted even after a failure. Manifest errors
    /// propagate.
    #[instrument(skip(self), fields(package = %self.dir_name))]
    pub fn link(&self) -> Result<bool> {
        let wanted = self.read()?.dependency_names();
        let members = self.workspace.packages()?;

        let mut success = true;
        let mut linked = 0usize;
        for name in wanted.intersection(&members) {
            match self
                .workspace
                .package_manager()
                .link(self.target(), name)
            {
                Ok(()) => {
                    debug!(dependency = %name, "linked");
                    linked += 1;
                }
                Err(e) => {
                    warn!(dependency = %name, error = %e, "link failed");
                    success = false;
                }
            }
        }

        info!(linked, success, "link complete");
        Ok(success)
    }

    /// Cut a release: bump, rewrite the manifest, commit, tag, push and
    /// publish to the registry.
    ///
    /// The first failing step stops the pipeline with `Ok(false)`; completed
    /// steps are not rolled back. Failing to read the manifest or its
    /// `name`/`version` fields is an `Err`.
    #[instrument(skip(self, overrides), fields(package = %self.dir_name))]
    pub fn publish(&self, overrides: &Options) -> Result<bool> {
        let options = self.configure(overrides);
        let mut manifest = self.read()?;
        let name = manifest.name()?.to_string();

        let next = match options.version() {
            Some(explicit) => explicit.to_string(),
            None => {
                let current = manifest.version()?;
                match gate("bump", version::bump(current, options.release())) {
                    Some(next) => next,
                    None => return Ok(false),
                }
            }
        };
        info!(%name, to = %next, "releasing");

        manifest.set_version(next.as_str());
        if gate("write manifest", manifest.save()).is_none() {
            return Ok(false);
        }

        let vcs = self.workspace.version_control();
        let git = self.workspace.git();
        let message = release_message(&name, &next, options.message());
        let tag = release_tag(&name, &next);

        let released = gate("stage", vcs.stage(&self.root)).is_some()
            && gate("commit", vcs.commit(&message, &self.root)).is_some()
            && gate("tag", vcs.tag(&tag, &message)).is_some()
            && gate("push", vcs.push(&git.remote, &git.branch)).is_some()
            && gate("push tags", vcs.push_tags(&git.remote)).is_some()
            && gate(
                "registry publish",
                self.workspace.package_manager().publish(self.target()),
            )
            .is_some();

        if released {
            info!(%tag, "released");
        }
        Ok(released)
    }
}

/// Tag name for a release
pub fn release_tag(name: &str, version: &str) -> String {
    format!("{name}@{version}")
}

/// Commit and tag message for a release
pub fn release_message(name: &str, version: &str, message: &str) -> String {
    format!("{RELEASE_PREFIX} {name}@{version} {}", message.trim())
        .trim()
        .to_string()
}

/// Log a failed pipeline step and turn the result into an `Option`
fn gate<T, E: Display>(step: &str, result: std::result::Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => {
            debug!(step, "step complete");
            Some(value)
        }
        Err(e) => {
            warn!(step, error = %e, "release aborted");
            None
        }
    }
}
