//! Recording collaborators and fixtures for tests

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::error::{PackageManagerError, VersionControlError};
use crate::traits::{PackageManager, Target, VersionControl};

use super::workspace::{Workspace, PACKAGES_DIR};

fn leaf(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Shared call log with prefix-matched failure injection
#[derive(Default)]
struct Journal {
    calls: Mutex<Vec<String>>,
    failing: Mutex<Vec<String>>,
}

impl Journal {
    fn record(&self, call: String) -> bool {
        let fails = self
            .failing
            .lock()
            .unwrap()
            .iter()
            .any(|prefix| call.starts_with(prefix.as_str()));
        self.calls.lock().unwrap().push(call);
        !fails
    }
}

/// Version control that records every call instead of touching git
#[derive(Default)]
pub(crate) struct RecordingVcs {
    journal: Journal,
    behind: Mutex<bool>,
}

impl RecordingVcs {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every call whose log line starts with `prefix` fail
    pub(crate) fn fail(&self, prefix: &str) {
        self.journal.failing.lock().unwrap().push(prefix.to_string());
    }

    pub(crate) fn set_behind(&self, behind: bool) {
        *self.behind.lock().unwrap() = behind;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.journal.calls.lock().unwrap().clone()
    }
}

impl VersionControl for RecordingVcs {
    fn stage(&self, path: &Path) -> Result<(), VersionControlError> {
        if self.journal.record(format!("stage {}", leaf(path))) {
            Ok(())
        } else {
            Err(VersionControlError::PathNotFound(path.to_path_buf()))
        }
    }

    fn commit(&self, message: &str, scope: &Path) -> Result<(), VersionControlError> {
        if self.journal.record(format!("commit {}: {}", leaf(scope), message)) {
            Ok(())
        } else {
            Err(VersionControlError::NothingToCommit(scope.to_path_buf()))
        }
    }

    fn tag(&self, name: &str, message: &str) -> Result<(), VersionControlError> {
        if self.journal.record(format!("tag {}: {}", name, message)) {
            Ok(())
        } else {
            Err(VersionControlError::TagExists(name.to_string()))
        }
    }

    fn push(&self, remote: &str, branch: &str) -> Result<(), VersionControlError> {
        if self.journal.record(format!("push {} {}", remote, branch)) {
            Ok(())
        } else {
            Err(VersionControlError::PushFailed(format!("{remote}/{branch}")))
        }
    }

    fn push_tags(&self, remote: &str) -> Result<(), VersionControlError> {
        if self.journal.record(format!("push-tags {}", remote)) {
            Ok(())
        } else {
            Err(VersionControlError::PushFailed(format!("{remote} --tags")))
        }
    }

    fn is_behind_remote(&self, remote: &str, branch: &str) -> Result<bool, VersionControlError> {
        if self.journal.record(format!("behind? {} {}", remote, branch)) {
            Ok(*self.behind.lock().unwrap())
        } else {
            Err(VersionControlError::RemoteNotFound(remote.to_string()))
        }
    }
}

/// Package manager that records every call instead of running npm
#[derive(Default)]
pub(crate) struct RecordingPackageManager {
    journal: Journal,
}

impl RecordingPackageManager {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every call whose log line starts with `prefix` fail
    pub(crate) fn fail(&self, prefix: &str) {
        self.journal.failing.lock().unwrap().push(prefix.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.journal.calls.lock().unwrap().clone()
    }

    fn check(&self, call: String) -> Result<(), PackageManagerError> {
        if self.journal.record(call.clone()) {
            Ok(())
        } else {
            Err(PackageManagerError::CommandFailed {
                command: call,
                reason: "injected failure".to_string(),
            })
        }
    }
}

fn describe(target: Target<'_>) -> String {
    if target.silent {
        format!("{} --silent", leaf(target.dir))
    } else {
        leaf(target.dir)
    }
}

impl PackageManager for RecordingPackageManager {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn install(&self, target: Target<'_>) -> Result<(), PackageManagerError> {
        self.check(format!("install {}", describe(target)))
    }

    fn register_link(&self, target: Target<'_>) -> Result<(), PackageManagerError> {
        self.check(format!("register {}", describe(target)))
    }

    fn link(&self, target: Target<'_>, name: &str) -> Result<(), PackageManagerError> {
        self.check(format!("link {} -> {}", describe(target), name))
    }

    fn run_script(&self, target: Target<'_>, script: &str) -> Result<(), PackageManagerError> {
        self.check(format!("run {} {}", describe(target), script))
    }

    fn publish(&self, target: Target<'_>) -> Result<(), PackageManagerError> {
        self.check(format!("publish {}", describe(target)))
    }
}

/// A temporary monorepo with recording collaborators
pub(crate) struct Fixture {
    pub(crate) temp: TempDir,
    pub(crate) vcs: Arc<RecordingVcs>,
    pub(crate) npm: Arc<RecordingPackageManager>,
}

impl Fixture {
    /// Create a monorepo whose `packages/` holds one directory per entry
    pub(crate) fn new(packages: &[(&str, &str)]) -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(PACKAGES_DIR)).unwrap();
        let fixture = Self {
            temp,
            vcs: RecordingVcs::new(),
            npm: RecordingPackageManager::new(),
        };
        for (dir, manifest) in packages {
            fixture.add_package(dir, manifest);
        }
        fixture
    }

    /// Create the canonical single-package fixture
    pub(crate) fn foo() -> Self {
        Self::new(&[(
            "foo",
            r#"{"name": "mono-repos-fixture-foo", "version": "0.0.0"}"#,
        )])
    }

    pub(crate) fn add_package(&self, dir: &str, manifest: &str) {
        let root = self.packages_path().join(dir);
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("package.json"), manifest).unwrap();
    }

    pub(crate) fn root(&self) -> &Path {
        self.temp.path()
    }

    pub(crate) fn packages_path(&self) -> PathBuf {
        self.temp.path().join(PACKAGES_DIR)
    }

    pub(crate) fn workspace(&self) -> Workspace {
        Workspace::new(self.root(), self.vcs.clone(), self.npm.clone())
    }
}

/// Minimal manifest JSON
pub(crate) fn manifest(name: &str, version: &str) -> String {
    format!(r#"{{"name": "{name}", "version": "{version}"}}"#)
}
