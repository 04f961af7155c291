//! Monorepo support
//!
//! This module provides the workspace/package model:
//! - Member discovery under `packages/`
//! - Fail-fast fan-out of operations over every member
//! - The per-package release pipeline and sibling linking

pub mod operation;
pub mod package;
pub mod workspace;

#[cfg(test)]
pub(crate) mod testing;

pub use operation::{Operation, Outcome};
pub use package::{release_message, release_tag, Package, DEPENDENCY_DIRS};
pub use workspace::{Workspace, PACKAGES_DIR};
