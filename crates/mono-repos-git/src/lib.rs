//! mono-repos git - version control for the release pipeline
//!
//! Staging and annotated tags go through `git2`. Commits, pushes and fetches
//! shell out to the `git` CLI so hooks and credential helpers keep working.

mod cli;
mod client;
mod remote;
mod repository;
mod tags;

#[cfg(test)]
mod testing;

pub use cli::git_commit;
pub use client::GitClient;
pub use remote::{git_fetch, git_push, git_push_tags};
pub use repository::{GitRepo, Result};
