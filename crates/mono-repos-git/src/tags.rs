//! Tag operations

use tracing::{info, instrument};

use mono_repos_core::error::VersionControlError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Whether a tag called `name` exists
    pub fn has_tag(&self, name: &str) -> Result<bool> {
        let tag_ref = format!("refs/tags/{}", name);

        match self.repo.find_reference(&tag_ref) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(VersionControlError::Git2(e)),
        }
    }

    /// Create an annotated tag at HEAD
    #[instrument(skip(self, message))]
    pub fn create_tag(&self, name: &str, message: &str) -> Result<git2::Oid> {
        if self.has_tag(name)? {
            return Err(VersionControlError::TagExists(name.to_string()));
        }

        let head = self
            .head_commit()?
            .ok_or_else(|| VersionControlError::CommandFailed {
                command: "tag".to_string(),
                reason: "HEAD has no commits".to_string(),
            })?;

        let sig = self.repo.signature()?;
        let oid = self.repo.tag(name, head.as_object(), &sig, message, false)?;

        info!(name, commit = %head.id(), "created tag");
        Ok(oid)
    }
}
