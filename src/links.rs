//! Filesystem preparation for the overlay-network daemon.
//!
//! The daemon keeps its state under a well-known path; inside the container
//! that path is a symlink into the persistent configuration volume. The link
//! is established once at startup and removed again during teardown.
use std::{fs, io, os::unix::fs as unix_fs, path::Path};

use tracing::{debug, info};

use crate::error::EntrypointError;

/// Ensures `target_dir` exists and that `link_path` is a symbolic link
/// pointing at it.
///
/// Both halves are idempotent: an existing target directory is fine, and an
/// existing `link_path` is logged and skipped on the assumption that a prior
/// run or a mount already established it. Any other filesystem error is
/// fatal.
pub fn prepare_link(target_dir: &Path, link_path: &Path) -> Result<(), EntrypointError> {
    fs::create_dir_all(target_dir).map_err(|source| EntrypointError::LinkSetup {
        path: target_dir.to_path_buf(),
        source,
    })?;

    match unix_fs::symlink(target_dir, link_path) {
        Ok(()) => {
            debug!(
                "Created link {} -> {}",
                link_path.display(),
                target_dir.display()
            );
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            info!(
                "Symlink {} already exists, skipping creation",
                link_path.display()
            );
            Ok(())
        }
        Err(source) => Err(EntrypointError::LinkSetup {
            path: link_path.to_path_buf(),
            source,
        }),
    }
}

/// Removes `link_path`. An already-absent link is not an error; anything
/// else surfaces to the caller, which logs and continues since cleanup
/// failures must not block process exit.
pub fn remove_link(link_path: &Path) -> Result<(), EntrypointError> {
    match fs::remove_file(link_path) {
        Ok(()) => {
            debug!("Removed link {}", link_path.display());
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("Link {} already absent", link_path.display());
            Ok(())
        }
        Err(source) => Err(EntrypointError::LinkSetup {
            path: link_path.to_path_buf(),
            source,
        }),
    }
}
