use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::Error;

/// Clone `source` as a bare repository into `target`.
///
/// This uses the system git command, which automatically handles:
/// - local paths and `file://` URLs
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
///
/// Callers decide whether a failure is fatal; the error carries git's stderr.
pub fn clone_bare(git: &str, source: &str, target: &Path) -> Result<(), Error> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    debug!("{} clone --bare {} {}", git, source, target.display());
    let output = Command::new(git)
        .args(["clone", "--quiet", "--bare", source])
        .arg(target)
        .output()
        .map_err(|e| Error::GitClone {
            source_location: source.to_string(),
            target: target.to_path_buf(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        let message = if stderr.contains("does not exist")
            || stderr.contains("Could not read from remote repository")
        {
            format!(
                "Source repository is unreachable. Check that the path or URL is correct.\n\
                Error: {}",
                stderr.trim_end()
            )
        } else {
            stderr.trim_end().to_string()
        };

        return Err(Error::GitClone {
            source_location: source.to_string(),
            target: target.to_path_buf(),
            message,
        });
    }

    Ok(())
}

/// Check whether `path` is a bare git repository.
pub fn is_bare_repository(git: &str, path: &Path) -> bool {
    let output = Command::new(git)
        .arg("--git-dir")
        .arg(path)
        .args(["rev-parse", "--is-bare-repository"])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim() == "true"
        }
        _ => false,
    }
}
