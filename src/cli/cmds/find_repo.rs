use std::path::Path;

use tinygit::repo::{OnDiskFs, Repository, Result};
use tracing::debug;

// Discover the repository containing `path`, walking up through parent
// directories until a `.git` directory is found.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Repository> {
    let repo = Repository::find(OnDiskFs, path)?;
    debug!(work_dir = %repo.work_dir().display(), "found repository");
    Ok(repo)
}
