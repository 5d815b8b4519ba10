//! Represents a git repository: a `.git` directory holding objects and
//! references, reached through an injected [`FileSystem`].
//!
//! ## Design Goals
//!
//! The repository does not assume where its bytes live. It is constructed
//! with a [`FileSystem`] implementation: [`OnDiskFs`] for repositories on
//! the local file system, [`MemoryFs`] for repositories held entirely in
//! memory. Every other component (object store, references, log) goes
//! through the repository's file system.

use std::path::{Path, PathBuf};

use tracing::debug;

mod config;
pub use config::Config;

mod error;
pub use error::{Error, Result};

pub mod fs;
pub use fs::{FileSystem, MemoryFs, OnDiskFs};

mod log;
pub use self::log::{format_log, LogEntry};

mod objects;

mod refs;
pub use refs::{list_refs, Ref};

/// A git repository rooted at a working directory.
#[derive(Debug)]
pub struct Repository<F: FileSystem = OnDiskFs> {
    fs: F,
    work_dir: PathBuf,
    git_dir: PathBuf,
    config: Config,
}

impl<F: FileSystem> Repository<F> {
    /// Open an existing repository whose `.git` directory is directly
    /// inside `work_dir`.
    ///
    /// The `config` file must exist and declare `repositoryformatversion = 0`.
    pub fn open<P: AsRef<Path>>(fs: F, work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();

        let git_dir = work_dir.join(".git");
        if !fs.is_dir(&git_dir) {
            return Err(Error::GitDirDoesntExist(git_dir));
        }

        let config_path = git_dir.join("config");
        if !fs.exists(&config_path) {
            return Err(Error::MissingConfig(config_path));
        }

        let config_bytes = fs.read(&config_path)?;
        let config = Config::parse(&String::from_utf8_lossy(&config_bytes))?;
        if config.repository_format_version != "0" {
            return Err(Error::UnsupportedFormatVersion(
                config.repository_format_version,
            ));
        }

        Ok(Repository {
            fs,
            work_dir,
            git_dir,
            config,
        })
    }

    /// Creates a new, empty git repository.
    ///
    /// `work_dir` is created if it doesn't exist. It is an error if it exists
    /// but is not a directory, or if it already contains a `.git` directory.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    pub fn init<P: AsRef<Path>>(fs: F, work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();

        if fs.exists(&work_dir) {
            if !fs.is_dir(&work_dir) {
                return Err(Error::NotADirectory(work_dir));
            }
            if fs.exists(&work_dir.join(".git")) {
                return Err(Error::GitDirShouldntExist(work_dir.join(".git")));
            }
        } else {
            fs.make_dir(&work_dir)?;
        }

        let repo = Repository {
            fs,
            git_dir: work_dir.join(".git"),
            work_dir,
            config: Config::default(),
        };

        repo.dir("branches", true)?;
        repo.dir("objects", true)?;
        repo.dir("refs/tags", true)?;
        repo.dir("refs/heads", true)?;

        repo.create_file("description", DESCRIPTION)?;
        repo.create_file("HEAD", "ref: refs/heads/master\n")?;
        repo.create_file("config", &repo.config.to_string())?;

        debug!(git_dir = %repo.git_dir.display(), "initialized repository");
        Ok(repo)
    }

    /// Discover a repository starting at `start` and walking up through its
    /// parent directories until one containing `.git` is found.
    pub fn find<P: AsRef<Path>>(fs: F, start: P) -> Result<Self> {
        let start = fs.canonicalize(start.as_ref())?;

        let mut dir = start.as_path();
        loop {
            if fs.is_dir(&dir.join(".git")) {
                let work_dir = dir.to_path_buf();
                return Repository::open(fs, work_dir);
            }

            dir = match dir.parent() {
                Some(parent) => parent,
                None => return Err(Error::NotARepository(start.clone())),
            };
        }
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    /// Return the `[core]` configuration read when the repository was opened.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return the file system this repository reads and writes through.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Compute a path relative to the `.git` directory.
    pub fn path<P: AsRef<Path>>(&self, rel: P) -> PathBuf {
        self.git_dir.join(rel)
    }

    /// Compute a path under the `.git` directory for a file.
    ///
    /// Returns `None` if the file's parent directory doesn't exist and `mkdir`
    /// is false. With `mkdir`, missing parent directories are created.
    pub fn file<P: AsRef<Path>>(&self, rel: P, mkdir: bool) -> Result<Option<PathBuf>> {
        let path = self.path(rel);
        let parent = match path.parent() {
            Some(parent) => parent.to_path_buf(),
            None => return Ok(Some(path)),
        };

        Ok(self.ensure_dir(parent, mkdir)?.map(|_| path))
    }

    /// Compute a path under the `.git` directory for a directory.
    ///
    /// Returns `None` if it doesn't exist and `mkdir` is false. It is an
    /// error if something other than a directory exists at that path.
    pub fn dir<P: AsRef<Path>>(&self, rel: P, mkdir: bool) -> Result<Option<PathBuf>> {
        self.ensure_dir(self.path(rel), mkdir)
    }

    fn ensure_dir(&self, path: PathBuf, mkdir: bool) -> Result<Option<PathBuf>> {
        if self.fs.exists(&path) {
            if self.fs.is_dir(&path) {
                Ok(Some(path))
            } else {
                Err(Error::NotADirectory(path))
            }
        } else if mkdir {
            self.fs.make_dir(&path)?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    /// Write `data` to a file under the `.git` directory, creating parent
    /// directories as needed.
    pub(crate) fn write_file<P: AsRef<Path>>(&self, rel: P, data: &[u8]) -> Result<PathBuf> {
        let rel = rel.as_ref();
        let path = self
            .file(rel, true)?
            .ok_or_else(|| Error::NotADirectory(self.path(rel)))?;

        self.fs.write(&path, data)?;
        Ok(path)
    }

    fn create_file(&self, rel: &str, text: &str) -> Result<()> {
        self.write_file(rel, text.as_bytes()).map(|_| ())
    }
}

const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";
