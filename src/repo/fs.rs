//! The file system a [`Repository`](super::Repository) reads and writes through.
//!
//! The repository never touches `std::fs` directly. It is handed a
//! [`FileSystem`] when opened: [`OnDiskFs`] for real repositories and
//! [`MemoryFs`] when a scratch repository that lives only in memory is
//! more convenient (mostly in tests).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

/// Primitive, blocking file operations.
pub trait FileSystem {
    /// Read the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or replace the file at `path`. The parent directory must exist.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Returns true if a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns true if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// List the names of the entries in a directory, sorted.
    fn list(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Create a directory and any missing parents.
    fn make_dir(&self, path: &Path) -> io::Result<()>;

    /// Return an absolute form of `path` with `.` and `..` resolved.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Implementation of [`FileSystem`] backed by the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnDiskFs;

impl FileSystem for OnDiskFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<String>>>()?;
        names.sort();
        Ok(names)
    }

    fn make_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

#[derive(Clone, Debug)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// Implementation of [`FileSystem`] that keeps everything in memory.
///
/// The tree starts with an empty root directory (`/`). Relative paths are
/// interpreted relative to the root.
#[derive(Debug)]
pub struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        MemoryFs::new()
    }
}

impl MemoryFs {
    pub fn new() -> MemoryFs {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir);

        MemoryFs {
            nodes: RefCell::new(nodes),
        }
    }

    fn node(&self, path: &Path) -> Option<Node> {
        self.nodes.borrow().get(&normalize(path)).cloned()
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.node(path) {
            Some(Node::File(data)) => Ok(data),
            Some(Node::Dir) => Err(is_a_directory(path)),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let path = normalize(path);

        match path.parent().map(|p| self.node(p)) {
            Some(Some(Node::Dir)) => (),
            _ => return Err(not_found(&path)),
        }

        let mut nodes = self.nodes.borrow_mut();
        if let Some(Node::Dir) = nodes.get(&path) {
            return Err(is_a_directory(&path));
        }
        nodes.insert(path, Node::File(data.to_vec()));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.node(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::Dir))
    }

    fn list(&self, path: &Path) -> io::Result<Vec<String>> {
        let path = normalize(path);
        if !self.is_dir(&path) {
            return Err(not_found(&path));
        }

        let nodes = self.nodes.borrow();
        Ok(nodes
            .keys()
            .filter(|p| p.parent() == Some(path.as_path()))
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }

    fn make_dir(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        let mut nodes = self.nodes.borrow_mut();

        for ancestor in path.ancestors().collect::<Vec<_>>().into_iter().rev() {
            match nodes.get(ancestor) {
                Some(Node::Dir) => (),
                Some(Node::File(_)) => {
                    return Err(io::Error::new(
                        ErrorKind::AlreadyExists,
                        format!("{} is a file", ancestor.display()),
                    ));
                }
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::Dir);
                }
            }
        }

        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let path = normalize(path);
        if self.exists(&path) {
            Ok(path)
        } else {
            Err(not_found(&path))
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::from("/");
    for component in path.components() {
        match component {
            Component::Normal(name) => out.push(name),
            Component::ParentDir => {
                out.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => (),
        }
    }
    out
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        ErrorKind::NotFound,
        format!("{}: no such file or directory", path.display()),
    )
}

fn is_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        ErrorKind::Other,
        format!("{}: is a directory", path.display()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_write_and_read() {
        let fs = MemoryFs::new();
        fs.make_dir(Path::new("repo/sub")).unwrap();
        fs.write(Path::new("repo/sub/a"), b"aaa").unwrap();

        assert!(fs.exists(Path::new("/repo/sub/a")));
        assert!(!fs.is_dir(Path::new("/repo/sub/a")));
        assert!(fs.is_dir(Path::new("/repo")));
        assert_eq!(fs.read(Path::new("/repo/./sub/a")).unwrap(), b"aaa");

        fs.write(Path::new("repo/sub/a"), b"abc").unwrap();
        assert_eq!(fs.read(Path::new("repo/sub/a")).unwrap(), b"abc");
    }

    #[test]
    fn memory_write_needs_parent() {
        let fs = MemoryFs::new();
        let err = fs.write(Path::new("/nope/a"), b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn memory_read_missing() {
        let fs = MemoryFs::new();
        let err = fs.read(Path::new("/a")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        fs.make_dir(Path::new("/d")).unwrap();
        assert!(fs.read(Path::new("/d")).is_err());
    }

    #[test]
    fn memory_list_is_sorted_and_shallow() {
        let fs = MemoryFs::new();
        fs.make_dir(Path::new("/r/c/d")).unwrap();
        fs.write(Path::new("/r/b"), b"").unwrap();
        fs.write(Path::new("/r/a"), b"").unwrap();
        fs.write(Path::new("/r/c/d/e"), b"").unwrap();

        assert_eq!(fs.list(Path::new("/r")).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(fs.list(Path::new("/r/c")).unwrap(), vec!["d"]);
        assert!(fs.list(Path::new("/r/a")).is_err());
    }

    #[test]
    fn memory_make_dir_through_file() {
        let fs = MemoryFs::new();
        fs.write(Path::new("/f"), b"").unwrap();
        let err = fs.make_dir(Path::new("/f/g")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn memory_canonicalize() {
        let fs = MemoryFs::new();
        fs.make_dir(Path::new("/a/b")).unwrap();
        assert_eq!(
            fs.canonicalize(Path::new("a/b/../b/.")).unwrap(),
            PathBuf::from("/a/b")
        );
        assert!(fs.canonicalize(Path::new("/x")).is_err());
    }

    #[test]
    fn on_disk_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let fs = OnDiskFs;

        let sub = dir.path().join("x/y");
        fs.make_dir(&sub).unwrap();
        fs.write(&sub.join("f"), b"data").unwrap();

        assert!(fs.is_dir(&sub));
        assert!(fs.exists(&sub.join("f")));
        assert_eq!(fs.read(&sub.join("f")).unwrap(), b"data");
        assert_eq!(fs.list(&dir.path().join("x")).unwrap(), vec!["y"]);
    }
}
