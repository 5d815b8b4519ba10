//! References: small files under the `.git` directory that name an object,
//! either directly (a hex object ID) or indirectly (`ref: <other ref>`).

use std::collections::HashSet;

use tracing::{debug, trace};

use super::{Error, FileSystem, Repository, Result};
use crate::object::Id;

const REDIRECT: &str = "ref: ";

/// A named reference such as `HEAD` or `refs/heads/master`.
///
/// `path` is relative to the `.git` directory. `data` is `None` until the
/// reference is either read from disk or given a value to write.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ref {
    path: String,
    data: Option<String>,
}

impl Ref {
    pub fn new<P: Into<String>>(path: P) -> Ref {
        Ref {
            path: path.into(),
            data: None,
        }
    }

    pub fn with_data<P: Into<String>, D: Into<String>>(path: P, data: D) -> Ref {
        Ref {
            path: path.into(),
            data: Some(data.into()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Load this reference's data from the repository.
    ///
    /// Trailing whitespace is dropped. A missing or empty file leaves the
    /// reference without data. A file that is not UTF-8 is `NonUtf8Ref`.
    pub fn read<F: FileSystem>(&mut self, repo: &Repository<F>) -> Result<Option<&str>> {
        let path = repo.path(&self.path);
        let fs = repo.fs();

        self.data = if fs.exists(&path) && !fs.is_dir(&path) {
            let raw = fs.read(&path)?;
            let text = std::str::from_utf8(&raw)
                .map_err(|_| Error::NonUtf8Ref(self.path.clone()))?
                .trim_end();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        } else {
            None
        };

        Ok(self.data.as_deref())
    }

    /// Follow `ref: ` redirects until reaching a reference whose data is not
    /// a redirect, and return that data.
    ///
    /// Data is read from disk for this reference (if not already present)
    /// and for every reference along the chain. Fails with `DatalessRef` if
    /// any link has no data and `ReferenceCycle` if the chain loops.
    pub fn resolve<F: FileSystem>(&mut self, repo: &Repository<F>) -> Result<String> {
        if self.data.is_none() {
            self.read(repo)?;
        }

        let mut visited = HashSet::new();
        visited.insert(self.path.clone());

        let mut data = match &self.data {
            Some(data) => data.clone(),
            None => return Err(Error::DatalessRef(self.path.clone())),
        };

        while let Some(target) = data.strip_prefix(REDIRECT) {
            let target = target.trim().to_string();
            trace!(from = %self.path, to = %target, "following reference");

            if !visited.insert(target.clone()) {
                return Err(Error::ReferenceCycle(target));
            }

            let mut next = Ref::new(target.clone());
            data = match next.read(repo)? {
                Some(data) => data.to_string(),
                None => return Err(Error::DatalessRef(target)),
            };
        }

        Ok(data)
    }

    /// Resolve this reference and parse the result as an object ID.
    pub fn resolve_id<F: FileSystem>(&mut self, repo: &Repository<F>) -> Result<Id> {
        Ok(self.resolve(repo)?.parse::<Id>()?)
    }

    /// Store this reference's data verbatim, creating parent directories as
    /// needed.
    pub fn write<F: FileSystem>(&self, repo: &Repository<F>) -> Result<()> {
        let data = match &self.data {
            Some(data) if !data.is_empty() => data,
            _ => return Err(Error::DatalessRef(self.path.clone())),
        };

        repo.write_file(&self.path, data.as_bytes())?;
        debug!(path = %self.path, %data, "updated reference");
        Ok(())
    }
}

/// List every reference stored under `dir` (relative to the `.git`
/// directory), recursing into subdirectories. Entries are ordered by name
/// within each directory. A missing directory yields no references.
pub fn list_refs<F: FileSystem>(repo: &Repository<F>, dir: &str) -> Result<Vec<Ref>> {
    let mut refs = Vec::new();
    collect_refs(repo, dir, &mut refs)?;
    Ok(refs)
}

fn collect_refs<F: FileSystem>(repo: &Repository<F>, dir: &str, refs: &mut Vec<Ref>) -> Result<()> {
    let fs = repo.fs();
    if !fs.is_dir(&repo.path(dir)) {
        return Ok(());
    }

    for name in fs.list(&repo.path(dir))? {
        let rel = format!("{}/{}", dir, name);
        if fs.is_dir(&repo.path(&rel)) {
            collect_refs(repo, &rel, refs)?;
        } else {
            refs.push(Ref::new(rel));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MemoryFs;

    const ID: &str = "3cd9329ac53613a0bfa198ae28f3af957e49573c";

    fn memory_repo() -> Repository<MemoryFs> {
        Repository::init(MemoryFs::new(), "/work").unwrap()
    }

    #[test]
    fn two_hop_chain() {
        let repo = memory_repo();
        Ref::with_data("refs/heads/master", format!("{}\n", ID))
            .write(&repo)
            .unwrap();
        Ref::with_data("refs/heads/alias", "ref: refs/heads/master\n")
            .write(&repo)
            .unwrap();
        Ref::with_data("TOP", "ref: refs/heads/alias")
            .write(&repo)
            .unwrap();

        let mut r = Ref::new("TOP");
        assert_eq!(r.resolve(&repo).unwrap(), ID);
        assert_eq!(r.data(), Some("ref: refs/heads/alias"));
        assert_eq!(r.resolve_id(&repo).unwrap().to_string(), ID);
    }

    #[test]
    fn direct_data_is_not_read() {
        let repo = memory_repo();
        let mut r = Ref::with_data("refs/heads/nowhere", "aaa");
        assert_eq!(r.resolve(&repo).unwrap(), "aaa");
    }

    #[test]
    fn head_of_empty_repository() {
        let repo = memory_repo();

        let mut head = Ref::new("HEAD");
        assert_eq!(head.read(&repo).unwrap(), Some("ref: refs/heads/master"));

        let err = head.resolve(&repo).unwrap_err();
        assert_eq!(err.to_string(), "reference refs/heads/master has no data");
    }

    #[test]
    fn missing_ref_is_dataless() {
        let repo = memory_repo();
        let mut r = Ref::new("refs/tags/none");
        assert_eq!(r.read(&repo).unwrap(), None);
        assert!(matches!(r.resolve(&repo).unwrap_err(), Error::DatalessRef(_)));
    }

    #[test]
    fn cycle() {
        let repo = memory_repo();
        Ref::with_data("refs/heads/a", "ref: refs/heads/b")
            .write(&repo)
            .unwrap();
        Ref::with_data("refs/heads/b", "ref: refs/heads/a")
            .write(&repo)
            .unwrap();

        let err = Ref::new("refs/heads/a").resolve(&repo).unwrap_err();
        if let Error::ReferenceCycle(path) = err {
            assert_eq!(path, "refs/heads/a");
        } else {
            panic!("Unexpected error response: {:?}", err);
        }

        Ref::with_data("SELF", "ref: SELF").write(&repo).unwrap();
        let err = Ref::new("SELF").resolve(&repo).unwrap_err();
        assert!(matches!(err, Error::ReferenceCycle(_)));
    }

    #[test]
    fn non_utf8_data() {
        let repo = memory_repo();
        repo.write_file("refs/heads/bad", b"3cd9329a\xff\xfe\n").unwrap();

        let mut r = Ref::new("refs/heads/bad");
        let err = r.read(&repo).unwrap_err();
        assert_eq!(err.to_string(), "reference refs/heads/bad is not valid UTF-8");
        assert_eq!(r.data(), None);

        Ref::with_data("HEAD", "ref: refs/heads/bad").write(&repo).unwrap();
        let err = Ref::new("HEAD").resolve(&repo).unwrap_err();
        assert!(matches!(err, Error::NonUtf8Ref(path) if path == "refs/heads/bad"));

        assert!(matches!(
            repo.find_object("bad").unwrap_err(),
            Error::NonUtf8Ref(_)
        ));
    }

    #[test]
    fn resolve_id_rejects_non_ids() {
        let repo = memory_repo();
        let err = Ref::with_data("refs/tags/x", "aaa")
            .resolve_id(&repo)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidId(_)));
    }

    #[test]
    fn write_verbatim() {
        let repo = memory_repo();
        Ref::with_data("refs/tags/a", "aaa").write(&repo).unwrap();
        Ref::with_data("refs/tags/a", "abc").write(&repo).unwrap();
        Ref::with_data("refs/tags/a/b/c", "ccc")
            .write(&repo)
            .unwrap_err();
        Ref::with_data("refs/tags/x/y/z", "zzz").write(&repo).unwrap();

        let fs = repo.fs();
        assert_eq!(fs.read(&repo.path("refs/tags/a")).unwrap(), b"abc");
        assert_eq!(fs.read(&repo.path("refs/tags/x/y/z")).unwrap(), b"zzz");
    }

    #[test]
    fn write_without_data() {
        let repo = memory_repo();
        let err = Ref::new("refs/tags/a").write(&repo).unwrap_err();
        assert_eq!(err.to_string(), "reference refs/tags/a has no data");

        let err = Ref::with_data("refs/tags/a", "").write(&repo).unwrap_err();
        assert!(matches!(err, Error::DatalessRef(_)));
    }

    #[test]
    fn list_sorted_recursive() {
        let repo = memory_repo();
        for (path, data) in &[
            ("refs/tags/f", "fff"),
            ("refs/tags/c/e", "eee"),
            ("refs/tags/a", "aaa"),
            ("refs/tags/c/d", "ddd"),
            ("refs/tags/b", "bbb"),
        ] {
            Ref::with_data(*path, *data).write(&repo).unwrap();
        }

        let listed: Vec<String> = list_refs(&repo, "refs")
            .unwrap()
            .iter_mut()
            .map(|r| format!("{} {}", r.resolve(&repo).unwrap(), r.path()))
            .collect();

        assert_eq!(
            listed,
            vec![
                "aaa refs/tags/a",
                "bbb refs/tags/b",
                "ddd refs/tags/c/d",
                "eee refs/tags/c/e",
                "fff refs/tags/f",
            ]
        );
    }

    #[test]
    fn list_missing_dir() {
        let repo = memory_repo();
        assert!(list_refs(&repo, "refs").unwrap().is_empty());
        assert!(list_refs(&repo, "refs/remotes").unwrap().is_empty());
    }
}
