use std::collections::HashSet;

use tracing::debug;

use super::{Error, FileSystem, Repository, Result};
use crate::object::{Commit, Id, Object};

/// One commit reached while walking history.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogEntry {
    pub id: Id,
    pub commit: Commit,
}

impl<F: FileSystem> Repository<F> {
    /// Walk the commit graph starting at `start` (any name accepted by
    /// [`find_object`](Repository::find_object)).
    ///
    /// Commits are visited depth-first with the first declared parent
    /// explored before later parents. Each commit appears once, however many
    /// paths lead to it. Fails with `NotACommit` if a non-commit object is
    /// reached.
    pub fn log(&self, start: &str) -> Result<Vec<LogEntry>> {
        let mut pending = vec![self.find_object(start)?];
        let mut visited = HashSet::new();
        let mut entries = Vec::new();

        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }

            let commit = match self.read_object(&id)? {
                Object::Commit(commit) => commit,
                other => {
                    return Err(Error::NotACommit {
                        id,
                        kind: other.kind(),
                    })
                }
            };

            pending.extend(commit.parent_ids()?.into_iter().rev());
            entries.push(LogEntry { id, commit });
        }

        debug!(start, commits = entries.len(), "walked history");
        Ok(entries)
    }
}

/// Render a log as the serialized commits separated by blank lines.
pub fn format_log(entries: &[LogEntry]) -> Result<String> {
    let mut commits = Vec::with_capacity(entries.len());
    for entry in entries {
        let body = entry.commit.serialize()?;
        commits.push(String::from_utf8_lossy(&body).into_owned());
    }
    Ok(commits.join("\n\n"))
}
