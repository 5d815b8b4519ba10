use super::{kvlm, Error, Id, Kind, Kvlm};

const COMMIT_KEYS: &[&str] = &["tree", "parent", "author", "committer"];

/// A commit: a snapshot (tree), its parents, attribution, and a message.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Commit {
    doc: Kvlm,
}

impl Commit {
    /// Wrap an already-built header document.
    ///
    /// Fails with `InvalidHeaderKey` if the document carries a header
    /// that does not belong in a commit.
    pub fn new(doc: Kvlm) -> Result<Commit, Error> {
        kvlm::check_keys(&doc, Kind::Commit, COMMIT_KEYS)?;
        Ok(Commit { doc })
    }

    /// Parse the body of a commit object.
    pub fn deserialize(data: &[u8]) -> Result<Commit, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::InvalidUtf8(Kind::Commit))?;
        Commit::new(Kvlm::parse(text))
    }

    /// Print the body of a commit object.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        if self.doc.is_empty() {
            return Err(Error::EmptyBody(Kind::Commit));
        }
        Ok(self.doc.to_string().into_bytes())
    }

    /// The underlying header document.
    pub fn document(&self) -> &Kvlm {
        &self.doc
    }

    /// The commit message, without the blank line separating it from the headers.
    pub fn message(&self) -> &str {
        kvlm::message_text(&self.doc)
    }

    pub fn author(&self) -> &str {
        self.doc.first("author").unwrap_or_default()
    }

    pub fn committer(&self) -> &str {
        self.doc.first("committer").unwrap_or_default()
    }

    /// The ID of the tree this commit records, as written in the header.
    pub fn tree(&self) -> Option<&str> {
        self.doc.first("tree")
    }

    /// Parent commit IDs in the order they were declared.
    pub fn parents(&self) -> &[String] {
        self.doc.get("parent")
    }

    /// Parent commit IDs, parsed.
    pub fn parent_ids(&self) -> Result<Vec<Id>, Error> {
        self.parents()
            .iter()
            .map(|p| {
                p.parse::<Id>().map_err(|err| Error::InvalidHeaderValue {
                    kind: Kind::Commit,
                    key: "parent".to_string(),
                    reason: err.to_string(),
                })
            })
            .collect()
    }
}
