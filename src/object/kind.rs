use std::fmt::{self, Display, Formatter};

use super::Error;

/// Describes the fundamental git object type (blob, tree, commit, or tag).
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl Kind {
    /// Match the kind tag found at the front of an object envelope.
    ///
    /// The match is exact: `"Blob"` or `"blob "` are not recognized.
    pub fn from_tag(tag: &[u8]) -> Result<Kind, Error> {
        match tag {
            b"blob" => Ok(Kind::Blob),
            b"tree" => Ok(Kind::Tree),
            b"commit" => Ok(Kind::Commit),
            b"tag" => Ok(Kind::Tag),
            _ => Err(Error::UnknownObjectKind(
                String::from_utf8_lossy(tag).into_owned(),
            )),
        }
    }

    /// Return the tag used for this kind in an object envelope.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
            Kind::Tag => "tag",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
