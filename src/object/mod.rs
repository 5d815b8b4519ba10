//! Represents the git concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.
//!
//! Every object is framed the same way before hashing and storage:
//!
//! ```text
//! <kind> SP <decimal body length> NUL <body>
//! ```
//!
//! This framing is called the envelope. The object's [`Id`] is the SHA-1
//! digest of the envelope, so identical content always has the same ID.

use sha1::{Digest, Sha1};

mod blob;
pub use blob::Blob;

mod commit;
pub use commit::Commit;

mod error;
pub use error::Error;

mod file_mode;
pub use file_mode::FileMode;

mod id;
pub use id::{Id, ParseIdError};

mod kind;
pub use kind::Kind;

pub mod kvlm;
pub use kvlm::Kvlm;

pub(crate) mod parse_utils;

mod tag;
pub use tag::Tag;

mod tree;
pub use tree::{Tree, TreeEntry};

/// A single git object with its decoded body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    /// Decode an object body of the given kind.
    pub fn new(kind: Kind, body: &[u8]) -> Result<Object, Error> {
        Ok(match kind {
            Kind::Blob => Object::Blob(Blob::deserialize(body)),
            Kind::Tree => Object::Tree(Tree::deserialize(body)?),
            Kind::Commit => Object::Commit(Commit::deserialize(body)?),
            Kind::Tag => Object::Tag(Tag::deserialize(body)?),
        })
    }

    /// Decode an object body given the kind tag as it appears in an envelope
    /// (`blob`, `tree`, `commit`, or `tag`).
    pub fn from_tag(tag: &[u8], body: &[u8]) -> Result<Object, Error> {
        Object::new(Kind::from_tag(tag)?, body)
    }

    /// Split an envelope into kind and body and decode it.
    ///
    /// Fails with `MalformedObject` if the framing is damaged or if the
    /// declared length differs from the number of body bytes present.
    pub fn from_envelope(raw: &[u8]) -> Result<Object, Error> {
        let space = parse_utils::find_from(raw, 0, b' ')
            .ok_or_else(|| Error::MalformedObject("missing kind terminator".to_string()))?;
        let nul = parse_utils::find_from(raw, space + 1, 0)
            .ok_or_else(|| Error::MalformedObject("missing length terminator".to_string()))?;

        let length = &raw[space + 1..nul];
        if length.is_empty() || !length.iter().all(u8::is_ascii_digit) {
            return Err(Error::MalformedObject(
                "length is not a decimal number".to_string(),
            ));
        }
        let declared = std::str::from_utf8(length)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| Error::MalformedObject("length is out of range".to_string()))?;

        let body = &raw[nul + 1..];
        if declared != body.len() {
            return Err(Error::MalformedObject(format!(
                "bad length: declared {}, found {}",
                declared,
                body.len()
            )));
        }

        Object::from_tag(&raw[..space], body)
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        match self {
            Object::Blob(_) => Kind::Blob,
            Object::Tree(_) => Kind::Tree,
            Object::Commit(_) => Kind::Commit,
            Object::Tag(_) => Kind::Tag,
        }
    }

    /// Encode the object's body (without the envelope).
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        match self {
            Object::Blob(b) => b.serialize(),
            Object::Tree(t) => t.serialize(),
            Object::Commit(c) => c.serialize(),
            Object::Tag(t) => t.serialize(),
        }
    }

    /// Encode the object with its envelope.
    pub fn envelope(&self) -> Result<Vec<u8>, Error> {
        let body = self.serialize()?;

        let mut raw = Vec::with_capacity(body.len() + 32);
        raw.extend_from_slice(self.kind().as_str().as_bytes());
        raw.push(b' ');
        raw.extend_from_slice(body.len().to_string().as_bytes());
        raw.push(0);
        raw.extend_from_slice(&body);

        Ok(raw)
    }

    /// Computes the object's ID from its content, size, and type.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn id(&self) -> Result<Id, Error> {
        Ok(id_of_envelope(&self.envelope()?))
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Object::Commit(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Object::Tree(t) => Some(t),
            _ => None,
        }
    }
}

pub(crate) fn id_of_envelope(raw: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(raw);
    let final_hash = hasher.finalize();

    // SHA-1 always yields 20 bytes.
    let mut id = [0u8; 20];
    id.copy_from_slice(final_hash.as_slice());
    Id::from(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;

    #[test]
    fn blob_id() {
        // $ echo 'test content' | git hash-object --stdin
        // d670460b4b4aece5915caf5c68d12f560a9fe3e4

        let o = Object::Blob(Blob::new("test content\n"));
        assert_eq!(o.kind(), Kind::Blob);
        assert_eq!(
            o.id().unwrap().to_string(),
            "d670460b4b4aece5915caf5c68d12f560a9fe3e4"
        );
    }

    #[test]
    fn empty_blob_id() {
        let o = Object::Blob(Blob::new(Vec::new()));
        assert_eq!(
            o.id().unwrap().to_string(),
            "e69de29bb2d1d6434b8b29ae775ad8c2e48d5391"
        );
    }

    #[test]
    fn empty_tree_id() {
        let o = Object::Tree(Tree::new(Vec::new()));
        assert_eq!(
            o.id().unwrap().to_string(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[test]
    fn same_content_same_id() {
        let a = Object::new(Kind::Blob, b"Hello World").unwrap();
        let b = Object::from_tag(b"blob", b"Hello World").unwrap();
        assert_eq!(a.id().unwrap(), b.id().unwrap());
        assert_eq!(
            a.id().unwrap().to_string(),
            "5e1c309dae7f45e0f39b1bf3ac3cd9db12e7d689"
        );

        // Same bytes, different kind: different envelope, different ID.
        let c = Object::new(Kind::Commit, b"Hello World").unwrap();
        assert_ne!(a.id().unwrap(), c.id().unwrap());
    }

    #[test]
    fn envelope_layout() {
        let o = Object::Blob(Blob::new("abc"));
        assert_eq!(o.envelope().unwrap(), b"blob 3\0abc".to_vec());
    }

    #[test]
    fn unknown_kind() {
        let err = Object::from_tag(b"note", b"x").unwrap_err();
        assert_eq!(err, Error::UnknownObjectKind("note".to_string()));
    }

    #[test]
    fn unpopulated_object_has_no_id() {
        let o = Object::Blob(Blob::default());
        assert_eq!(o.id().unwrap_err(), Error::EmptyBody(Kind::Blob));
    }

    #[test]
    fn from_envelope() {
        let o = Object::from_envelope(b"blob 3\0abc").unwrap();
        assert_eq!(o, Object::Blob(Blob::new("abc")));

        let id = Id::from_str("01f02e32ce8a128dd7b1d16a45f2eff66ec23c2d").unwrap();
        let tree = Object::Tree(Tree::new(vec![TreeEntry::new(FileMode::Normal, "c", id)]));
        let back = Object::from_envelope(&tree.envelope().unwrap()).unwrap();
        assert_eq!(back, tree);
        assert!(back.as_tree().is_some());
        assert!(back.as_commit().is_none());
    }

    #[test]
    fn from_envelope_length_mismatch() {
        let err = Object::from_envelope(b"blob 4\0abc").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedObject("bad length: declared 4, found 3".to_string())
        );

        let err = Object::from_envelope(b"blob 2\0abc").unwrap_err();
        assert!(matches!(err, Error::MalformedObject(_)));
    }

    #[test]
    fn from_envelope_bad_framing() {
        assert!(matches!(
            Object::from_envelope(b"blob").unwrap_err(),
            Error::MalformedObject(_)
        ));
        assert!(matches!(
            Object::from_envelope(b"blob 3abc").unwrap_err(),
            Error::MalformedObject(_)
        ));
        assert!(matches!(
            Object::from_envelope(b"blob x\0abc").unwrap_err(),
            Error::MalformedObject(_)
        ));
        assert!(matches!(
            Object::from_envelope(b"note 3\0abc").unwrap_err(),
            Error::UnknownObjectKind(_)
        ));
    }

    #[test]
    fn from_envelope_length_is_plain_digits() {
        for raw in &[
            &b"blob +3\0abc"[..],
            &b"blob \0"[..],
            &b"blob 3 \0abc"[..],
            &b"blob -0\0"[..],
        ] {
            let err = Object::from_envelope(raw).unwrap_err();
            assert_eq!(
                err,
                Error::MalformedObject("length is not a decimal number".to_string())
            );
        }

        // Leading zeros are still decimal.
        let o = Object::from_envelope(b"blob 03\0abc").unwrap();
        assert_eq!(o, Object::Blob(Blob::new("abc")));

        let err = Object::from_envelope(b"blob 99999999999999999999999\0").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedObject("length is out of range".to_string())
        );
    }
}
