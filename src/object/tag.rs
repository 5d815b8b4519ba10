use super::{kvlm, Error, Kind, Kvlm};

const TAG_KEYS: &[&str] = &["object", "author"];

/// An annotated tag: a named pointer to another object, with a message.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tag {
    doc: Kvlm,
}

impl Tag {
    /// Wrap an already-built header document.
    pub fn new(doc: Kvlm) -> Result<Tag, Error> {
        kvlm::check_keys(&doc, Kind::Tag, TAG_KEYS)?;
        Ok(Tag { doc })
    }

    pub fn deserialize(data: &[u8]) -> Result<Tag, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::InvalidUtf8(Kind::Tag))?;
        Tag::new(Kvlm::parse(text))
    }

    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        if self.doc.is_empty() {
            return Err(Error::EmptyBody(Kind::Tag));
        }
        Ok(self.doc.to_string().into_bytes())
    }

    pub fn document(&self) -> &Kvlm {
        &self.doc
    }

    pub fn message(&self) -> &str {
        kvlm::message_text(&self.doc)
    }

    pub fn author(&self) -> &str {
        self.doc.first("author").unwrap_or_default()
    }

    /// The ID of the tagged object, as written in the header.
    pub fn object(&self) -> Option<&str> {
        self.doc.first("object")
    }
}
