use super::{Error, Kind};

/// File content. A blob's body has no further structure.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Blob {
    data: Option<Vec<u8>>,
}

impl Blob {
    pub fn new<D: Into<Vec<u8>>>(data: D) -> Blob {
        Blob {
            data: Some(data.into()),
        }
    }

    pub fn deserialize(data: &[u8]) -> Blob {
        Blob::new(data)
    }

    /// Return the stored bytes verbatim.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        self.data.clone().ok_or(Error::EmptyBody(Kind::Blob))
    }

    /// Borrow the stored bytes, if any.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}
