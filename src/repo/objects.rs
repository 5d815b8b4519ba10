use std::io::{Read, Write};
use std::path::PathBuf;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::debug;

use super::{Error, FileSystem, Ref, Repository, Result};
use crate::object::{self, Id, Object};

impl<F: FileSystem> Repository<F> {
    /// Compute the ID of `object` and, if `persist` is true, store it as a
    /// loose object.
    ///
    /// The object is always rewritten when persisted, even if a file with
    /// the same ID already exists.
    pub fn write_object(&self, object: &Object, persist: bool) -> Result<Id> {
        let envelope = object.envelope()?;
        let id = object::id_of_envelope(&envelope);

        if persist {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&envelope)?;
            let compressed = encoder.finish()?;

            let path = self.write_file(Self::loose_object_path(&id), &compressed)?;
            debug!(%id, kind = %object.kind(), path = %path.display(), "wrote object");
        }

        Ok(id)
    }

    /// Read and decode the loose object with the given ID.
    pub fn read_object(&self, id: &Id) -> Result<Object> {
        let path = self.object_path(id);
        if !self.fs().exists(&path) {
            return Err(Error::ObjectNotFound(*id));
        }

        let compressed = self.fs().read(&path)?;
        let mut raw = Vec::new();
        ZlibDecoder::new(compressed.as_slice()).read_to_end(&mut raw)?;

        let object = Object::from_envelope(&raw)?;
        debug!(%id, kind = %object.kind(), "read object");
        Ok(object)
    }

    /// Return the path where the loose object with the given ID is stored.
    pub fn object_path(&self, id: &Id) -> PathBuf {
        self.path(Self::loose_object_path(id))
    }

    fn loose_object_path(id: &Id) -> PathBuf {
        let (dir, file) = id.loose_parts();
        ["objects", dir.as_str(), file.as_str()].iter().collect()
    }

    /// Resolve a name to an object ID.
    ///
    /// A full 40-digit hex ID is returned as-is. Any other name is looked up
    /// as a reference: first `name` itself (e.g. `HEAD`), then
    /// `refs/tags/<name>`, then `refs/heads/<name>`. Abbreviated IDs are
    /// not supported.
    pub fn find_object(&self, name: &str) -> Result<Id> {
        if let Ok(id) = name.parse::<Id>() {
            return Ok(id);
        }

        let candidates = [
            name.to_string(),
            format!("refs/tags/{}", name),
            format!("refs/heads/{}", name),
        ];

        for candidate in candidates.iter() {
            let mut r = Ref::new(candidate.as_str());
            if r.read(self)?.is_some() {
                return r.resolve_id(self);
            }
        }

        Err(Error::UnknownName(name.to_string()))
    }
}
