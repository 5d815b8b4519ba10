use super::{parse_utils, Error, FileMode, Id, Kind};
use super::id::ID_LEN;

/// A single record in a tree object: the mode, name, and ID of one child.
///
/// The mode field is kept exactly as it was written (`40000` and `040000`
/// both decode to [`FileMode::Tree`]) and is encoded back unchanged, so a
/// decoded tree always hashes to the ID it was stored under.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub name: String,
    pub id: Id,
    mode_field: String,
}

impl TreeEntry {
    /// Create an entry using git's spelling of the mode (`40000` for trees).
    pub fn new<S: Into<String>>(mode: FileMode, name: S, id: Id) -> TreeEntry {
        TreeEntry {
            mode,
            name: name.into(),
            id,
            mode_field: mode.as_octal_str().to_string(),
        }
    }

    /// The mode digits as they appear in the encoded tree.
    pub fn mode_field(&self) -> &str {
        &self.mode_field
    }
}

/// A directory listing.
///
/// Entries are kept in the order they were given or decoded. No sorting is
/// applied when encoding and none is checked when decoding.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tree {
    entries: Option<Vec<TreeEntry>>,
}

impl Tree {
    /// Create a tree from a list of entries.
    pub fn new(entries: Vec<TreeEntry>) -> Tree {
        Tree {
            entries: Some(entries),
        }
    }

    /// Decode the binary body of a tree object.
    pub fn deserialize(data: &[u8]) -> Result<Tree, Error> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < data.len() {
            let (entry, next) = decode_entry(data, pos)?;
            entries.push(entry);
            pos = next;
        }

        Ok(Tree::new(entries))
    }

    /// Encode this tree into the binary body of a tree object.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        let entries = self.entries.as_ref().ok_or(Error::EmptyBody(Kind::Tree))?;

        let mut data = Vec::new();
        for entry in entries {
            encode_entry(entry, &mut data);
        }

        Ok(data)
    }

    /// Return the entries of this tree (empty if never populated).
    pub fn entries(&self) -> &[TreeEntry] {
        self.entries.as_deref().unwrap_or(&[])
    }
}

fn encode_entry(entry: &TreeEntry, out: &mut Vec<u8>) {
    out.extend_from_slice(entry.mode_field.as_bytes());
    out.push(b' ');
    out.extend_from_slice(entry.name.as_bytes());
    out.push(0);
    out.extend_from_slice(entry.id.as_bytes());
}

fn decode_entry(data: &[u8], start: usize) -> Result<(TreeEntry, usize), Error> {
    let space = parse_utils::find_from(data, start, b' ')
        .ok_or_else(|| malformed(start, "missing mode terminator"))?;

    let mode_field = &data[start..space];
    if mode_field.len() != 5 && mode_field.len() != 6 {
        return Err(malformed(start, "mode must be 5 or 6 digits"));
    }
    let mode = FileMode::from_octal_slice(mode_field)
        .ok_or_else(|| malformed(start, "unrecognized mode"))?;
    // Only octal digits get past `from_octal_slice`.
    let mode_field = String::from_utf8_lossy(mode_field).into_owned();

    let nul = parse_utils::find_from(data, space + 1, 0)
        .ok_or_else(|| malformed(start, "missing name terminator"))?;
    let name = std::str::from_utf8(&data[space + 1..nul])
        .map_err(|_| malformed(start, "name is not valid UTF-8"))?;

    let end = nul + 1 + ID_LEN;
    if end > data.len() {
        return Err(malformed(start, "truncated object ID"));
    }
    let id = Id::new(&data[nul + 1..end]).map_err(|_| malformed(start, "bad object ID"))?;

    let entry = TreeEntry {
        mode,
        name: name.to_string(),
        id,
        mode_field,
    };
    Ok((entry, end))
}

fn malformed(offset: usize, reason: &str) -> Error {
    Error::MalformedTree(format!("{} at byte {}", reason, offset))
}
