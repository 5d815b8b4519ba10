use super::Kind;

/// Describes the file type of a tree entry.
///
/// Git uses a variation on the Unix file permissions flags to denote a file's
/// intended type on disk. The following values are recognized:
///
/// * `0o100644` - normal file
/// * `0o100755` - executable file
/// * `0o120000` - symbolic link
/// * `0o040000` - tree (subdirectory)
/// * `0o160000` - submodule (aka gitlink)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FileMode {
    Normal,
    Executable,
    SymbolicLink,
    Tree,
    Submodule,
}

impl FileMode {
    /// Convert from git file-mode integer to `FileMode` enum.
    ///
    /// Returns `None` if the value is not one of the recognized constants.
    pub fn from_value(value: u32) -> Option<FileMode> {
        match value {
            0o100644 => Some(FileMode::Normal),
            0o100755 => Some(FileMode::Executable),
            0o120000 => Some(FileMode::SymbolicLink),
            0o040000 => Some(FileMode::Tree),
            0o160000 => Some(FileMode::Submodule),
            _ => None,
        }
    }

    /// Parse the ASCII octal mode field of a tree entry.
    ///
    /// Leading zeros are accepted, so both `40000` and `040000` describe a tree.
    /// Returns `None` for non-octal digits or unrecognized values.
    pub fn from_octal_slice(field: &[u8]) -> Option<FileMode> {
        if field.is_empty() || field.len() > 7 {
            return None;
        }

        let mut value: u32 = 0;
        for &c in field {
            match c {
                b'0'..=b'7' => value = (value << 3) | u32::from(c - b'0'),
                _ => return None,
            }
        }

        FileMode::from_value(value)
    }

    /// Convert from `FileMode` enum to git file-mode integer.
    pub fn to_value(self) -> u32 {
        match self {
            FileMode::Normal => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::SymbolicLink => 0o120000,
            FileMode::Tree => 0o040000,
            FileMode::Submodule => 0o160000,
        }
    }

    /// The ASCII form git writes into tree objects. Trees use five digits
    /// (`40000`), everything else six.
    pub fn as_octal_str(self) -> &'static str {
        match self {
            FileMode::Normal => "100644",
            FileMode::Executable => "100755",
            FileMode::SymbolicLink => "120000",
            FileMode::Tree => "40000",
            FileMode::Submodule => "160000",
        }
    }

    /// The mode zero-padded to six digits, as `ls-tree` prints it.
    pub fn padded(self) -> String {
        format!("{:06o}", self.to_value())
    }

    /// The kind of object an entry with this mode points at.
    pub fn object_kind(self) -> Kind {
        match self {
            FileMode::Tree => Kind::Tree,
            FileMode::Submodule => Kind::Commit,
            _ => Kind::Blob,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value() {
        assert_eq!(FileMode::from_value(0o100644).unwrap(), FileMode::Normal);
        assert_eq!(
            FileMode::from_value(0o100755).unwrap(),
            FileMode::Executable
        );
        assert_eq!(
            FileMode::from_value(0o120000).unwrap(),
            FileMode::SymbolicLink
        );
        assert_eq!(FileMode::from_value(0o040000).unwrap(), FileMode::Tree);
        assert_eq!(FileMode::from_value(0o160000).unwrap(), FileMode::Submodule);
        assert!(FileMode::from_value(0o160001).is_none());
        assert!(FileMode::from_value(0).is_none());
        assert!(FileMode::from_value(0x100643).is_none());
    }

    #[test]
    fn from_octal_slice() {
        assert_eq!(
            FileMode::from_octal_slice(b"100644").unwrap(),
            FileMode::Normal
        );
        assert_eq!(FileMode::from_octal_slice(b"40000").unwrap(), FileMode::Tree);
        assert_eq!(FileMode::from_octal_slice(b"040000").unwrap(), FileMode::Tree);
        assert!(FileMode::from_octal_slice(b"100648").is_none());
        assert!(FileMode::from_octal_slice(b"10064x").is_none());
        assert!(FileMode::from_octal_slice(b"").is_none());
    }

    #[test]
    fn octal_str_round_trips() {
        for mode in &[
            FileMode::Normal,
            FileMode::Executable,
            FileMode::SymbolicLink,
            FileMode::Tree,
            FileMode::Submodule,
        ] {
            let s = mode.as_octal_str();
            assert_eq!(FileMode::from_octal_slice(s.as_bytes()).unwrap(), *mode);
            assert_eq!(format!("{:o}", mode.to_value()), s);
            assert_eq!(mode.padded().len(), 6);
        }
    }

    #[test]
    fn tree_mode_spelling() {
        assert_eq!(FileMode::Tree.as_octal_str(), "40000");
        assert_eq!(FileMode::Tree.padded(), "040000");
        assert_eq!(FileMode::Normal.padded(), "100644");
    }

    #[test]
    fn object_kind() {
        assert_eq!(FileMode::Normal.object_kind(), Kind::Blob);
        assert_eq!(FileMode::SymbolicLink.object_kind(), Kind::Blob);
        assert_eq!(FileMode::Tree.object_kind(), Kind::Tree);
        assert_eq!(FileMode::Submodule.object_kind(), Kind::Commit);
    }
}
