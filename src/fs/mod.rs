//! Filesystem access for the walker
//!
//! The walker never talks to `std::fs` directly. It asks a [`FileSystem`] to
//! classify a path, list a directory, or stat a regular file, so traversal can be
//! exercised against an in-memory tree in tests.

use std::ffi::OsString;
use std::fs::Metadata;
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Snapshot of one regular file's identity and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// Basename of the path
    pub name: String,
    pub inode: u64,
    pub size_bytes: u64,
    pub link_count: u64,
}

impl FileStat {
    pub fn new(name: impl Into<String>, inode: u64, size_bytes: u64, link_count: u64) -> Self {
        Self {
            name: name.into(),
            inode,
            size_bytes,
            link_count,
        }
    }

    /// Build a snapshot from metadata already fetched for `path`
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        #[cfg(unix)]
        let (inode, link_count) = (metadata.ino(), metadata.nlink());
        #[cfg(not(unix))]
        let (inode, link_count) = (0, 1);

        Self::new(name, inode, metadata.len(), link_count)
    }
}

/// Coarse entry classification used to drive traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symlinks, devices, sockets, fifos and anything whose type could not be read
    Other,
}

impl From<std::fs::FileType> for EntryKind {
    fn from(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// One name returned by a directory listing, kept as the raw OS name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: OsString,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// True for the `.`/`..` pseudo-entries and the empty name
    pub fn is_pseudo(&self) -> bool {
        self.name.is_empty() || self.name == "." || self.name == ".."
    }
}

/// The "stat a path" / "list a directory" capability the walker depends on
pub trait FileSystem {
    /// Classify `path`, following symlinks. Only used for the walk root.
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// List `dir` in the order the platform yields entries. Entry kinds are
    /// determined without following symlinks.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Metadata snapshot of a regular file, without following symlinks
    fn stat(&self, path: &Path) -> io::Result<FileStat>;
}

/// [`FileSystem`] backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        Ok(std::fs::metadata(path)?.file_type().into())
    }

    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let kind = entry
                .file_type()
                .map(EntryKind::from)
                .unwrap_or(EntryKind::Other);
            entries.push(DirEntry::new(entry.file_name(), kind));
        }
        Ok(entries)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = std::fs::symlink_metadata(path)?;
        Ok(FileStat::from_metadata(path, &metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pseudo_entries() {
        assert!(DirEntry::new(".", EntryKind::Directory).is_pseudo());
        assert!(DirEntry::new("..", EntryKind::Directory).is_pseudo());
        assert!(DirEntry::new("", EntryKind::Other).is_pseudo());
        assert!(!DirEntry::new("...", EntryKind::File).is_pseudo());
    }

    #[test]
    fn test_stat_reports_name_and_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");
        fs::write(&path, vec![0u8; 42]).unwrap();

        let stat = OsFileSystem.stat(&path).unwrap();
        assert_eq!(stat.name, "data.bin");
        assert_eq!(stat.size_bytes, 42);
        assert_eq!(stat.link_count, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_stat_counts_hardlinks_and_shares_inode() {
        let temp_dir = TempDir::new().unwrap();
        let original = temp_dir.path().join("original");
        let link = temp_dir.path().join("link");
        fs::write(&original, "x").unwrap();
        fs::hard_link(&original, &link).unwrap();

        let a = OsFileSystem.stat(&original).unwrap();
        let b = OsFileSystem.stat(&link).unwrap();
        assert_eq!(a.link_count, 2);
        assert_eq!(a.inode, b.inode);
        assert_eq!(b.name, "link");
    }

    #[test]
    fn test_read_dir_classifies_entries() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("file.txt"), "hello").unwrap();

        let mut entries = OsFileSystem.read_dir(temp_dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            entries,
            vec![
                DirEntry::new("file.txt", EntryKind::File),
                DirEntry::new("sub", EntryKind::Directory),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed_when_listing() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("alias"))
            .unwrap();

        let entries = OsFileSystem.read_dir(temp_dir.path()).unwrap();
        let alias = entries.iter().find(|e| e.name == "alias").unwrap();
        assert_eq!(alias.kind, EntryKind::Other);

        // The root check follows the link
        assert_eq!(
            OsFileSystem.entry_kind(&temp_dir.path().join("alias")).unwrap(),
            EntryKind::Directory
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_read_dir_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"bad\xffname");
        fs::write(temp_dir.path().join(name), "x").unwrap();

        let entries = OsFileSystem.read_dir(temp_dir.path()).unwrap();
        assert_eq!(entries, vec![DirEntry::new(name, EntryKind::File)]);

        // The rebuilt path reaches the same file
        let stat = OsFileSystem.stat(&temp_dir.path().join(&entries[0].name)).unwrap();
        assert_eq!(stat.size_bytes, 1);
        assert_eq!(stat.name, "bad\u{FFFD}name");
    }

    #[test]
    fn test_read_dir_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(OsFileSystem.read_dir(&temp_dir.path().join("nope")).is_err());
    }
}
