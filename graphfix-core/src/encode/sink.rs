//! Output destinations for encoded fixtures.

use std::collections::BTreeMap;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};

/// A named-output factory handed to the encoders.
///
/// Opening an existing name replaces its previous contents.
pub trait OutputSink {
    /// Opens `name` for writing, truncating anything already stored there.
    ///
    /// # Errors
    /// Returns an [`io::Error`] when the destination cannot be created.
    fn create(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>>;
}

/// Writes outputs as files inside one directory.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use std::io::Write;
/// use graphfix_core::{DirectorySink, OutputSink};
///
/// let dir = tempfile::tempdir()?;
/// let mut sink = DirectorySink::open(dir.path())?;
/// sink.create("n1.txt")?.write_all(b"0\t1\t1\n")?;
/// assert_eq!(std::fs::read_to_string(dir.path().join("n1.txt"))?, "0\t1\t1\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    dir: Dir,
}

impl DirectorySink {
    /// Opens an existing directory.
    ///
    /// # Errors
    /// Returns an [`io::Error`] when `path` does not name an accessible
    /// directory.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let root = path.as_ref().to_path_buf();
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        Ok(Self { root, dir })
    }

    /// Returns the directory outputs are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirectorySink {
    fn create(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        let file = self.dir.create(name)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Keeps outputs in memory, keyed by name.
///
/// # Examples
/// ```
/// use std::io::Write;
/// use graphfix_core::{MemorySink, OutputSink};
///
/// let mut sink = MemorySink::new();
/// sink.create("e1.txt")?.write_all(b"0\t0.5\n")?;
/// assert_eq!(sink.text("e1.txt"), Some("0\t0.5\n"));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    outputs: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes written to `name`.
    #[must_use]
    pub fn bytes(&self, name: &str) -> Option<&[u8]> {
        self.outputs.get(name).map(Vec::as_slice)
    }

    /// Returns the UTF-8 text written to `name`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.bytes(name)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Iterates output names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }
}

impl OutputSink for MemorySink {
    fn create(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        let buffer = self.outputs.entry(name.to_owned()).or_default();
        buffer.clear();
        Ok(Box::new(buffer))
    }
}
