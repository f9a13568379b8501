//! Stream and resource collaborators.
//!
//! The tokenizer consumes any [`DataStream`]: a [`Read`] that also knows a
//! display name for diagnostics. [`NamedStream`] attaches a name to an
//! arbitrary reader.
//!
//! Named resources are resolved by a [`ResourceProvider`], which opens or
//! creates streams by `(name, group)`. [`FsResources`] maps each group to a
//! directory on disk.
//!
//! ## Examples
//!
//! ```rust
//! use gendoc::{DataStream, NamedStream};
//! use std::io::Cursor;
//!
//! let stream = NamedStream::new("inline.cfg", Cursor::new(b"kw 1\n".to_vec()));
//! assert_eq!(stream.name(), "inline.cfg");
//! ```

use crate::{Error, Result};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Size of the chunks the tokenizer pulls from a stream.
pub const READ_CHUNK_SIZE: usize = 10 * 1024;

/// A readable byte stream with a display name.
pub trait DataStream: Read {
    /// Name used in diagnostics, usually a file name.
    fn name(&self) -> &str;
}

impl<S: DataStream + ?Sized> DataStream for &mut S {
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: DataStream + ?Sized> DataStream for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Wraps any reader with a display name.
#[derive(Debug)]
pub struct NamedStream<R> {
    name: String,
    inner: R,
}

impl<R: Read> NamedStream<R> {
    pub fn new(name: impl Into<String>, inner: R) -> Self {
        NamedStream {
            name: name.into(),
            inner,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for NamedStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read> DataStream for NamedStream<R> {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Fills `buf` with the next chunk of `stream`, retrying interrupted reads.
/// Returns 0 at end of stream.
pub(crate) fn read_chunk<S: DataStream + ?Sized>(stream: &mut S, buf: &mut [u8]) -> Result<usize> {
    loop {
        match stream.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(Error::io(&format!("reading '{}': {}", stream.name(), e)));
            }
        }
    }
}

/// Opens and creates streams by resource name and group.
pub trait ResourceProvider {
    type Input: DataStream;
    type Output: Write;

    fn open_resource(&self, name: &str, group: &str) -> Result<Self::Input>;

    fn create_resource(&self, name: &str, group: &str) -> Result<Self::Output>;
}

/// Resource groups backed by directories.
///
/// # Examples
///
/// ```rust,no_run
/// use gendoc::{Document, FsResources, LogSink, ParseOptions};
///
/// let resources = FsResources::new().with_group("Vehicles", "/opt/game/vehicles");
/// let mut doc = Document::new();
/// doc.load_from_resource(&resources, "truck.cfg", "Vehicles", ParseOptions::NONE, LogSink)?;
/// # Ok::<(), gendoc::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct FsResources {
    groups: IndexMap<String, PathBuf>,
}

impl FsResources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a group.
    pub fn add_group(&mut self, group: impl Into<String>, dir: impl Into<PathBuf>) {
        self.groups.insert(group.into(), dir.into());
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.add_group(group, dir);
        self
    }

    #[must_use]
    pub fn group_dir(&self, group: &str) -> Option<&Path> {
        self.groups.get(group).map(PathBuf::as_path)
    }

    /// Group names in registration order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    fn resolve(&self, name: &str, group: &str) -> Result<PathBuf> {
        self.group_dir(group)
            .map(|dir| dir.join(name))
            .ok_or_else(|| Error::UnknownGroup(group.to_string()))
    }
}

impl ResourceProvider for FsResources {
    type Input = NamedStream<File>;
    type Output = BufWriter<File>;

    fn open_resource(&self, name: &str, group: &str) -> Result<Self::Input> {
        let path = self.resolve(name, group)?;
        let file = File::open(&path).map_err(|e| Error::resource_open(name, group, &e.to_string()))?;
        Ok(NamedStream::new(name, file))
    }

    fn create_resource(&self, name: &str, group: &str) -> Result<Self::Output> {
        let path = self.resolve(name, group)?;
        let file =
            File::create(&path).map_err(|e| Error::resource_create(name, group, &e.to_string()))?;
        Ok(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Flaky {
        interrupted: bool,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            buf[0] = b'x';
            Ok(1)
        }
    }

    #[test]
    fn test_read_chunk_retries_interrupted() {
        let mut stream = NamedStream::new("flaky", Flaky { interrupted: false });
        let mut buf = [0u8; 4];
        assert_eq!(read_chunk(&mut stream, &mut buf).unwrap(), 1);
        assert_eq!(buf[0], b'x');
    }

    #[test]
    fn test_named_stream_passes_bytes_through() {
        let mut stream = NamedStream::new("inline", Cursor::new(b"kw 1\n".to_vec()));
        let mut text = String::new();
        stream.read_to_string(&mut text).unwrap();
        assert_eq!(text, "kw 1\n");
        assert_eq!(stream.into_inner().position(), 5);
    }

    #[test]
    fn test_read_chunk_end_of_stream() {
        let mut stream = NamedStream::new("empty", Cursor::new(Vec::new()));
        let mut buf = [0u8; 4];
        assert_eq!(read_chunk(&mut stream, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_unknown_group() {
        let resources = FsResources::new();
        match resources.open_resource("a.cfg", "Nowhere") {
            Err(Error::UnknownGroup(group)) => assert_eq!(group, "Nowhere"),
            other => panic!("expected unknown group, got {:?}", other.map(|s| s.name().to_string())),
        }
    }

    #[test]
    fn test_group_order() {
        let resources = FsResources::new()
            .with_group("B", "/tmp/b")
            .with_group("A", "/tmp/a");
        let groups: Vec<&str> = resources.groups().collect();
        assert_eq!(groups, vec!["B", "A"]);
        assert_eq!(resources.group_dir("A"), Some(Path::new("/tmp/a")));
    }
}
