//! Types for writing compiled string tables
//!

use binrw::BinWrite;
use bon::Builder;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::types::{length_u32, HashedEntry, Layout, StringMap};

/// Options for how the string table should be written
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct WriterOptions {
    /// The binary layout to produce
    #[builder(default)]
    pub layout: Layout,
}

/// Encode `map` as an inline table: the entry count, then `hash, length, bytes` per entry.
pub fn write_inline(map: &StringMap) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());

    out.write_u32::<LittleEndian>(length_u32(map.len())?)?;
    for entry in map.hashed_entries() {
        let entry = entry?;
        entry.directory().write(&mut out)?;
        out.write_all(entry.bytes)?;
    }

    Ok(out.into_inner())
}

/// Encode `map` as a split table: the value block and its length, then the entry count and
/// a `hash, length` directory in the same order as the values.
pub fn write_split(map: &StringMap) -> Result<Vec<u8>> {
    let entries = map.hashed_entries().collect::<Result<Vec<HashedEntry<'_>>>>()?;
    let values_length = length_u32(entries.iter().map(|e| e.bytes.len()).sum())?;

    let mut out = Cursor::new(Vec::new());

    out.write_u32::<LittleEndian>(values_length)?;
    for entry in &entries {
        out.write_all(entry.bytes)?;
    }

    out.write_u32::<LittleEndian>(length_u32(entries.len())?)?;
    for entry in &entries {
        entry.directory().write(&mut out)?;
    }

    Ok(out.into_inner())
}

/// Encode `map` in the requested layout
pub fn encode(map: &StringMap, layout: Layout) -> Result<Vec<u8>> {
    match layout {
        Layout::Inline => write_inline(map),
        Layout::Split => write_split(map),
    }
}

/// String table generator
///
/// The whole table is encoded in memory before anything reaches the inner writer, so an
/// encoding error leaves the destination untouched.
///
/// ```
/// # fn doit() -> lingo_str::error::Result<()>
/// # {
/// use lingo_str::{Layout, StringMap, StringTableWriter, WriterOptions};
///
/// let map = StringMap::compile([("title", "Antkeeper")]);
///
/// // We use a buffer here, though you'd normally use a `File`
/// let writer = StringTableWriter::new(
///     Vec::new(),
///     WriterOptions::builder().layout(Layout::Split).build(),
/// );
/// let buf = writer.write_map(&map)?;
/// assert_eq!(buf.len(), 4 + 9 + 4 + 8);
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct StringTableWriter<W: Write> {
    inner: W,
    options: WriterOptions,
}

impl<W: Write> StringTableWriter<W> {
    /// Wrap a destination
    pub fn new(inner: W, options: WriterOptions) -> StringTableWriter<W> {
        StringTableWriter { inner, options }
    }

    /// The layout this writer produces
    pub const fn layout(&self) -> Layout {
        self.options.layout
    }

    /// Write the complete table and return the destination
    #[instrument(skip_all, fields(layout = %self.options.layout, entries = map.len()), err)]
    pub fn write_map(mut self, map: &StringMap) -> Result<W> {
        let data = encode(map, self.options.layout)?;
        debug!(size = data.len(), "encoded string table");

        self.inner.write_all(&data)?;
        self.inner.flush()?;

        Ok(self.inner)
    }
}

/// Write `map` to `path`, replacing any existing file only once the table is complete.
///
/// The table is written to a temporary file next to `path` which is then renamed over it.
/// On error the temporary file is removed and `path` is left as it was.
#[instrument(skip_all, fields(path = %path.as_ref().display(), layout = %options.layout, entries = map.len()), err)]
pub fn write_file(path: impl AsRef<Path>, map: &StringMap, options: WriterOptions) -> Result<()> {
    let path = path.as_ref();
    let data = encode(map, options.layout)?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(&data)?;
    file.as_file().sync_all()?;
    file.persist(path)?;

    debug!(size = data.len(), "wrote string table");
    Ok(())
}
