//! Types for reading compiled string tables
//!

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::hash::fnv1a32_str;
use crate::types::{DirectoryEntry, Layout, StringMap};

// Counts come from the file, so don't trust them for preallocation.
const MAX_PREALLOCATED: usize = 4096;

fn read_bytes<R: Read>(reader: &mut R, length: u32) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader
        .by_ref()
        .take(length as u64)
        .read_to_end(&mut buffer)?;

    if buffer.len() != length as usize {
        return Err(Error::IOError(std::io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buffer)
}

/// Read an inline table into a map, keeping file order
#[instrument(skip_all, err)]
pub fn read_inline<R: Read + Seek>(mut reader: R) -> Result<StringMap> {
    let count = reader.read_u32::<LittleEndian>()? as usize;

    let mut map = StringMap::with_capacity(count.min(MAX_PREALLOCATED));
    for _ in 0..count {
        let entry = DirectoryEntry::read(&mut reader)?;
        let value = String::from_utf8(read_bytes(&mut reader, entry.length)?)?;
        map.insert_hashed(entry.hash, value);
    }

    debug!(entries = map.len(), "read inline string table");
    Ok(map)
}

/// Read a split table into a map, keeping directory order
///
/// Value offsets are the running total of the lengths that precede them in the directory.
#[instrument(skip_all, err)]
pub fn read_split<R: Read + Seek>(mut reader: R) -> Result<StringMap> {
    let values_length = reader.read_u32::<LittleEndian>()?;
    let values = read_bytes(&mut reader, values_length)?;

    let count = reader.read_u32::<LittleEndian>()? as usize;
    let mut directory = Vec::with_capacity(count.min(MAX_PREALLOCATED));
    for _ in 0..count {
        directory.push(DirectoryEntry::read(&mut reader)?);
    }

    let described: u64 = directory.iter().map(|e| e.length as u64).sum();
    if described != values_length as u64 {
        return Err(Error::InvalidTable(format!(
            "directory describes {described} bytes but the value block holds {values_length}"
        )));
    }

    let mut map = StringMap::with_capacity(directory.len());
    let mut offset = 0;
    for entry in directory {
        let end = offset + entry.length as usize;
        let value = String::from_utf8(values[offset..end].to_vec())?;
        map.insert_hashed(entry.hash, value);
        offset = end;
    }

    debug!(entries = map.len(), "read split string table");
    Ok(map)
}

/// String table reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_entries(reader: impl Read + Seek) -> lingo_str::error::Result<()> {
///     let table = lingo_str::StringTableReader::new(reader, lingo_str::Layout::Inline)?;
///
///     for (hash, value) in table.entries().iter() {
///         println!("{:#010x}: {}", hash, value);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StringTableReader {
    layout: Layout,
    entries: StringMap,
}

impl StringTableReader {
    /// Read a string table stored in `layout`
    pub fn new<R: Read + Seek>(reader: R, layout: Layout) -> Result<StringTableReader> {
        let entries = match layout {
            Layout::Inline => read_inline(reader)?,
            Layout::Split => read_split(reader)?,
        };

        Ok(StringTableReader { layout, entries })
    }

    /// The layout the table was read with
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of entries contained in this table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this table contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a reference to the entries in this table
    pub fn entries(&self) -> &StringMap {
        &self.entries
    }

    /// Try to get a value by the hash of its key
    pub fn get(&self, hash: u32) -> Option<&str> {
        self.entries.get(&hash).map(String::as_str)
    }

    /// Try to get a value by its key
    pub fn by_key(&self, key: impl AsRef<str>) -> Option<&str> {
        self.get(fnv1a32_str(key.as_ref()))
    }

    /// Unwrap the entries of this table
    pub fn into_map(self) -> StringMap {
        self.entries
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    use crate::error::{Error, Result};
    use crate::read::{read_inline, read_split, StringTableReader};
    use crate::types::{Layout, StringMap};
    use crate::write::{write_inline, write_split};

    #[test]
    fn read_empty_inline() -> Result<()> {
        let map = read_inline(Cursor::new([0u8; 4]))?;
        assert!(map.is_empty());
        Ok(())
    }

    #[test]
    fn read_empty_split() -> Result<()> {
        let map = read_split(Cursor::new([0u8; 8]))?;
        assert!(map.is_empty());
        Ok(())
    }

    #[test]
    fn read_inline_with_entries() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x02, 0x00, 0x00, 0x00,
            0xA2, 0x21, 0xB4, 0x5B, 0x04, 0x00, 0x00, 0x00, 0x42, 0x61, 0x63, 0x6B,
            0x09, 0xB5, 0x65, 0x98, 0x02, 0x00, 0x00, 0x00, 0x48, 0x69,
        ];

        let table = StringTableReader::new(Cursor::new(input), Layout::Inline)?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.layout(), Layout::Inline);
        assert_eq!(table.by_key("back"), Some("Back"));
        assert_eq!(table.get(0x9865B509), Some("Hi"));
        assert_eq!(table.by_key("quit"), None);
        Ok(())
    }

    #[test]
    fn read_split_with_entries() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x06, 0x00, 0x00, 0x00,
            0x42, 0x61, 0x63, 0x6B, 0x48, 0x69,
            0x02, 0x00, 0x00, 0x00,
            0xA2, 0x21, 0xB4, 0x5B, 0x04, 0x00, 0x00, 0x00,
            0x09, 0xB5, 0x65, 0x98, 0x02, 0x00, 0x00, 0x00,
        ];

        let table = StringTableReader::new(Cursor::new(input), Layout::Split)?;
        assert_eq!(
            table.entries().iter().collect::<Vec<_>>(),
            vec![(&0x5BB421A2, &"Back".to_string()), (&0x9865B509, &"Hi".to_string())]
        );
        Ok(())
    }

    #[test]
    fn read_round_trip_keeps_order() -> Result<()> {
        let map = StringMap::compile([
            ("title", "螞蟻飼養員"),
            ("back", ""),
            ("quit", "Quit"),
            ("start", "Start"),
        ]);
        let expected = map.iter().collect::<Vec<_>>();

        let inline = read_inline(Cursor::new(write_inline(&map)?))?;
        assert_eq!(inline.iter().collect::<Vec<_>>(), expected);

        let split = read_split(Cursor::new(write_split(&map)?))?;
        assert_eq!(split.iter().collect::<Vec<_>>(), expected);
        Ok(())
    }

    #[test]
    fn read_truncated_inline() -> Result<()> {
        let mut data = write_inline(&StringMap::compile([("back", "Back")]))?;
        data.truncate(data.len() - 1);

        assert!(matches!(
            read_inline(Cursor::new(data)),
            Err(Error::IOError(_))
        ));
        Ok(())
    }

    #[test]
    fn read_truncated_split_directory() -> Result<()> {
        let mut data = write_split(&StringMap::compile([("back", "Back")]))?;
        data.truncate(data.len() - 2);

        assert!(read_split(Cursor::new(data)).is_err());
        Ok(())
    }

    #[test]
    fn read_split_length_mismatch() {
        #[rustfmt::skip]
        let input = [
            0x04, 0x00, 0x00, 0x00,
            0x42, 0x61, 0x63, 0x6B,
            0x01, 0x00, 0x00, 0x00,
            0xA2, 0x21, 0xB4, 0x5B, 0x05, 0x00, 0x00, 0x00,
        ];

        assert!(matches!(
            read_split(Cursor::new(input)),
            Err(Error::InvalidTable(_))
        ));
    }

    #[test]
    fn read_invalid_utf8() {
        #[rustfmt::skip]
        let input = [
            0x01, 0x00, 0x00, 0x00,
            0xA2, 0x21, 0xB4, 0x5B, 0x01, 0x00, 0x00, 0x00, 0xFF,
        ];

        assert!(matches!(
            read_inline(Cursor::new(input)),
            Err(Error::UTF8Error(_))
        ));
    }
}
