//! Base types for the structure of compiled string tables.

use binrw::{BinRead, BinWrite};
use derive_more::derive::{Deref, Display};
use indexmap::IndexMap;
use std::str::FromStr;
use tracing::trace;

use crate::error::{Error, Result};
use crate::hash::fnv1a32_str;

/// Binary layout of a compiled string table
///
/// Both layouts store integers in little endian and never store the keys themselves, only
/// their hashes.
#[derive(Display, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Entry count followed by `hash, length, bytes` for each entry
    #[default]
    #[display("inline")]
    Inline,

    /// All value bytes first, then a directory of `hash, length` pairs
    #[display("split")]
    Split,
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "inline" | "a" => Ok(Layout::Inline),
            "split" | "b" => Ok(Layout::Split),
            _ => Err(Error::InvalidTable(format!("unknown layout {s}"))),
        }
    }
}

/// A directory record shared by both layouts
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct DirectoryEntry {
    /// FNV-1a hash of the key
    pub hash: u32,

    /// Size of the value in bytes
    pub length: u32,
}

/// A value ready to be written, borrowed from a [`StringMap`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HashedEntry<'a> {
    /// FNV-1a hash of the key
    pub hash: u32,

    /// Size of the value in bytes
    pub length: u32,

    /// UTF-8 encoded value
    pub bytes: &'a [u8],
}

impl HashedEntry<'_> {
    /// The directory record describing this entry
    pub fn directory(&self) -> DirectoryEntry {
        DirectoryEntry {
            hash: self.hash,
            length: self.length,
        }
    }
}

pub(crate) fn length_u32(length: usize) -> Result<u32> {
    u32::try_from(length).map_err(|_| Error::TooLarge { length })
}

/// Hash to value mapping that a string table is compiled from
///
/// Entries keep the order in which their hash was first inserted. Inserting a value for a
/// hash that is already present replaces the value in place, so when two keys collide the
/// later one wins and nothing is reported.
#[derive(Deref, Debug, Clone, Default, PartialEq, Eq)]
pub struct StringMap(IndexMap<u32, String>);

impl StringMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        StringMap(IndexMap::with_capacity(capacity))
    }

    /// Build a map from ordered key/value pairs
    pub fn compile<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        entries.into_iter().collect()
    }

    /// Insert a value under the hash of `key`, returning any value it replaced
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.insert_hashed(fnv1a32_str(key.as_ref()), value)
    }

    /// Insert a value under an already computed hash, returning any value it replaced
    pub fn insert_hashed(&mut self, hash: u32, value: impl Into<String>) -> Option<String> {
        let replaced = self.0.insert(hash, value.into());
        if replaced.is_some() {
            trace!("replaced value for hash {:#010x}", hash);
        }
        replaced
    }

    /// Look up a value by its key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(&fnv1a32_str(key)).map(String::as_str)
    }

    /// Entries in map order with their encoded lengths
    pub fn hashed_entries(&self) -> impl Iterator<Item = Result<HashedEntry<'_>>> {
        self.0.iter().map(|(&hash, value)| {
            Ok(HashedEntry {
                hash,
                length: length_u32(value.len())?,
                bytes: value.as_bytes(),
            })
        })
    }

    /// Unwrap the underlying map
    pub fn into_inner(self) -> IndexMap<u32, String> {
        self.0
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for StringMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = StringMap::new();
        map.extend(iter);
        map
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for StringMap {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl From<IndexMap<u32, String>> for StringMap {
    fn from(value: IndexMap<u32, String>) -> Self {
        StringMap(value)
    }
}

impl IntoIterator for StringMap {
    type Item = (u32, String);
    type IntoIter = indexmap::map::IntoIter<u32, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StringMap {
    type Item = (&'a u32, &'a String);
    type IntoIter = indexmap::map::Iter<'a, u32, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
