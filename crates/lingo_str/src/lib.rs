//! # String Table Format Documentation
//!
//! This crate compiles localization strings into compact binary tables and reads them back.
//! A table holds the strings of a single language. Keys are never stored. Each key is
//! replaced by its 32-bit FNV-1a hash, which the runtime computes independently to look a
//! string up.
//!
//! Two layouts exist. Neither has a magic number, version, checksum or padding, and all
//! integers are little-endian.
//!
//! ## Inline Layout
//!
//! | Offset (bytes) | Field                  | Description                                      |
//! |----------------|------------------------|--------------------------------------------------|
//! | 0x0000         | Entry Count            | 4 bytes: Number of entries that follow           |
//!
//! Each entry then has the following structure:
//!
//! | Offset (bytes) | Field                  | Description                                      |
//! |----------------|------------------------|--------------------------------------------------|
//! | 0x0000         | Hash                   | 4 bytes: FNV-1a hash of the key                  |
//! | 0x0004         | Length                 | 4 bytes: Size of the value in bytes              |
//! | 0x0008         | Data                   | (Length) bytes: UTF8 string                      |
//!
//! ## Split Layout
//!
//! | Offset (bytes)     | Field              | Description                                      |
//! |--------------------|--------------------|--------------------------------------------------|
//! | 0x0000             | Values Length      | 4 bytes: Size of the value block in bytes        |
//! | 0x0004             | Values             | (Values Length) bytes: every value, concatenated |
//! | 0x0004 + Length    | Entry Count        | 4 bytes: Number of directory entries             |
//!
//! The directory follows, one record per entry in the same order as the value block:
//!
//! | Offset (bytes) | Field                  | Description                                      |
//! |----------------|------------------------|--------------------------------------------------|
//! | 0x0000         | Hash                   | 4 bytes: FNV-1a hash of the key                  |
//! | 0x0004         | Length                 | 4 bytes: Size of the value in bytes              |
//!
//! Offsets are not stored. The offset of a value is the sum of the lengths before it.
//!
//! ## Hashing
//!
//! - **Offset basis**: `2166136261`
//! - **Prime**: `16777619`
//! - For every byte of the UTF-8 key, xor it into the hash and then multiply by the prime,
//!   wrapping at 32 bits.
//!
//! Keys that hash alike collapse into one entry, and the value inserted last wins.
//!

pub mod error;
pub mod hash;
pub mod read;
#[cfg(feature = "serde")]
mod serde;
pub mod types;
pub mod write;

pub use hash::{fnv1a32, fnv1a32_str};
pub use read::StringTableReader;
pub use types::{Layout, StringMap};
pub use write::{write_file, StringTableWriter, WriterOptions};
