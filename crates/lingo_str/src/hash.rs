//! 32-bit FNV-1a hashing of string keys
//!
//! The runtime computes the same hash over the same key bytes, so these constants must
//! never change.

/// FNV-1a 32-bit offset basis
pub const OFFSET_BASIS: u32 = 2166136261;

/// FNV-1a 32-bit prime
pub const PRIME: u32 = 16777619;

/// Hash a byte slice with 32-bit FNV-1a
pub const fn fnv1a32(bytes: &[u8]) -> u32 {
    let mut hash = OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(PRIME);
        i += 1;
    }
    hash
}

/// Hash the UTF-8 encoding of a string with 32-bit FNV-1a
#[inline]
pub const fn fnv1a32_str(key: &str) -> u32 {
    fnv1a32(key.as_bytes())
}

#[cfg(test)]
mod test {
    use super::{fnv1a32, fnv1a32_str, OFFSET_BASIS};

    #[test]
    fn hash_empty_is_offset_basis() {
        assert_eq!(fnv1a32(b""), OFFSET_BASIS);
        assert_eq!(fnv1a32_str(""), 2166136261);
    }

    #[test]
    fn hash_reference_vectors() {
        assert_eq!(fnv1a32_str("a"), 0xE40C292C);
        assert_eq!(fnv1a32_str("foobar"), 0xBF9CF968);
        assert_eq!(fnv1a32_str("title"), 0x9865B509);
        assert_eq!(fnv1a32_str("back"), 0x5BB421A2);
    }

    #[test]
    fn hash_utf8_bytes() {
        assert_eq!(fnv1a32_str("螞蟻"), fnv1a32("螞蟻".as_bytes()));
        assert_ne!(fnv1a32_str("螞蟻"), fnv1a32_str("蚂蚁"));
    }

    #[test]
    fn hash_in_const_context() {
        const TITLE: u32 = fnv1a32_str("title");
        assert_eq!(TITLE, 2556802313);
    }

    #[test]
    fn hash_known_collisions() {
        assert_eq!(fnv1a32_str("costarring"), fnv1a32_str("liquid"));
        assert_eq!(fnv1a32_str("declinate"), fnv1a32_str("macallums"));
    }
}
