/// Polynomial rolling hash over raw bytes, `Σ bytes[i] * 127^i` with wrapping
/// 32-bit arithmetic.
///
/// This is the hash cached in every string header. It is usable in `const`
/// contexts, which is how static strings get hashed at compile time, and it
/// produces the same value for byte-identical input no matter where or when it
/// runs. The empty input hashes to `0`.
///
/// # Examples
/// ```
/// use symstr::hash_bytes;
///
/// assert_eq!(hash_bytes(b""), 0);
/// assert_eq!(hash_bytes(b"ab"), 97 + 98 * 127);
///
/// const TAG_HASH: u32 = hash_bytes(b"tag");
/// assert_eq!(TAG_HASH, hash_bytes("tag".as_bytes()));
/// ```
pub const fn hash_bytes(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0;
    let mut term: u32 = 1;
    let mut i = 0;

    while i < bytes.len() {
        hash = hash.wrapping_add(term.wrapping_mul(bytes[i] as u32));
        term = term.wrapping_mul(127);
        i += 1;
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::hash_bytes;

    #[test]
    fn test_empty_hashes_to_zero() {
        assert_eq!(hash_bytes(b""), 0);
    }

    #[test]
    fn test_single_byte_is_identity() {
        assert_eq!(hash_bytes(b"a"), 97);
        assert_eq!(hash_bytes(b"\0"), 0);
    }

    #[test]
    fn test_interior_nul_is_counted() {
        // the zero byte contributes nothing to the sum, but it still shifts
        // the positions of everything after it
        assert_eq!(hash_bytes(b"a\0b"), 97 + 98 * 127 * 127);
        assert_ne!(hash_bytes(b"a\0b"), hash_bytes(b"ab"));
    }

    #[test]
    fn test_trailing_nul_collides_with_prefix() {
        // same accumulated sum, only the length differs; equality relies on
        // the length check to tell these apart
        assert_eq!(hash_bytes(b"ab"), hash_bytes(b"ab\0"));
    }

    #[test]
    fn test_wraps_instead_of_overflowing() {
        let long = [0xffu8; 64];
        let _ = hash_bytes(&long);
    }
}
