use core::ptr;

use super::inner::{
    Header,
    HeaderPtr,
    MAX_LENGTH,
};
use crate::hash::hash_bytes;
use crate::SymStr;

/// Backing storage for a string whose header is built entirely at compile
/// time: hash precomputed, length recorded, ownership flag clear so the
/// memory is never released.
///
/// `N` is the content length plus one byte for the NUL terminator. Spelling
/// that out is tedious, so prefer the [`sym!`] macro, which declares the
/// static item and hands back the view in one step:
///
/// ```
/// use symstr::{sym, StaticSym};
///
/// // what `sym!("tag")` expands to, roughly:
/// static TAG: StaticSym<4> = StaticSym::new("tag");
///
/// assert_eq!(TAG.view(), sym!("tag"));
/// ```
///
/// [`sym!`]: crate::sym
#[repr(C)]
pub struct StaticSym<const N: usize> {
    header: Header,
    bytes: [u8; N],
}

impl<const N: usize> StaticSym<N> {
    /// Builds the storage, hashing `text` in `const` evaluation.
    ///
    /// Fails to compile (or panics at runtime) unless `N == text.len() + 1`.
    pub const fn new(text: &str) -> Self {
        let content = text.as_bytes();
        assert!(
            content.len() + 1 == N,
            "storage must fit the content plus a NUL terminator"
        );
        assert!(content.len() <= MAX_LENGTH);

        let mut bytes = [0u8; N];
        let mut i = 0;
        while i < content.len() {
            bytes[i] = content[i];
            i += 1;
        }

        StaticSym {
            header: Header {
                hash: hash_bytes(content),
                // the owned bit stays clear, this memory is never released
                len_and_owned: content.len() as u32,
            },
            bytes,
        }
    }

    /// Returns a view of this storage. The view is `'static` because the
    /// storage is.
    pub fn view(&'static self) -> SymStr<'static> {
        // derive the pointer from the whole item so it carries provenance
        // over the trailing bytes, not just the header fields
        let ptr = ptr::NonNull::from(self).cast::<Header>();
        SymStr::from_raw(HeaderPtr::from_non_null(ptr))
    }
}

#[cfg(test)]
mod tests {
    use super::StaticSym;
    use crate::hash_bytes;

    static CONTENT_LENGTH: StaticSym<15> = StaticSym::new("content-length");

    #[test]
    fn test_static_header_is_prehashed() {
        let view = CONTENT_LENGTH.view();

        assert_eq!(view.len(), 14);
        assert_eq!(view.as_str(), "content-length");
        assert_eq!(view.hash_value(), hash_bytes(b"content-length"));
        assert!(!view.is_heap_allocated());
    }

    #[test]
    fn test_const_hash_matches_runtime_hash() {
        const HASH: u32 = hash_bytes(b"content-length");
        assert_eq!(HASH, CONTENT_LENGTH.view().hash_value());
    }

    #[test]
    fn test_empty_static() {
        static EMPTY: StaticSym<1> = StaticSym::new("");

        let view = EMPTY.view();
        assert_eq!(view.len(), 0);
        assert_eq!(view.hash_value(), 0);
    }
}
