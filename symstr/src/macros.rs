/// Creates a [`SymStr`] backed by static storage, hashed at compile time.
///
/// Expands to a hidden `static` item holding a [`StaticSym`] and returns a
/// `SymStr<'static>` view of it. Repeated evaluation returns views of the
/// same storage; nothing is ever allocated or released.
///
/// ```
/// use symstr::sym;
///
/// let method = sym!("GET");
/// assert_eq!(method.len(), 3);
/// assert!(!method.is_heap_allocated());
/// ```
///
/// [`SymStr`]: crate::SymStr
/// [`StaticSym`]: crate::StaticSym
#[macro_export]
macro_rules! sym {
    ($text:expr) => {{
        static STORAGE: $crate::StaticSym<{ $text.len() + 1 }> = $crate::StaticSym::new($text);
        STORAGE.view()
    }};
}

/// Formats arguments into a [`SymString`], like [`format!`] but producing a
/// hash-cached string.
///
/// ```
/// use symstr::format_sym;
///
/// assert_eq!(format_sym!("worker-{}", 3), "worker-3");
/// ```
///
/// [`SymString`]: crate::SymString
#[macro_export]
macro_rules! format_sym {
    ($fmt:expr) => {{ $crate::ToSymString::to_sym_string(&$fmt) }};
    ($fmt:expr, $($args:tt)*) => {{
        $crate::ToSymString::to_sym_string(&format_args!($fmt, $($args)*))
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_sym() {
        let method = sym!("GET");
        assert_eq!(method.as_str(), "GET");
        assert_eq!(method.hash_value(), crate::hash_bytes(b"GET"));
        assert!(!method.is_heap_allocated());
    }

    #[test]
    fn test_sym_empty() {
        assert!(sym!("").is_empty());
        assert_eq!(sym!("").hash_value(), 0);
    }

    #[test]
    fn test_format_sym() {
        assert_eq!(format_sym!(2), "2");
        assert_eq!(format_sym!("{}-{}", "tag", 7), "tag-7");
    }
}
