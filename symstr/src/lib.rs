#![doc = include_str!("../README.md")]

use core::cmp::Ordering;
use core::fmt;
use core::hash::{
    Hash,
    Hasher,
};
use core::marker::PhantomData;
use core::mem;
use core::ops::Deref;
use core::slice;
use core::str::{
    self,
    FromStr,
};

mod features;
mod macros;

mod hash;
pub use hash::hash_bytes;

mod repr;
use repr::HeaderPtr;
pub use repr::{
    StaticSym,
    MAX_LENGTH,
};

mod traits;
pub use traits::ToSymString;


/// A non-owning view of a hash-cached string: one pointer wide, `Copy`, and
/// cheap to pass by value.
///
/// A `SymStr` never frees anything. The lifetime parameter ties it to
/// whatever keeps the underlying header alive: a [`SymString`] it was
/// borrowed from, or static storage declared with [`sym!`].
///
/// ```
/// use symstr::{sym, SymStr, SymString};
///
/// fn dispatch(field: SymStr<'_>) -> bool {
///     field == sym!("content-length")
/// }
///
/// let parsed = SymString::new("content-length");
/// assert!(dispatch(parsed.borrow()));
/// assert!(!dispatch(sym!("content-type")));
/// ```
///
/// Equality first compares lengths, then the cached hashes, and touches the
/// actual bytes only when both agree, so most mismatches are decided in
/// constant time.
#[derive(Clone, Copy)]
pub struct SymStr<'a> {
    ptr: HeaderPtr,
    _lifetime: PhantomData<&'a ()>,
}

// SAFETY: a view is a shared reference to an immutable header, and its
// lifetime keeps the header alive for as long as the view can be used
unsafe impl Send for SymStr<'_> {}
unsafe impl Sync for SymStr<'_> {}

impl<'a> SymStr<'a> {
    pub(crate) fn from_raw(ptr: HeaderPtr) -> Self {
        SymStr {
            ptr,
            _lifetime: PhantomData,
        }
    }

    pub(crate) fn raw(&self) -> HeaderPtr {
        self.ptr
    }

    /// Returns the content length in bytes, excluding the NUL terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.ptr.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the content bytes. Interior NUL bytes, if any, are included.
    ///
    /// The slice borrows from the header, not from this handle, so it stays
    /// valid for the full lifetime `'a` even after the view itself is gone.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        // SAFETY: the header is alive for 'a, and `len` bytes of content
        // always follow the fixed fields
        unsafe { slice::from_raw_parts(self.ptr.content_ptr(), self.ptr.len()) }
    }

    /// Returns the content as `&str`.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        // SAFETY: headers are only ever constructed from `&str`, so the
        // content must be valid UTF-8
        unsafe { str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Returns a pointer to the first content byte. Useful for checking
    /// whether two handles share backing storage.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.content_ptr()
    }

    /// Returns the hash cached in the header, in O(1).
    ///
    /// The value is [`hash_bytes`] of the content, computed once when the
    /// header was built and never again.
    #[inline]
    pub fn hash_value(&self) -> u32 {
        self.ptr.hash()
    }

    /// Reports whether the underlying header was heap-allocated and will be
    /// released when its owner is dropped. Informational: a view never acts
    /// on this flag.
    ///
    /// ```
    /// use symstr::{sym, SymString};
    ///
    /// assert!(!sym!("static").is_heap_allocated());
    /// assert!(SymString::new("runtime").borrow().is_heap_allocated());
    /// ```
    #[inline]
    pub fn is_heap_allocated(&self) -> bool {
        self.ptr.is_owned()
    }

    /// Releases the underlying header's memory, if and only if it was
    /// heap-allocated. This is the single disposal entry point; dropping a
    /// [`SymString`] delegates here.
    ///
    /// # Safety
    /// For a heap-allocated header this must be called exactly once, by
    /// whoever holds unique ownership, and no handle to the header may be
    /// used afterwards. For static headers it is a no-op and always sound.
    ///
    /// ```
    /// use symstr::SymString;
    ///
    /// let view = SymString::new("scratch").leak();
    /// // SAFETY: `leak` gave up ownership, so this is the only release
    /// unsafe { view.release() };
    /// ```
    pub unsafe fn release(self) {
        if self.ptr.is_owned() {
            // SAFETY: owned headers come from `HeaderPtr::try_allocate`, and
            // the caller guarantees this runs exactly once
            unsafe { self.ptr.dealloc() };
        }
    }
}

/// The move-only owner of a hash-cached string.
///
/// A `SymString` is created by copying content into a fresh heap allocation
/// ([`SymString::new`]) or by asserting ownership of an existing header
/// ([`SymString::claim`]). When it goes out of scope it releases the header's
/// memory exactly once, and only if the header was heap-allocated.
///
/// Rust's move semantics do the bookkeeping the ownership contract needs:
/// moving a `SymString` transfers the handle without copying content, and a
/// moved-from handle can no longer be dropped, so a double release is
/// unrepresentable in safe code.
///
/// ```
/// use symstr::SymString;
///
/// let original = SymString::new("session");
/// let moved = original; // plain move, no allocation
/// assert_eq!(moved, "session");
/// ```
///
/// Duplication is always explicit and always independent:
///
/// ```
/// use symstr::SymString;
///
/// let a = SymString::new("tag");
/// let b = a.clone();
/// assert_eq!(a, b);
/// // the clone has its own backing allocation
/// assert_ne!(a.as_ptr(), b.as_ptr());
/// ```
pub struct SymString {
    ptr: HeaderPtr,
}

// SAFETY: the header is immutable and uniquely owned; releasing it requires
// `self` by value or `&mut self`, so shared references cannot race
unsafe impl Send for SymString {}
unsafe impl Sync for SymString {}

impl SymString {
    /// Copies `text` into a freshly allocated, uniquely owned header,
    /// hashing it once along the way.
    ///
    /// Allocation failure aborts via [`std::alloc::handle_alloc_error`]; use
    /// [`SymString::try_new`] to handle it instead.
    ///
    /// # Panics
    /// Panics if `text` is longer than [`MAX_LENGTH`] bytes.
    ///
    /// # Examples
    /// ```
    /// use symstr::{hash_bytes, SymString};
    ///
    /// let greeting = SymString::new("hello");
    /// assert_eq!(greeting.len(), 5);
    /// assert_eq!(greeting.as_bytes(), b"hello");
    /// assert_eq!(greeting.hash_value(), hash_bytes(b"hello"));
    /// ```
    #[inline]
    pub fn new<T: AsRef<str>>(text: T) -> Self {
        SymString {
            ptr: HeaderPtr::allocate(text.as_ref()),
        }
    }

    /// Like [`SymString::new`], but surfaces allocation failure as an
    /// [`AllocationError`] instead of aborting the process.
    #[inline]
    pub fn try_new<T: AsRef<str>>(text: T) -> Result<Self, AllocationError> {
        let ptr = HeaderPtr::try_allocate(text.as_ref())?;
        Ok(SymString { ptr })
    }

    /// Takes ownership of the header behind `view` without copying content.
    ///
    /// # Safety
    /// If the header is heap-allocated, the caller asserts that no other
    /// owner exists and that none will be created: a double claim leads to a
    /// double release. The header must also remain valid for the lifetime of
    /// the returned owner, which erasing the view's lifetime can no longer
    /// enforce. Claiming a static header is always sound, since releasing
    /// one is a no-op.
    ///
    /// ```
    /// use symstr::{sym, SymString};
    ///
    /// // SAFETY: static storage is never released
    /// let owned = unsafe { SymString::claim(sym!("worker")) };
    /// assert_eq!(owned, "worker");
    /// assert!(!owned.is_heap_allocated());
    /// ```
    pub unsafe fn claim(view: SymStr<'_>) -> Self {
        SymString { ptr: view.raw() }
    }

    /// Borrows a non-owning view. The view cannot outlive `self`, which is
    /// what makes use-after-release unrepresentable in safe code.
    ///
    /// ```
    /// use symstr::{SymStr, SymString};
    ///
    /// let owned = SymString::new("alpha");
    /// let view: SymStr<'_> = owned.borrow();
    /// assert_eq!(view.hash_value(), owned.hash_value());
    /// ```
    #[inline]
    pub fn borrow(&self) -> SymStr<'_> {
        SymStr::from_raw(self.ptr)
    }

    /// Consumes the owner without releasing the header, returning a view
    /// valid for the rest of the program. The inverse of
    /// [`SymString::claim`].
    pub fn leak(self) -> SymStr<'static> {
        let ptr = self.ptr;
        mem::forget(self);
        SymStr::from_raw(ptr)
    }

    /// Returns the content length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.ptr.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the content bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.borrow().as_bytes()
    }

    /// Returns the content as `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.borrow().as_str()
    }

    /// Returns a pointer to the first content byte.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.content_ptr()
    }

    /// Returns the hash cached in the header, in O(1).
    #[inline]
    pub fn hash_value(&self) -> u32 {
        self.ptr.hash()
    }

    /// Reports whether this owner will release memory when dropped. `false`
    /// for handles claimed from static storage.
    #[inline]
    pub fn is_heap_allocated(&self) -> bool {
        self.ptr.is_owned()
    }
}

impl Drop for SymString {
    fn drop(&mut self) {
        // SAFETY: `self` is the unique owner and is being destroyed, so this
        // is the one release the ownership contract calls for
        unsafe { self.borrow().release() }
    }
}

impl Clone for SymString {
    /// Allocates an independent copy; the result shares no memory with the
    /// original, even when the original was claimed from static storage.
    fn clone(&self) -> Self {
        SymString::new(self.as_str())
    }
}

// claimable any number of times because releasing it is a no-op
static EMPTY: StaticSym<1> = StaticSym::new("");

impl Default for SymString {
    /// Returns an empty string claimed from static storage, without
    /// allocating.
    #[inline]
    fn default() -> Self {
        // SAFETY: static storage is never released
        unsafe { SymString::claim(EMPTY.view()) }
    }
}

/// The error returned by [`SymString::try_new`] when the allocator cannot
/// provide memory for a new header. Not recoverable within this crate; the
/// caller decides whether to abort or shed load elsewhere.
#[derive(Copy, Clone, Debug)]
pub struct AllocationError(pub(crate) ());

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt("failed to allocate memory for a string header", f)
    }
}

impl std::error::Error for AllocationError {}

/// The three-stage comparison every handle equality goes through: length,
/// then cached hash, and the bytes themselves only if both matched.
#[inline]
fn eq_views(a: &SymStr<'_>, b: &SymStr<'_>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.hash_value() != b.hash_value() {
        return false;
    }
    #[cfg(test)]
    tests::record_byte_comparison();
    a.as_bytes() == b.as_bytes()
}

impl PartialEq for SymStr<'_> {
    fn eq(&self, other: &Self) -> bool {
        eq_views(self, other)
    }
}

impl Eq for SymStr<'_> {}

impl PartialEq for SymString {
    fn eq(&self, other: &Self) -> bool {
        eq_views(&self.borrow(), &other.borrow())
    }
}

impl Eq for SymString {}

impl<'a> PartialEq<SymStr<'a>> for SymString {
    fn eq(&self, other: &SymStr<'a>) -> bool {
        eq_views(&self.borrow(), other)
    }
}

impl PartialEq<SymString> for SymStr<'_> {
    fn eq(&self, other: &SymString) -> bool {
        eq_views(self, &other.borrow())
    }
}

// Comparisons against plain string types have no cached hash on the other
// side, so they go straight to the bytes.

impl PartialEq<str> for SymStr<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'a> PartialEq<&'a str> for SymStr<'_> {
    fn eq(&self, other: &&'a str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'a> PartialEq<SymStr<'a>> for str {
    fn eq(&self, other: &SymStr<'a>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'a> PartialEq<SymStr<'a>> for &str {
    fn eq(&self, other: &SymStr<'a>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<str> for SymString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'a> PartialEq<&'a str> for SymString {
    fn eq(&self, other: &&'a str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<String> for SymString {
    fn eq(&self, other: &String) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<SymString> for str {
    fn eq(&self, other: &SymString) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<SymString> for &str {
    fn eq(&self, other: &SymString) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<SymString> for String {
    fn eq(&self, other: &SymString) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Ord for SymStr<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for SymStr<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SymString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for SymString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Both handles feed the cached hash to the `Hasher` instead of re-hashing
// the content, which is the point of caching it. Consistent with `Eq`:
// byte-equal content always carries an identical cached hash. Note this is
// not the same sequence of `Hasher` writes `str` produces, which is why
// neither handle implements `Borrow<str>`.

impl Hash for SymStr<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_value());
    }
}

impl Hash for SymString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_value());
    }
}

impl Deref for SymStr<'_> {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for SymString {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for SymStr<'_> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for SymString {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for SymStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for SymStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for SymString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for SymString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl<'a> From<&'a str> for SymString {
    fn from(s: &'a str) -> Self {
        SymString::new(s)
    }
}

impl From<String> for SymString {
    fn from(s: String) -> Self {
        SymString::new(&s)
    }
}

impl<'a> From<SymStr<'a>> for SymString {
    /// Allocates an owned copy of the viewed content.
    fn from(view: SymStr<'a>) -> Self {
        SymString::new(view.as_str())
    }
}

impl From<SymString> for String {
    fn from(s: SymString) -> Self {
        s.as_str().to_owned()
    }
}

impl FromStr for SymString {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<SymString, Self::Err> {
        Ok(SymString::new(s))
    }
}

static_assertions::assert_eq_size!(SymStr<'static>, *const u8);
static_assertions::assert_eq_size!(SymString, *const u8);
static_assertions::assert_eq_size!(Option<SymString>, SymString);
