use core::ptr;
use std::alloc;

use crate::hash::hash_bytes;
use crate::AllocationError;

/// Bit 31 of [`Header::len_and_owned`]: set when the header's backing memory
/// was heap-allocated and must be released by exactly one owner.
const OWNED_FLAG: u32 = 1 << 31;
const LENGTH_MASK: u32 = OWNED_FLAG - 1;

/// The longest content, in bytes, a header can describe.
///
/// The length shares a `u32` with the ownership flag, so content is capped at
/// `2^31 - 1` bytes. Constructors panic beyond this.
pub const MAX_LENGTH: usize = LENGTH_MASK as usize;

/// The fixed-layout front of every string allocation: the cached hash and the
/// packed length/ownership word. The content bytes, plus a NUL terminator for
/// C-style consumers, sit immediately after these fields.
///
/// Headers are immutable once written; the hash is computed exactly once.
#[repr(C)]
pub(crate) struct Header {
    pub(crate) hash: u32,
    pub(crate) len_and_owned: u32,
}

/// A `NonNull<Header>` with provenance for the entire allocation, including
/// the content bytes after the fixed fields.
///
/// This pointer must always be valid for reads of the header; whether the
/// trailing bytes may still be read is governed by the handle types wrapping
/// it.
#[derive(Clone, Copy)]
pub(crate) struct HeaderPtr {
    ptr: ptr::NonNull<Header>,
}

impl HeaderPtr {
    /// Heap-allocates a header for `text`, marking it owned.
    ///
    /// Allocation failure is fatal, per [`alloc::handle_alloc_error`].
    pub(crate) fn allocate(text: &str) -> Self {
        match Self::try_allocate(text) {
            Ok(this) => this,
            Err(_) => alloc::handle_alloc_error(Self::layout(text.len())),
        }
    }

    /// Heap-allocates a header for `text`, surfacing allocation failure to the
    /// caller instead of aborting.
    ///
    /// # Panics
    /// Panics if `text` is longer than [`MAX_LENGTH`].
    pub(crate) fn try_allocate(text: &str) -> Result<Self, AllocationError> {
        let len = text.len();
        assert!(
            len <= MAX_LENGTH,
            "string content may not exceed 2^31 - 1 bytes"
        );

        let layout = Self::layout(len);
        debug_assert!(layout.size() > 0);

        // SAFETY: `alloc(...)` has undefined behavior if the layout is
        // zero-sized, but ours always includes the header fields
        let raw_ptr = unsafe { alloc::alloc(layout) as *mut Header };

        // `alloc::alloc` returns a null pointer if allocation failed
        let ptr = match ptr::NonNull::new(raw_ptr) {
            Some(ptr) => ptr,
            None => return Err(AllocationError(())),
        };

        // SAFETY: the allocation above is sized and aligned for a `Header`
        // followed by `len + 1` bytes, and we are the only one writing to it
        unsafe {
            let raw = ptr.as_ptr();
            ptr::addr_of_mut!((*raw).hash).write(hash_bytes(text.as_bytes()));
            ptr::addr_of_mut!((*raw).len_and_owned).write(len as u32 | OWNED_FLAG);

            let content = raw.add(1).cast::<u8>();
            content.copy_from_nonoverlapping(text.as_ptr(), len);
            content.add(len).write(0);
        }

        Ok(HeaderPtr { ptr })
    }

    /// Wraps a pointer to an existing header, typically one living in static
    /// storage. The pointer must have provenance for the trailing bytes too.
    pub(crate) fn from_non_null(ptr: ptr::NonNull<Header>) -> Self {
        HeaderPtr { ptr }
    }

    fn layout(len: usize) -> alloc::Layout {
        let content = alloc::Layout::array::<u8>(len + 1).expect("valid content length");
        alloc::Layout::new::<Header>()
            .extend(content)
            .expect("valid layout")
            .0
            .pad_to_align()
    }

    /// Releases the entire allocation, header and content together.
    ///
    /// # Safety
    /// The header must have been created by [`HeaderPtr::try_allocate`], and
    /// no copy of this pointer may be used afterwards.
    pub(crate) unsafe fn dealloc(self) {
        let layout = Self::layout(self.len());

        // SAFETY: the layout is recomputed from the stored length, so it
        // matches the one used at allocation time, and we use the same global
        // allocator
        unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
    }

    fn header(&self) -> &Header {
        // SAFETY: `self.ptr` must always be valid for reads of the header
        unsafe { self.ptr.as_ref() }
    }

    pub(crate) fn hash(&self) -> u32 {
        self.header().hash
    }

    pub(crate) fn len(&self) -> usize {
        (self.header().len_and_owned & LENGTH_MASK) as usize
    }

    pub(crate) fn is_owned(&self) -> bool {
        self.header().len_and_owned & OWNED_FLAG != 0
    }

    /// Pointer to the first content byte, one `Header` past the base.
    pub(crate) fn content_ptr(&self) -> *const u8 {
        // SAFETY: the allocation always extends `len + 1` bytes past the
        // header, so one-past-the-fields is in bounds
        unsafe { self.ptr.as_ptr().add(1).cast::<u8>() }
    }
}
