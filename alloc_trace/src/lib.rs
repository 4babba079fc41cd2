//! A counting wrapper around the [`System`] allocator, used by integration
//! tests to check that string headers are allocated and released exactly once.

use std::alloc::{
    GlobalAlloc,
    Layout,
    System,
};
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};

use parking_lot::{
    const_mutex,
    Mutex,
};

/// A single call into the system allocator, observed while tracing was on.
#[derive(Debug, Clone)]
pub enum Event {
    Alloc { addr: usize, size: usize },
    Freed { addr: usize, size: usize },
}

impl Event {
    /// Net effect of this event on the amount of live heap memory.
    pub fn delta(&self) -> isize {
        match self {
            Self::Alloc { size, .. } => *size as isize,
            Self::Freed { size, .. } => -(*size as isize),
        }
    }

    pub fn is_alloc(&self) -> bool {
        matches!(self, Self::Alloc { .. })
    }

    pub fn is_freed(&self) -> bool {
        matches!(self, Self::Freed { .. })
    }
}

/// A [`GlobalAlloc`] that forwards to [`System`] and records every allocation
/// and deallocation made while tracing is enabled.
///
/// ```
/// use alloc_trace::CountingAllocator;
///
/// // #[global_allocator]
/// static ALLOCATOR: CountingAllocator = CountingAllocator::new();
/// ```
pub struct CountingAllocator {
    events: Mutex<Vec<Event>>,
    enabled: AtomicBool,
}

impl CountingAllocator {
    pub const fn new() -> Self {
        Self {
            events: const_mutex(Vec::new()),
            enabled: AtomicBool::new(false),
        }
    }

    /// Begins recording, discarding anything recorded earlier.
    pub fn start(&self) {
        self.events.lock().clear();
        self.enabled.store(true, Ordering::SeqCst);
    }

    /// Stops recording and returns the events observed since [`start`].
    ///
    /// [`start`]: CountingAllocator::start
    pub fn stop(&self) -> Vec<Event> {
        self.enabled.store(false, Ordering::SeqCst);
        std::mem::take(&mut *self.events.lock())
    }

    fn record(&self, event: Event) {
        if self.enabled.load(Ordering::SeqCst) {
            // growing the log goes through this allocator too, keep those
            // pushes out of the record
            self.enabled.store(false, Ordering::SeqCst);
            self.events.lock().push(event);
            self.enabled.store(true, Ordering::SeqCst);
        }
    }
}

impl Default for CountingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        self.record(Event::Alloc {
            addr: ptr as usize,
            size: layout.size(),
        });
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.record(Event::Freed {
            addr: ptr as usize,
            size: layout.size(),
        });
        unsafe { System.dealloc(ptr, layout) }
    }
}
