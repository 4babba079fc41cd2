use alloc_trace::{
    CountingAllocator,
    Event,
};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng,
};
use symstr::{
    sym,
    SymString,
};

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator::new();

fn alloc_count(events: &[Event]) -> usize {
    events.iter().filter(|event| event.is_alloc()).count()
}

fn freed_count(events: &[Event]) -> usize {
    events.iter().filter(|event| event.is_freed()).count()
}

// A single test so no other test's allocations can leak into the traces.
#[test]
fn test_allocation_accounting() {
    let seed: u64 = rand::thread_rng().gen();
    eprintln!("using seed: {}_u64", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    // constructing and dropping N owned strings performs exactly N
    // allocations and N deallocations
    let num_words = rng.gen_range(1..500);
    let words: Vec<String> = (0..num_words)
        .map(|_| {
            let len = rng.gen_range(0..64);
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect()
        })
        .collect();

    ALLOCATOR.start();
    for word in &words {
        let owned = SymString::new(word);
        assert_eq!(owned.as_str(), word.as_str());
    }
    let events = ALLOCATOR.stop();

    assert_eq!(alloc_count(&events), num_words);
    assert_eq!(freed_count(&events), num_words);
    let net: isize = events.iter().map(Event::delta).sum();
    assert_eq!(net, 0, "all allocated memory must be returned");

    // moving a handle neither allocates nor frees
    ALLOCATOR.start();
    {
        let first = SymString::new("moved-once");
        let second = first;
        assert_eq!(second.len(), 10);
    }
    let events = ALLOCATOR.stop();
    assert_eq!(alloc_count(&events), 1);
    assert_eq!(freed_count(&events), 1);

    // claiming and dropping a static header never touches the allocator
    ALLOCATOR.start();
    {
        let claimed = unsafe { SymString::claim(sym!("static-tag")) };
        assert!(!claimed.is_heap_allocated());
    }
    let events = ALLOCATOR.stop();
    assert!(events.is_empty());

    // a clone gets its own backing allocation, released independently
    ALLOCATOR.start();
    {
        let original = SymString::new("cloned");
        let copy = original.clone();
        assert_ne!(original.as_ptr(), copy.as_ptr());
        drop(original);
        assert_eq!(copy.as_str(), "cloned");
    }
    let events = ALLOCATOR.stop();
    assert_eq!(alloc_count(&events), 2);
    assert_eq!(freed_count(&events), 2);

    // leaking an owner keeps its allocation live until explicitly released
    ALLOCATOR.start();
    let view = SymString::new("leaked").leak();
    let events = ALLOCATOR.stop();
    assert_eq!(alloc_count(&events), 1);
    assert_eq!(freed_count(&events), 0);

    ALLOCATOR.start();
    // SAFETY: ownership was given up by `leak`, this is the only release
    unsafe { view.release() };
    let events = ALLOCATOR.stop();
    assert_eq!(alloc_count(&events), 0);
    assert_eq!(freed_count(&events), 1);
}
