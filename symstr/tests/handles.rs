use std::collections::HashMap;

use symstr::{
    format_sym,
    hash_bytes,
    sym,
    SymStr,
    SymString,
    ToSymString,
};

#[test]
fn test_views_are_cheap_to_spread() {
    let owned = SymString::new("alpha");
    let view = owned.borrow();

    // copies of a view all read the same header
    let copies = [view, view, view];
    for copy in copies {
        assert_eq!(copy, "alpha");
        assert_eq!(copy.as_ptr(), owned.as_ptr());
    }
}

#[test]
fn test_static_view_equals_heap_view() {
    let owned = SymString::new("alpha");
    assert_eq!(sym!("alpha"), owned.borrow());
    assert_eq!(owned.borrow(), sym!("alpha"));
}

#[test]
fn test_macro_reuses_storage() {
    fn field() -> SymStr<'static> {
        sym!("content-length")
    }

    // each call returns a view of the same static item
    assert_eq!(field().as_ptr(), field().as_ptr());
    assert_eq!(field().hash_value(), hash_bytes(b"content-length"));
}

#[test]
fn test_mixed_handle_map() {
    let mut dispatch: HashMap<SymString, fn() -> &'static str> = HashMap::new();
    dispatch.insert(SymString::new("get"), || "GET");
    dispatch.insert(SymString::new("put"), || "PUT");

    let incoming = SymString::new("get");
    let handler = dispatch.get(&incoming).expect("route should exist");
    assert_eq!(handler(), "GET");
}

#[test]
fn test_conversions() {
    let owned: SymString = "typed".parse().expect("infallible");
    assert_eq!(owned, "typed");

    let from_string = SymString::from(String::from("heap"));
    assert_eq!(from_string, "heap");

    let from_view = SymString::from(sym!("static"));
    assert!(from_view.is_heap_allocated(), "conversion copies into an owned header");

    let back: String = SymString::new("round").into();
    assert_eq!(back, "round");
}

#[test]
fn test_formatting_adapters() {
    assert_eq!(format_sym!("{}/{}", "api", 2), "api/2");
    assert_eq!(512u16.to_sym_string(), "512");

    let owned = SymString::new("printable");
    assert_eq!(owned.to_string(), "printable");
    assert_eq!(format!("{:?}", sym!("quoted")), "\"quoted\"");
}

#[test]
fn test_deref_gives_str_methods() {
    let owned = SymString::new("Content-Type");
    assert!(owned.starts_with("Content"));
    assert_eq!(owned.to_ascii_lowercase(), "content-type");

    let view = sym!("Content-Type");
    assert!(view.ends_with("Type"));
}

#[test]
fn test_interior_nul_round_trips() {
    let owned = SymString::new("a\0b");
    assert_eq!(owned.len(), 3);
    assert_eq!(owned.as_bytes(), b"a\0b");
    assert_ne!(owned, SymString::new("ab"));
}

#[test]
fn test_view_outlives_handle_copy() {
    let owned = SymString::new("stable");
    let bytes = owned.borrow().as_bytes();
    // the slice borrows from the header, so it is usable after the view
    // handle itself is gone
    assert_eq!(bytes, b"stable");
}
