use core::fmt;

use castaway::{
    match_type,
    LifetimeFree,
};

use crate::SymString;

/// A trait for converting a value to a [`SymString`].
///
/// This trait is automatically implemented for any type which implements the
/// [`Display`] trait. As such, `ToSymString` shouldn't be implemented
/// directly: [`Display`] should be implemented instead, and you get the
/// `ToSymString` implementation for free.
///
/// Integers and floats skip the formatting machinery entirely and go through
/// [`itoa`] and [`ryu`].
///
/// ```
/// use symstr::ToSymString;
///
/// let port = 8080;
/// assert_eq!(port.to_sym_string(), "8080");
/// ```
///
/// [`Display`]: fmt::Display
pub trait ToSymString {
    /// Converts the given value to a [`SymString`].
    fn to_sym_string(&self) -> SymString;
}

/// # Safety
///
/// * `SymString` does not contain any lifetime
/// * `SymString` is 'static
unsafe impl LifetimeFree for SymString {}

impl<T: fmt::Display> ToSymString for T {
    fn to_sym_string(&self) -> SymString {
        match_type!(self, {
            &u8 as n => integer(*n),
            &i8 as n => integer(*n),
            &u16 as n => integer(*n),
            &i16 as n => integer(*n),
            &u32 as n => integer(*n),
            &i32 as n => integer(*n),
            &u64 as n => integer(*n),
            &i64 as n => integer(*n),
            &u128 as n => integer(*n),
            &i128 as n => integer(*n),
            &usize as n => integer(*n),
            &isize as n => integer(*n),
            &f32 as n => float(*n),
            &f64 as n => float(*n),
            &bool as b => SymString::new(if *b { "true" } else { "false" }),
            &char as c => SymString::new(c.encode_utf8(&mut [0; 4])),
            &String as s => SymString::new(s.as_str()),
            &SymString as s => s.clone(),
            s => SymString::new(&s.to_string())
        })
    }
}

fn integer<N: itoa::Integer>(value: N) -> SymString {
    let mut buffer = itoa::Buffer::new();
    SymString::new(buffer.format(value))
}

fn float<F: ryu::Float>(value: F) -> SymString {
    let mut buffer = ryu::Buffer::new();
    SymString::new(buffer.format(value))
}
