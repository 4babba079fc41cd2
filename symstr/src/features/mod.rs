//! Implementations for optional features.

#[cfg(feature = "serde")]
mod serde;
