//! Value objects returned across the crate boundary.

pub mod introspection;

pub use introspection::Introspection;
