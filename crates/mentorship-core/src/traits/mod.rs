//! Core traits for mentorship providers.

mod store;

pub use store::*;
