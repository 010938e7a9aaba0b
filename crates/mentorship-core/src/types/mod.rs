//! Core types for mentorship.

mod id;
mod mentor;
mod student;

pub use id::*;
pub use mentor::*;
pub use student::*;
