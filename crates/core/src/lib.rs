//! Registration form validation core.
//!
//! Pure logic shared by every submission path: the declarative schema model,
//! raw-record normalization, the validation executor and the registration
//! schema variants. No I/O happens in this crate.

pub mod age;
pub mod error;
pub mod registration;
pub mod validation;
