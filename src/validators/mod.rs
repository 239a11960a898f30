//! Syntactic field validation.

pub mod email;

pub use email::is_email_valid;
