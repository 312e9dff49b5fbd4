//! Commands module - all operations as library functions
//!
//! These commands are used by the CLI; they return data plus plain-text
//! renderings and never print.

pub mod reachable;
pub mod show;
pub mod validate;
