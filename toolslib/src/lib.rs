//! # A collection of utilities shared by the workspace crates.
//!
//! The intent of this library is to consolidate the plumbing that is not specific to
//! talking with the backup appliance so the library and CLI don't keep duplicating it.
pub mod logs;
pub mod stopwatch;
pub mod text;
