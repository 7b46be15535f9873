//! # mouse16
//!
//! A concatenative, stack-based toy language: one character is one
//! token, and every token is either a literal scan, a stack operation
//! or a jump.
//!
//! Run the binary with no arguments for the interactive typewriter:
//! ```text
//! mouse16 0.1.0
//!
//!  mouse  0 )  4 12 +!
//! 16
//! ```
//! or hand it scripts on the command line to run them in order.

pub mod lang;
pub mod mach;
pub mod term;
