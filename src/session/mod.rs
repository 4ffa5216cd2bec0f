//! Compilation sessions.
//!
//! A session owns the registry and the node id counter shared by every file
//! compiled together. It runs the whole front end: the prelude and the user
//! files are tokenized, all of them are harvested before any is parsed, and
//! the parsed files are type checked as one program.

pub mod prelude;
pub mod session;

#[cfg(test)]
mod tests;
