//! Core engine primitives: buffered file I/O and parallel execution.

pub mod io;
pub mod parallel;
