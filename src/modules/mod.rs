//! Domain modules built on top of the engines

pub mod io;
pub mod peptides;
pub mod seq;
