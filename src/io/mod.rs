//! File I/O: reading articles and writing results

pub mod reader;
pub mod writer;

pub use reader::{convenience, DocumentReader, ReaderConfig};
pub use writer::write_atomic;
