//! Document transformation core
//!
//! - [`document`]: `ParsedDocument`, the split and decoded article
//! - [`front_matter`]: header block detection and the typed `FrontMatter`
//! - [`links`]: image link scanning, rewriting and prefixing over `LinkMap`
//!
//! Nothing here reads the environment or logs; every function is pure over
//! the text it is given.

pub mod document;
pub mod front_matter;
pub mod links;

pub use document::ParsedDocument;
pub use front_matter::{FrontMatter, FrontMatterFormat};
pub use links::{prefix_links, rewrite_image_links, scan_image_links, LinkMap};
