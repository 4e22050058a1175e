//! I/O layer: loading source bitmaps and writing PNG outputs plus
//! asset-catalog manifests.
pub mod reader;
pub use reader::{ensure_source_exists, load_image};

pub mod writers;
