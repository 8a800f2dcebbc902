pub(crate) mod filter;
pub(crate) mod generator;
pub(crate) mod table;

pub use filter::{FilterOp, TintFilter, apply_filter};
pub use generator::{GalleryGenerator, TintGenerator};
pub use table::ColorTintTable;
