pub(crate) mod cache;
pub(crate) mod decode;
pub(crate) mod loader;

pub use cache::{ImageCache, PreloadReport};
pub use decode::{decode_data_url, decode_image, decode_svg, encode_jpeg_data_url};
pub use loader::{FsImageLoader, ImageLoader, resolve_asset_path};
