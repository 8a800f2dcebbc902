#![forbid(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod config;
pub mod eco;
pub mod finance;
mod foundation;
pub mod gallery;
pub mod orbit;
pub mod persist;
pub mod tint;

pub use assets::{FsImageLoader, ImageCache, ImageLoader, PreloadReport};
pub use catalog::{
    Bike, BikeFilter, BikeKind, BuiltinCatalog, Catalog, CatalogEntry, CatalogSource,
    ColorImageMap, Condition, Experience, FuelType, JsonFileCatalog, Recommendation,
    RiderProfile, SHORTLIST_LEN, SortOrder, Terrain, Usage, UsedEfficiency,
};
pub use config::GalleryConfig;
pub use eco::{Commute, EcoImpact};
pub use finance::{Installment, LoanTerms, present_value};
pub use foundation::core::{FitRect, ImageSrc, PixelSize};
pub use foundation::error::{VahanError, VahanResult};
pub use gallery::{
    ColorResolver, DetailSession, HeroPresenter, HeroState, LoadRequest, LoadToken, Resolution,
};
pub use orbit::{FrameSet, FrameSlot, OrbitViewer, contain_fit, render_frame};
pub use persist::{CompareList, JsonFileStore, KvStore, MemoryStore, Wishlist};
pub use tint::{
    ColorTintTable, FilterOp, GalleryGenerator, TintFilter, TintGenerator, apply_filter,
};
