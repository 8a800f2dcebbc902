pub(crate) mod lists;
pub(crate) mod store;

pub use lists::{COMPARE_KEY, CompareList, MAX_COMPARE, WISHLIST_KEY, Wishlist};
pub use store::{JsonFileStore, KvStore, MemoryStore};
