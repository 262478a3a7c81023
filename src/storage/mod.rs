mod blocking;
mod store;
mod wild;

pub use blocking::BlockingStore;
pub use store::Store;
pub use wild::WildStore;
