// Operations module
// Category API client and the store that keeps local state in sync with it

pub mod api;
pub mod error;
pub mod snapshot;
pub mod store;

#[cfg(test)]
pub(crate) mod stub;

pub use api::{CategoryApi, HttpCategoryApi};
pub use error::{Precondition, SyncError};
pub use snapshot::Snapshot;
pub use store::SyncStore;
