pub mod ambient;
pub mod library;
pub mod profile;
pub mod store;

pub use store::{AddOutcome, CollectionStore};
