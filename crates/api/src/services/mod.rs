//! Business logic services.
//!
//! # Services
//!
//! - `catalog` - TTL-bounded cache of the upstream breed list
//! - `images` - Random sample images for one breed
//! - `favorites` - Persisted favorites validated against the catalog
//!
//! Upstream transport errors are translated into [`ServiceError`] here and
//! never leave this module in raw form.

pub mod catalog;
pub mod error;
pub mod favorites;
pub mod images;

pub use catalog::BreedCatalog;
pub use error::{ErrorKind, ServiceError};
pub use favorites::FavoritesStore;
pub use images::{ImageLookup, SAMPLE_SIZE};
