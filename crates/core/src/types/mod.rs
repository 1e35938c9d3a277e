//! Core types for Breedbook.
//!
//! This module provides type-safe wrappers for the breed catalog domain.

pub mod breed;
pub mod page;
pub mod snapshot;

pub use breed::{BreedName, BreedNameError};
pub use page::{DEFAULT_LIMIT, DEFAULT_PAGE, PageMeta, PageRequest, Paginated, paginate};
pub use snapshot::CatalogSnapshot;
