//! Breedbook Core - Shared types library.
//!
//! This crate provides the types shared by the Breedbook components:
//! - `api` - JSON service over the dog breed catalog and favorites
//! - `integration-tests` - HTTP-level tests against the service
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no file access. This keeps it lightweight and trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Breed names, catalog snapshots, and pagination

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
