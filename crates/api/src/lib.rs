//! Breedbook API library.
//!
//! JSON service over the dog.ceo breed catalog with a persisted favorites
//! list. Built as a library so the router can be driven from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod dogceo;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
