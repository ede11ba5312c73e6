//! Amberleaf Core - Shared types library.
//!
//! This crate provides common types used across all Amberleaf components:
//! - `storefront` - Client library for the remote store API (cart, catalog, compare)
//! - `integration-tests` - End-to-end tests against a mock of the remote API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
