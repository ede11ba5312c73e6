//! Amberleaf Storefront - client library for the remote store API.
//!
//! This crate owns the per-session client state of the storefront and the
//! typed REST client it is synchronized through:
//!
//! - [`cart::CartSession`] - line items plus a running total, resynchronized
//!   from the remote service after every mutation (fetch-after-write)
//! - [`compare::CompareList`] - bounded, ordered, client-local set of
//!   products selected for side-by-side comparison
//! - [`catalog::Catalog`] - cached read-only access to the product catalog
//! - [`api::ApiClient`] - REST client with per-request bearer credentials
//!
//! State containers are plain owned values injected into consumers; there are
//! no ambient globals. Callers drive all operations and await the resync
//! before reading fresh state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod types;
