//! Barakah Core - Shared types library.
//!
//! This crate provides common types used across all Barakah console
//! components:
//! - `client` - Typed REST client for the assistant backend
//! - `console` - Admin panel and public chat widget (server-rendered)
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, brands, statuses, and
//!   prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
