//! Core types for the Barakah assistant console.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod domain;
pub mod id;
pub mod price;
pub mod status;

pub use domain::{Domain, DomainParseError};
pub use id::*;
pub use price::{PriceCny, PriceParseError};
pub use status::*;
