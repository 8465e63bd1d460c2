//! Barakah Client - Typed REST client for the assistant backend.
//!
//! The backend performs the actual business logic (chat answering, document
//! ingestion/distillation, persistence); this crate only transports typed
//! requests and responses over its REST API.
//!
//! # Modules
//!
//! - [`client`] - [`BackendClient`] and the request/response pipeline
//! - [`types`] - Wire types for every endpoint
//! - [`session`] - Persisted session record (bearer token + cached user)
//! - [`error`] - The single [`ClientError`] taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::BackendClient;
pub use error::ClientError;
pub use session::{Session, SessionFile};
